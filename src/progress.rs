//! 進捗表示
//!
//! スピナー表示中に出たログは、スピナーを一時的に消してから書き出す

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::time::Duration;

/// ログ出力先（env_loggerのパイプ用）
///
/// 書き込みのたびに `MultiProgress::suspend` で描画中のバーを退避する
pub struct ProgressLogWriter<W: Write + Send> {
    progress: MultiProgress,
    inner: W,
}

impl<W: Write + Send> ProgressLogWriter<W> {
    pub fn new(progress: MultiProgress, inner: W) -> Self {
        Self { progress, inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write + Send> Write for ProgressLogWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let inner = &mut self.inner;
        self.progress.suspend(|| inner.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        let inner = &mut self.inner;
        self.progress.suspend(|| inner.flush())
    }
}

/// スピナーを作成して表示開始
pub fn spinner(progress: &MultiProgress, message: &str) -> ProgressBar {
    let bar = progress.add(ProgressBar::new_spinner());
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} ({elapsed})") {
        bar.set_style(style);
    }
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}
