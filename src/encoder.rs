//! 画像エンコード
//!
//! アップロード画像（ファイルまたはメモリ上のバイト列）を
//! APIに送るBase64ペイロードに変換する

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::ImageFormat;
use sketch_ai_common::{GenerationError, ImagePayload, Result};
use std::path::{Path, PathBuf};

/// 受け付けるMIMEタイプ
const SUPPORTED_MIME_TYPES: &[&str] = &["image/png", "image/jpeg", "image/webp"];

#[derive(Debug, Clone)]
enum ImageSource {
    Path(PathBuf),
    Memory(Vec<u8>),
}

/// アップロードされた画像
#[derive(Debug, Clone)]
pub struct ImageFile {
    source: ImageSource,
    mime_type: String,
}

impl ImageFile {
    /// ファイルパスから作成（MIMEタイプは拡張子から判定）
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mime_type = mime_type_for_path(&path)?;
        Ok(Self {
            source: ImageSource::Path(path),
            mime_type,
        })
    }

    /// メモリ上のバイト列から作成
    ///
    /// MIMEタイプは `from_path` と同じく png / jpeg / webp のみ
    pub fn from_bytes(bytes: Vec<u8>, mime_type: &str) -> Result<Self> {
        let mime_type = mime_type.trim().to_ascii_lowercase();
        if !SUPPORTED_MIME_TYPES.contains(&mime_type.as_str()) {
            return Err(GenerationError::Encoding(format!(
                "unsupported image type: {}",
                mime_type
            )));
        }

        Ok(Self {
            source: ImageSource::Memory(bytes),
            mime_type,
        })
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// 表示用の名前
    pub fn display_name(&self) -> String {
        match &self.source {
            ImageSource::Path(path) => path.display().to_string(),
            ImageSource::Memory(bytes) => format!("<{} bytes, {}>", bytes.len(), self.mime_type),
        }
    }

    async fn read_bytes(&self) -> Result<Vec<u8>> {
        match &self.source {
            ImageSource::Path(path) => tokio::fs::read(path)
                .await
                .map_err(|e| GenerationError::Encoding(format!("{}: {}", path.display(), e))),
            ImageSource::Memory(bytes) => Ok(bytes.clone()),
        }
    }
}

/// 拡張子からMIMEタイプを判定
fn mime_type_for_path(path: &Path) -> Result<String> {
    let format = ImageFormat::from_path(path).map_err(|_| {
        GenerationError::Encoding(format!("unsupported image type: {}", path.display()))
    })?;

    let mime_type = format.to_mime_type();
    if SUPPORTED_MIME_TYPES.contains(&mime_type) {
        Ok(mime_type.to_string())
    } else {
        Err(GenerationError::Encoding(format!(
            "unsupported image type: {} ({})",
            path.display(),
            mime_type
        )))
    }
}

/// 画像をBase64ペイロードに変換
///
/// ファイルの読み込み完了を待ってから返す。読み込みに失敗した場合や
/// 中身が空の場合は `Encoding` エラー
pub async fn encode(file: &ImageFile) -> Result<ImagePayload> {
    let bytes = file.read_bytes().await?;
    if bytes.is_empty() {
        return Err(GenerationError::Encoding(format!(
            "{} is empty",
            file.display_name()
        )));
    }

    Ok(ImagePayload {
        mime_type: file.mime_type.clone(),
        data: STANDARD.encode(&bytes),
    })
}
