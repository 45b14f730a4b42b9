//! 解説テキスト（簡易markdown）のHTML変換
//!
//! 対応するのは `* ` で始まる箇条書きと `**太字**` のみ。
//! それ以外の空でない行は段落になる

use regex::Regex;

/// HTMLの特殊文字をエスケープ
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn render_inline(text: &str) -> String {
    lazy_static::lazy_static! {
        static ref BOLD_RE: Regex = Regex::new(r"\*\*(.+?)\*\*").unwrap();
    }
    BOLD_RE
        .replace_all(&escape_html(text), "<strong>$1</strong>")
        .into_owned()
}

/// 解説テキストをHTMLに変換
///
/// 連続する箇条書きは1つの `<ul>` にまとめる
pub fn render_markdown_html(text: &str) -> String {
    let mut html = String::new();
    let mut in_list = false;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(item) = line.strip_prefix("* ") {
            if !in_list {
                html.push_str("<ul>");
                in_list = true;
            }
            html.push_str("<li>");
            html.push_str(&render_inline(item.trim_start()));
            html.push_str("</li>");
        } else {
            if in_list {
                html.push_str("</ul>");
                in_list = false;
            }
            html.push_str("<p>");
            html.push_str(&render_inline(line));
            html.push_str("</p>");
        }
    }

    if in_list {
        html.push_str("</ul>");
    }

    html
}
