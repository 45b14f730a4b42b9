pub mod markdown;
pub mod report;

use crate::cli::ReportFormat;
use crate::error::{Result, SketchAiError};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::ImageFormat;
use sketch_ai_common::{split_data_uri, GeneratedResult, Language};
use std::path::{Path, PathBuf};

pub use markdown::render_markdown_html;

/// MIMEタイプから画像ファイルの拡張子を決める（不明ならpng）
fn extension_for_mime(mime_type: &str) -> &'static str {
    ImageFormat::from_mime_type(mime_type)
        .and_then(|format| format.extensions_str().first().copied())
        .unwrap_or("png")
}

/// 生成画像（Data URI）をファイルに保存
///
/// # Returns
/// 保存したファイルのパス（`<output_dir>/<stem>.<拡張子>`）
pub fn write_image(data_uri: &str, output_dir: &Path, stem: &str) -> Result<PathBuf> {
    let (mime_type, data) = split_data_uri(data_uri)
        .ok_or_else(|| SketchAiError::ImageDecode("not a base64 data URI".into()))?;
    let bytes = STANDARD
        .decode(data)
        .map_err(|e| SketchAiError::ImageDecode(e.to_string()))?;

    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(format!("{}.{}", stem, extension_for_mime(mime_type)));
    std::fs::write(&path, bytes)?;
    Ok(path)
}

/// レポートを保存
///
/// 画像はファイル名で参照する（同じディレクトリに置く前提）
pub fn write_report(
    result: &GeneratedResult,
    language: Language,
    format: ReportFormat,
    image_path: &Path,
    output_dir: &Path,
    stem: &str,
) -> Result<PathBuf> {
    let image_src = image_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| SketchAiError::Export(format!("invalid image path: {}", image_path.display())))?;

    let (content, extension) = match format {
        ReportFormat::Html => (report::render_html(result, language, &image_src), "html"),
        ReportFormat::Markdown => (report::render_markdown(result, language, &image_src), "md"),
        ReportFormat::Json => (report::render_json(result)?, "json"),
    };

    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(format!("{}.{}", stem, extension));
    std::fs::write(&path, content)?;
    Ok(path)
}
