//! 生成結果のレポート出力（HTML / Markdown / JSON）

use super::markdown::{escape_html, render_markdown_html};
use crate::error::Result;
use sketch_ai_common::{GeneratedResult, Language};

/// HTMLレポートを生成
///
/// # Arguments
/// * `image_src` - imgタグのsrc（画像ファイル名またはData URI）
pub fn render_html(result: &GeneratedResult, language: Language, image_src: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ font-family: Georgia, serif; max-width: 48rem; margin: 2rem auto; color: #3d3a36; background: #faf8f5; }}
img {{ width: 100%; border-radius: 6px; background: #fff; }}
li {{ margin: 0.25rem 0; }}
</style>
</head>
<body>
<h1>{title}</h1>
<img src="{image_src}" alt="Generated drawing">
<section>
<h2>{guidelines_title}</h2>
{guidelines}
</section>
<section>
<h2>{tips_title}</h2>
{tips}
</section>
</body>
</html>
"#,
        lang = language.code(),
        title = escape_html(language.result_title()),
        image_src = escape_html(image_src),
        guidelines_title = escape_html(language.guidelines_title()),
        guidelines = render_markdown_html(&result.analysis.guidelines),
        tips_title = escape_html(language.tips_title()),
        tips = render_markdown_html(&result.analysis.tips),
    )
}

/// Markdownレポートを生成
pub fn render_markdown(result: &GeneratedResult, language: Language, image_src: &str) -> String {
    format!(
        "# {}\n\n![Generated drawing]({})\n\n## {}\n\n{}\n\n## {}\n\n{}\n",
        language.result_title(),
        image_src,
        language.guidelines_title(),
        result.analysis.guidelines.trim(),
        language.tips_title(),
        result.analysis.tips.trim(),
    )
}

/// JSONレポートを生成（GeneratedResultそのもの）
pub fn render_json(result: &GeneratedResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}
