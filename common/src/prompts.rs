//! プロンプト生成モジュール
//!
//! 生成処理で使うプロンプトをすべてここで組み立てる:
//! - build_image_prompt: スケッチ画像生成用
//! - build_analysis_prompt: 解説（guidelines / tips）生成用
//! - build_translation_prompt: 解説の翻訳用
//!
//! いずれも純粋関数（同じ入力なら同じ文字列）

use crate::types::{DrawingStyle, Language};

/// 全スタイル共通の前置き
///
/// 構図ルール1（指示なし→被写体全体を1:1）、ルール2（部位指定→その部位のみ拡大）、
/// 白背景の指定を必ず含む
const IMAGE_PROMPT_PREAMBLE: &str = r#"You are a drawing assistant. Generate a pencil sketch of the uploaded image, following the user instructions when they are given.

**COMPOSITION RULE 1 (no instructions):** When the user gives no instructions, draw the ENTIRE subject exactly as framed in the uploaded image, as a 1:1 composition. Do not zoom, crop, change the viewing angle, or single out any part. The whole subject must be visible.

**COMPOSITION RULE 2 (instructions name a part):** When the user asks to focus on, zoom into, or detail a specific part of the image (for example 'the face', 'the hands', 'the visage'), draw a zoomed-in sketch of ONLY that part. This rule overrides rule 1.

The background must always be plain white.

**Style goal:** Keep the technique consistent, as if every sketch came from the same artist."#;

/// 輪郭線のみ・単一線幅・陰影なし
const SIMPLE_STYLE: &str = r#"Draw a simple, clean pencil contour drawing. When a focus area is requested, apply this minimalist treatment ONLY to that zoomed-in part. Trace the main outlines exclusively, with a single, consistent line weight. Keep it minimalist and elegant, capturing the essence of the subject with as few lines as possible. No shading and no interior detail."#;

/// アタリ・構造線を主役にし、最終の輪郭はごく薄く
const ANATOMY_STYLE: &str = r#"Draw a 'how-to-draw' construction study that exposes the planning phase of a master artist. The dominant marks MUST be the underlying geometric primitives (spheres, cylinders, boxes) and the scaffolding an artist lays down first:
*   **Construction shapes:** dark, clear lines for joints, limbs, torso and masses.
*   **Perspective lines:** perspective guidelines where the scene calls for them.
*   **Light direction:** simple arrows or strokes showing where the main light comes from.
*   **Support structures:** internal structural lines that hold each part together.

The final contour lines describing the surface must be extremely faint, light and sketchy, like a ghosted overlay on top of the construction. The construction and planning lines MUST dominate. The result should read like a page from an anatomical study sketchbook."#;

/// クロスハッチング・ぼかしで写実的な陰影
const DETAILED_STYLE: &str = r#"Draw a highly detailed, realistic graphite drawing. When a focus area is requested, apply this detailed treatment ONLY to that zoomed-in part. Build the full tonal range with cross-hatching and smooth blended shading. Render intricate textures and subtle value shifts to give depth and a photorealistic finish, like advanced graphite work on textured paper."#;

/// 画像生成プロンプト生成
///
/// # Arguments
/// * `style` - スケッチのスタイル
/// * `instructions` - ユーザー指示（空文字可）
///
/// # Returns
/// 画像生成用のプロンプト文字列。指示が空でなければ末尾は指示そのもの
pub fn build_image_prompt(style: DrawingStyle, instructions: &str) -> String {
    let style_body = match style {
        DrawingStyle::Simple => SIMPLE_STYLE,
        DrawingStyle::Anatomy => ANATOMY_STYLE,
        DrawingStyle::Detailed => DETAILED_STYLE,
    };

    let base = format!("{IMAGE_PROMPT_PREAMBLE}\n\n{style_body}");

    if instructions.trim().is_empty() {
        base
    } else {
        format!("{base}\n\nAdditional user instructions to follow: {instructions}")
    }
}

/// 解説生成プロンプト生成
///
/// レスポンスは `guidelines` / `tips` の2キーを持つJSONオブジェクトを要求する。
/// 指示がある場合は、その部位に絞った解説を要求する
pub fn build_analysis_prompt(instructions: &str) -> String {
    let focus = if instructions.trim().is_empty() {
        String::new()
    } else {
        format!(
            "\n\nThe user gave specific instructions: \"{instructions}\". Your analysis MUST be about this request only. For example, if they ask to zoom on a 'visage', the guidelines and tips must cover drawing the face alone and ignore the rest of the body."
        )
    };

    format!(
        r#"You are a friendly, encouraging drawing teacher. Study the subject of the uploaded image.{focus}

Write 'General Guidelines' on how to approach drawing the subject (or the requested part), and a separate list of 'Tips' for capturing its key features.

Return a JSON object with exactly two keys:
- "guidelines": a string with markdown newlines, using '*' for bullet points and '**' for bold
- "tips": a string with markdown newlines, using '*' for bullet points and '**' for bold"#
    )
}

/// 翻訳プロンプト生成
///
/// `*`（箇条書き）と `**`（太字）を保持するよう指示する
pub fn build_translation_prompt(text: &str, language: Language) -> String {
    format!(
        "Translate the following markdown text to {}. Keep the markdown formatting intact ('*' for bullet points and '**' for bold text). Reply with the translation only. Text to translate:\n\n{}",
        language.name(),
        text
    )
}
