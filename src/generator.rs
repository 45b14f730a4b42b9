//! スケッチ生成
//!
//! 1回の生成の流れ:
//! 画像エンコード（1回） -> 画像生成と解説生成を並行実行 -> 両方の検証成功を待つ
//! -> 解説を翻訳 -> GeneratedResult
//!
//! どちらかの呼び出しが失敗した時点で生成全体が失敗し、部分的な結果は返さない

use sketch_ai_common::{
    build_analysis_prompt, build_image_prompt, parse_analysis_response, parse_image_response,
    DrawingAnalysis, DrawingStyle, GenerateContentRequest, GeneratedResult, ImagePayload,
    Language, Result, Stage,
};

use crate::encoder::{self, ImageFile};
use crate::gemini::GenerativeBackend;
use crate::translator::Translator;

/// 呼び出しごとのモデル名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationModels {
    /// 画像生成
    pub image: String,
    /// 解説生成（JSON出力）
    pub analysis: String,
    /// 翻訳
    pub translation: String,
}

impl Default for GenerationModels {
    fn default() -> Self {
        Self {
            image: "gemini-2.5-flash-image".to_string(),
            analysis: "gemini-2.5-pro".to_string(),
            translation: "gemini-2.5-flash".to_string(),
        }
    }
}

pub struct SketchGenerator<B: GenerativeBackend> {
    backend: B,
    models: GenerationModels,
}

impl<B: GenerativeBackend> SketchGenerator<B> {
    pub fn new(backend: B, models: GenerationModels) -> Self {
        Self { backend, models }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn models(&self) -> &GenerationModels {
        &self.models
    }

    /// スケッチと解説を生成
    ///
    /// # Arguments
    /// * `image` - アップロード画像
    /// * `style` - スケッチのスタイル
    /// * `instructions` - ユーザー指示（空文字可）
    /// * `language` - 解説の出力言語
    pub async fn generate(
        &self,
        image: &ImageFile,
        style: DrawingStyle,
        instructions: &str,
        language: Language,
    ) -> Result<GeneratedResult> {
        let payload = encoder::encode(image).await?;
        log::debug!(
            "encoded {} ({}, {} base64 chars)",
            image.display_name(),
            payload.mime_type,
            payload.data.len()
        );

        // 同じペイロードを2つの呼び出しで共有
        let (sketch, analysis) = futures::try_join!(
            self.generate_sketch(&payload, style, instructions),
            self.generate_analysis(&payload, instructions),
        )?;

        let analysis = Translator::new(&self.backend, &self.models.translation)
            .translate_analysis(analysis, language)
            .await;

        Ok(GeneratedResult {
            image: sketch.to_data_uri(),
            analysis,
        })
    }

    async fn generate_sketch(
        &self,
        payload: &ImagePayload,
        style: DrawingStyle,
        instructions: &str,
    ) -> Result<ImagePayload> {
        let prompt = build_image_prompt(style, instructions);
        log::debug!("[image] style={} prompt={} chars", style, prompt.len());

        let request = GenerateContentRequest::image_generation(payload, &prompt);
        let response = self
            .backend
            .generate_content(&self.models.image, &request, Stage::Image)
            .await?;

        let image = parse_image_response(&response)?;
        log::debug!("[image] received {} ({} base64 chars)", image.mime_type, image.data.len());
        Ok(image)
    }

    async fn generate_analysis(
        &self,
        payload: &ImagePayload,
        instructions: &str,
    ) -> Result<DrawingAnalysis> {
        let prompt = build_analysis_prompt(instructions);
        log::debug!("[analysis] prompt={} chars", prompt.len());

        let request = GenerateContentRequest::structured_analysis(payload, &prompt);
        let response = self
            .backend
            .generate_content(&self.models.analysis, &request, Stage::Analysis)
            .await?;

        parse_analysis_response(&response)
    }
}
