//! 解説の翻訳
//!
//! 翻訳は付加機能なので、失敗しても生成全体は失敗させない。
//! エラーはログに出して原文を返す

use sketch_ai_common::{
    build_translation_prompt, parse_translation_response, DrawingAnalysis,
    GenerateContentRequest, Language, Stage,
};

use crate::gemini::GenerativeBackend;

pub struct Translator<'a, B: GenerativeBackend + ?Sized> {
    backend: &'a B,
    model: &'a str,
}

impl<'a, B: GenerativeBackend + ?Sized> Translator<'a, B> {
    pub fn new(backend: &'a B, model: &'a str) -> Self {
        Self { backend, model }
    }

    /// テキストを翻訳
    ///
    /// 英語（モデルの出力言語）または空文字の場合は呼び出しを行わずそのまま返す
    pub async fn translate(&self, text: &str, language: Language) -> String {
        if language.is_native() || text.is_empty() {
            return text.to_string();
        }

        let request = GenerateContentRequest::text(&build_translation_prompt(text, language));
        let result = self
            .backend
            .generate_content(self.model, &request, Stage::Translation)
            .await
            .and_then(|response| parse_translation_response(&response));

        match result {
            Ok(translated) => translated,
            Err(e) => {
                log::warn!("Translation to {} failed, keeping the original text: {}", language.name(), e);
                text.to_string()
            }
        }
    }

    /// guidelines と tips を並行して翻訳
    ///
    /// 片方の失敗はもう片方に影響しない
    pub async fn translate_analysis(
        &self,
        analysis: DrawingAnalysis,
        language: Language,
    ) -> DrawingAnalysis {
        if language.is_native() {
            return analysis;
        }

        let (guidelines, tips) = futures::join!(
            self.translate(&analysis.guidelines, language),
            self.translate(&analysis.tips, language),
        );

        DrawingAnalysis { guidelines, tips }
    }
}
