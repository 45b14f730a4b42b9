//! Gemini API（generateContent）のリクエスト/レスポンス型
//!
//! JSONはcamelCase。レスポンス側は欠けているフィールドがあっても
//! デシリアライズできるよう、すべて `default` にしている

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::types::ImagePayload;

/// 正常終了を表すfinishReason
pub const FINISH_REASON_STOP: &str = "STOP";

/// Gemini APIリクエスト
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: ImagePayload,
    },
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<Modality>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Modality {
    Text,
    Image,
}

impl GenerateContentRequest {
    /// 画像生成リクエスト（画像 + プロンプト、出力は画像のみ）
    pub fn image_generation(image: &ImagePayload, prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![
                    Part::InlineData {
                        inline_data: image.clone(),
                    },
                    Part::Text {
                        text: prompt.to_string(),
                    },
                ],
            }],
            generation_config: Some(GenerationConfig {
                response_modalities: Some(vec![Modality::Image]),
                ..Default::default()
            }),
        }
    }

    /// 解説生成リクエスト（画像 + プロンプト、出力はguidelines/tipsのJSON）
    pub fn structured_analysis(image: &ImagePayload, prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![
                    Part::InlineData {
                        inline_data: image.clone(),
                    },
                    Part::Text {
                        text: prompt.to_string(),
                    },
                ],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(analysis_schema()),
                ..Default::default()
            }),
        }
    }

    /// テキストのみのリクエスト（翻訳用）
    pub fn text(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part::Text {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: None,
        }
    }

    /// 最初のテキストパート
    pub fn prompt_text(&self) -> Option<&str> {
        self.contents
            .iter()
            .flat_map(|c| c.parts.iter())
            .find_map(|p| match p {
                Part::Text { text } => Some(text.as_str()),
                Part::InlineData { .. } => None,
            })
    }

    /// 添付された画像
    pub fn inline_image(&self) -> Option<&ImagePayload> {
        self.contents
            .iter()
            .flat_map(|c| c.parts.iter())
            .find_map(|p| match p {
                Part::InlineData { inline_data } => Some(inline_data),
                Part::Text { .. } => None,
            })
    }
}

/// 解説レスポンスのJSONスキーマ（2つの必須文字列フィールド）
pub fn analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "guidelines": {
                "type": "STRING",
                "description": "General guidelines for drawing the subject, formatted with markdown newlines."
            },
            "tips": {
                "type": "STRING",
                "description": "Specific tips for drawing the subject, formatted with markdown newlines."
            }
        },
        "required": ["guidelines", "tips"]
    })
}

/// Gemini APIレスポンス
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateContentResponse {
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Candidate {
    pub content: Option<ResponseContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResponseContent {
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponsePart {
    pub text: Option<String>,
    #[serde(alias = "inline_data")]
    pub inline_data: Option<ImagePayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// ブロック理由（promptFeedback.blockReason）
    pub fn block_reason(&self) -> Option<&str> {
        self.prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
            .filter(|r| !r.is_empty())
    }

    /// 最初の候補のテキストパートを連結したもの
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}
