//! Gemini API連携
//!
//! 生成処理はすべて `GenerativeBackend` 経由でリモートを呼び出す。
//! 本番は `GeminiClient`（reqwest）、テストはスクリプト化したバックエンドを使う

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use sketch_ai_common::{GenerateContentRequest, GenerateContentResponse, GenerationError, Stage};
use std::time::Duration;

use crate::error::{Result, SketchAiError};

pub const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// エラーメッセージに含めるレスポンス本文の最大文字数
const MAX_ERROR_BODY_CHARS: usize = 200;

/// 生成AIプロバイダ
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// generateContentを1回呼び出す
    ///
    /// `stage` はエラーメッセージに使う呼び出し元の段階
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
        stage: Stage,
    ) -> std::result::Result<GenerateContentResponse, GenerationError>;
}

/// Gemini APIクライアント
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: &str, timeout: Duration) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(SketchAiError::MissingApiKey);
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SketchAiError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: GEMINI_API_BASE_URL.to_string(),
        })
    }

    /// 接続先を差し替える（プロキシ・テスト用）
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

/// APIエラーレスポンス（`{"error": {"message": ..., "status": ...}}`）
#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

/// HTTPエラーを1行のメッセージにする
fn describe_http_error(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
        let detail = parsed.error;
        if !detail.message.is_empty() {
            return if detail.status.is_empty() {
                format!("HTTP {}: {}", status.as_u16(), detail.message)
            } else {
                format!("HTTP {} {}: {}", status.as_u16(), detail.status, detail.message)
            };
        }
    }

    let truncated: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
    if truncated.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("HTTP {}: {}", status.as_u16(), truncated)
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
        stage: Stage,
    ) -> std::result::Result<GenerateContentResponse, GenerationError> {
        let request_failed = |message: String| GenerationError::RequestFailed { stage, message };

        log::debug!("{}: POST {}", stage, self.endpoint(model));

        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| request_failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(request_failed(describe_http_error(status, &body)));
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| request_failed(format!("invalid response body ({})", e)))
    }
}
