//! エラー型定義
//!
//! 生成処理の失敗はすべて `GenerationError` のいずれかのバリアントになる。
//! Displayの文字列はそのままUI（CLI）に表示される。

use std::fmt;
use thiserror::Error;

/// リモート呼び出しの段階
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// 画像生成（スケッチ）
    Image,
    /// 解説生成（guidelines / tips）
    Analysis,
    /// 翻訳
    Translation,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Image => write!(f, "Image generation"),
            Stage::Analysis => write!(f, "Analysis generation"),
            Stage::Translation => write!(f, "Translation"),
        }
    }
}

/// 生成処理のエラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error("Failed to read the uploaded image: {0}")]
    Encoding(String),

    #[error("{stage} blocked. Reason: {reason}.")]
    Blocked { stage: Stage, reason: String },

    #[error("{stage} failed: no response candidate was received from the model.")]
    NoCandidate { stage: Stage },

    #[error("{stage} failed. Finish reason: {reason}.")]
    AbnormalFinish { stage: Stage, reason: String },

    #[error("Image generation failed: the model did not return any image data.")]
    MissingImageData,

    #[error("Analysis generation failed: no text was returned from the model.")]
    EmptyAnalysis,

    #[error("Failed to parse drawing analysis from the model: {0}")]
    MalformedAnalysis(String),

    #[error("Translation failed: no text was returned from the model.")]
    EmptyTranslation,

    #[error("{stage} request failed: {message}")]
    RequestFailed { stage: Stage, message: String },
}

impl GenerationError {
    /// 段階を持つバリアントならその段階を返す
    pub fn stage(&self) -> Option<Stage> {
        match self {
            GenerationError::Blocked { stage, .. }
            | GenerationError::NoCandidate { stage }
            | GenerationError::AbnormalFinish { stage, .. }
            | GenerationError::RequestFailed { stage, .. } => Some(*stage),
            GenerationError::MissingImageData => Some(Stage::Image),
            GenerationError::EmptyAnalysis | GenerationError::MalformedAnalysis(_) => {
                Some(Stage::Analysis)
            }
            GenerationError::EmptyTranslation => Some(Stage::Translation),
            GenerationError::Encoding(_) => None,
        }
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, GenerationError>;
