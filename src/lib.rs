//! Sketch AI
//!
//! 参考画像から鉛筆スケッチと描き方の解説（guidelines / tips）を生成する。
//! 画像生成・解説生成はGemini APIに任せ、ここではプロンプト生成・
//! レスポンス検証・並行呼び出し・翻訳を行う

pub mod cli;
pub mod config;
pub mod encoder;
pub mod error;
pub mod export;
pub mod gemini;
pub mod generator;
pub mod progress;
pub mod translator;

pub use encoder::{encode, ImageFile};
pub use gemini::{GeminiClient, GenerativeBackend};
pub use generator::{GenerationModels, SketchGenerator};
pub use translator::Translator;
