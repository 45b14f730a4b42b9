//! Sketch AI Common Library
//!
//! 生成処理とCLIで共有される型・プロンプト・レスポンス検証

pub mod types;
pub mod error;
pub mod prompts;
pub mod gemini;
pub mod parser;

pub use types::{DrawingAnalysis, DrawingStyle, GeneratedResult, ImagePayload, Language};
pub use error::{GenerationError, Result, Stage};
pub use prompts::{build_analysis_prompt, build_image_prompt, build_translation_prompt};
pub use gemini::{GenerateContentRequest, GenerateContentResponse};
pub use parser::{
    extract_json, parse_analysis_json, parse_analysis_response, parse_image_response,
    parse_translation_response, split_data_uri,
};
