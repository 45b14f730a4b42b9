use sketch_ai_common::GenerationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SketchAiError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。`sketch-ai config --set-api-key YOUR_KEY` で設定するか、GEMINI_API_KEY を指定してください")]
    MissingApiKey,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("{0}")]
    Generation(#[from] GenerationError),

    #[error("HTTPクライアントの初期化に失敗: {0}")]
    HttpClient(String),

    #[error("画像データのデコードに失敗: {0}")]
    ImageDecode(String),

    #[error("レポート出力エラー: {0}")]
    Export(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SketchAiError>;
