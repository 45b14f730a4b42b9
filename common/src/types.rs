//! スケッチ生成の型定義
//!
//! CLIと生成処理で共有される型:
//! - DrawingStyle: スケッチのスタイル
//! - Language: 解説の出力言語
//! - ImagePayload: Base64化した画像（APIのinlineDataと同じ形）
//! - DrawingAnalysis: 解説（guidelines / tips）
//! - GeneratedResult: 最終出力（画像Data URI + 解説）

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// スケッチのスタイル
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawingStyle {
    /// 輪郭線のみ
    #[default]
    Simple,
    /// アタリ・構造線中心
    Anatomy,
    /// 陰影まで描き込む
    Detailed,
}

impl DrawingStyle {
    pub const ALL: [DrawingStyle; 3] = [
        DrawingStyle::Simple,
        DrawingStyle::Anatomy,
        DrawingStyle::Detailed,
    ];
}

impl FromStr for DrawingStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "simple" => Ok(DrawingStyle::Simple),
            "anatomy" => Ok(DrawingStyle::Anatomy),
            "detailed" => Ok(DrawingStyle::Detailed),
            _ => Err(format!(
                "Unknown style: {}. Use simple, anatomy, or detailed",
                s
            )),
        }
    }
}

impl fmt::Display for DrawingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawingStyle::Simple => write!(f, "simple"),
            DrawingStyle::Anatomy => write!(f, "anatomy"),
            DrawingStyle::Detailed => write!(f, "detailed"),
        }
    }
}

/// 解説の出力言語
///
/// モデルは英語で解説を返すため、`En` 以外は翻訳が必要
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    #[default]
    Fr,
}

impl Language {
    /// 言語コード
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
        }
    }

    /// 翻訳プロンプトで使う言語名
    pub fn name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Fr => "French",
        }
    }

    /// モデルの出力言語そのもの（翻訳不要）か
    pub fn is_native(&self) -> bool {
        matches!(self, Language::En)
    }

    pub fn result_title(&self) -> &'static str {
        match self {
            Language::En => "Your Drawing",
            Language::Fr => "Votre dessin",
        }
    }

    pub fn guidelines_title(&self) -> &'static str {
        match self {
            Language::En => "General Guidelines",
            Language::Fr => "Directives générales",
        }
    }

    pub fn tips_title(&self) -> &'static str {
        match self {
            Language::En => "Tips",
            Language::Fr => "Conseils",
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "fr" | "french" | "français" => Ok(Language::Fr),
            _ => Err(format!("Unknown language: {}. Use en or fr", s)),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Base64化した画像
///
/// Gemini APIの `inlineData` と同じJSON形
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePayload {
    pub mime_type: String,
    pub data: String,
}

impl ImagePayload {
    /// `data:<mime>;base64,<data>` 形式に変換
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// 描き方の解説
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawingAnalysis {
    pub guidelines: String,
    pub tips: String,
}

/// 生成結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedResult {
    /// 生成画像のData URI
    pub image: String,
    pub analysis: DrawingAnalysis,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_from_str() {
        assert_eq!("simple".parse::<DrawingStyle>(), Ok(DrawingStyle::Simple));
        assert_eq!("Anatomy".parse::<DrawingStyle>(), Ok(DrawingStyle::Anatomy));
        assert_eq!("DETAILED".parse::<DrawingStyle>(), Ok(DrawingStyle::Detailed));
        assert!("watercolor".parse::<DrawingStyle>().is_err());
    }

    #[test]
    fn test_style_display_parses_back() {
        for style in DrawingStyle::ALL {
            assert_eq!(style.to_string().parse::<DrawingStyle>(), Ok(style));
        }
    }

    #[test]
    fn test_language_from_str() {
        assert_eq!("en".parse::<Language>(), Ok(Language::En));
        assert_eq!("FR".parse::<Language>(), Ok(Language::Fr));
        assert!("de".parse::<Language>().is_err());
    }

    #[test]
    fn test_language_native() {
        assert!(Language::En.is_native());
        assert!(!Language::Fr.is_native());
        assert_eq!(Language::Fr.name(), "French");
    }

    #[test]
    fn test_language_serde_lowercase() {
        let json = serde_json::to_string(&Language::Fr).expect("シリアライズ失敗");
        assert_eq!(json, "\"fr\"");
        let lang: Language = serde_json::from_str("\"en\"").expect("デシリアライズ失敗");
        assert_eq!(lang, Language::En);
    }

    #[test]
    fn test_image_payload_data_uri() {
        let payload = ImagePayload {
            mime_type: "image/png".to_string(),
            data: "AAA=".to_string(),
        };
        assert_eq!(payload.to_data_uri(), "data:image/png;base64,AAA=");
    }

    #[test]
    fn test_image_payload_serialize_camel_case() {
        let payload = ImagePayload {
            mime_type: "image/jpeg".to_string(),
            data: "base64data".to_string(),
        };
        let json = serde_json::to_string(&payload).expect("シリアライズ失敗");
        assert_eq!(json, r#"{"mimeType":"image/jpeg","data":"base64data"}"#);
    }

    #[test]
    fn test_generated_result_serialize() {
        let result = GeneratedResult {
            image: "data:image/png;base64,AAA=".to_string(),
            analysis: DrawingAnalysis {
                guidelines: "* Keep it simple".to_string(),
                tips: "**Use** light strokes".to_string(),
            },
        };
        let json = serde_json::to_string(&result).expect("シリアライズ失敗");
        assert!(json.contains("\"image\":\"data:image/png;base64,AAA=\""));
        assert!(json.contains("\"guidelines\":\"* Keep it simple\""));
    }
}
