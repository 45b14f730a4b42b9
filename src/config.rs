use crate::error::{Result, SketchAiError};
use crate::generator::GenerationModels;
use serde::{Deserialize, Serialize};
use sketch_ai_common::Language;
use std::path::{Path, PathBuf};

/// APIキーを探す環境変数（先頭から優先）
const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub image_model: String,
    pub analysis_model: String,
    pub translation_model: String,
    pub timeout_seconds: u64,
    pub default_language: Language,
}

impl Default for Config {
    fn default() -> Self {
        let models = GenerationModels::default();
        Self {
            api_key: None,
            image_model: models.image,
            analysis_model: models.analysis,
            translation_model: models.translation,
            timeout_seconds: 120,
            default_language: Language::Fr,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SketchAiError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("sketch-ai").join("config.json"))
    }

    pub fn get_api_key(&self) -> Result<String> {
        self.resolve_api_key(|name| std::env::var(name).ok())
    }

    /// 環境変数 → 設定ファイルの順でAPIキーを解決
    fn resolve_api_key(&self, env: impl Fn(&str) -> Option<String>) -> Result<String> {
        API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| env(name))
            .chain(self.api_key.clone())
            .find(|key| !key.trim().is_empty())
            .ok_or(SketchAiError::MissingApiKey)
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        self.api_key = Some(key);
        self.save()
    }

    pub fn models(&self) -> GenerationModels {
        GenerationModels {
            image: self.image_model.clone(),
            analysis: self.analysis_model.clone(),
            translation: self.translation_model.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.image_model, "gemini-2.5-flash-image");
        assert_eq!(config.analysis_model, "gemini-2.5-pro");
        assert_eq!(config.translation_model, "gemini-2.5-flash");
        assert_eq!(config.default_language, Language::Fr);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let dir = tempdir().expect("Failed to create temp dir");
        let config = Config::load_from(&dir.path().join("none.json")).unwrap();
        assert_eq!(config.timeout_seconds, 120);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            api_key: Some("test-key".to_string()),
            default_language: Language::En,
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api_key.as_deref(), Some("test-key"));
        assert_eq!(loaded.default_language, Language::En);
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"default_language": "en"}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.default_language, Language::En);
        assert_eq!(config.analysis_model, "gemini-2.5-pro");
    }

    #[test]
    fn test_api_key_env_has_priority() {
        let config = Config {
            api_key: Some("from-file".to_string()),
            ..Default::default()
        };
        let key = config
            .resolve_api_key(|name| (name == "GEMINI_API_KEY").then(|| "from-env".to_string()))
            .unwrap();
        assert_eq!(key, "from-env");
    }

    #[test]
    fn test_api_key_fallback_env() {
        let config = Config::default();
        let key = config
            .resolve_api_key(|name| (name == "API_KEY").then(|| "legacy".to_string()))
            .unwrap();
        assert_eq!(key, "legacy");
    }

    #[test]
    fn test_api_key_from_file() {
        let config = Config {
            api_key: Some("from-file".to_string()),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key(|_| None).unwrap(), "from-file");
    }

    #[test]
    fn test_api_key_missing() {
        let config = Config {
            api_key: Some("  ".to_string()),
            ..Default::default()
        };
        let result = config.resolve_api_key(|_| Some(String::new()));
        assert!(matches!(result, Err(SketchAiError::MissingApiKey)));
    }
}
