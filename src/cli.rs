use clap::{Parser, Subcommand};
use sketch_ai_common::{DrawingStyle, Language};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sketch-ai")]
#[command(about = "参考画像から鉛筆スケッチと描き方の解説を生成", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// スケッチと解説を生成
    Generate {
        /// 参考画像（png/jpg/webp）
        #[arg(required = true)]
        image: PathBuf,

        /// スタイル (simple/anatomy/detailed)
        #[arg(short, long, default_value = "simple")]
        style: DrawingStyle,

        /// 追加の指示（例: "focus on the face"）
        #[arg(short, long, default_value = "")]
        instructions: String,

        /// 解説の言語 (en/fr)（省略時は設定の default_language）
        #[arg(short, long)]
        lang: Option<Language>,

        /// 出力フォルダ（デフォルト: カレント）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// レポート形式 (html/markdown/json)
        #[arg(short, long, default_value = "html")]
        report: ReportFormat,
    },

    /// プロンプトを表示（APIは呼ばない）
    Prompt {
        /// スタイル (simple/anatomy/detailed)
        #[arg(short, long, default_value = "simple")]
        style: DrawingStyle,

        /// 追加の指示
        #[arg(short, long, default_value = "")]
        instructions: String,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Html,
    Markdown,
    Json,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(ReportFormat::Html),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            "json" => Ok(ReportFormat::Json),
            _ => Err(format!("Unknown report format: {}. Use html, markdown, or json", s)),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Html => write!(f, "html"),
            ReportFormat::Markdown => write!(f, "markdown"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_format_from_str() {
        assert_eq!("html".parse::<ReportFormat>(), Ok(ReportFormat::Html));
        assert_eq!("MD".parse::<ReportFormat>(), Ok(ReportFormat::Markdown));
        assert_eq!("json".parse::<ReportFormat>(), Ok(ReportFormat::Json));
        assert!("pdf".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn test_parse_generate_defaults() {
        let cli = Cli::try_parse_from(["sketch-ai", "generate", "cat.png"]).unwrap();
        match cli.command {
            Commands::Generate { image, style, instructions, lang, output, report } => {
                assert_eq!(image, PathBuf::from("cat.png"));
                assert_eq!(style, DrawingStyle::Simple);
                assert_eq!(instructions, "");
                assert_eq!(lang, None);
                assert_eq!(output, None);
                assert_eq!(report, ReportFormat::Html);
            }
            _ => panic!("Generateとしてパースされるべき"),
        }
    }

    #[test]
    fn test_parse_generate_options() {
        let cli = Cli::try_parse_from([
            "sketch-ai", "-v", "generate", "cat.jpg", "-s", "anatomy", "-i", "the face", "-l", "en",
            "-r", "json",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Generate { style, instructions, lang, report, .. } => {
                assert_eq!(style, DrawingStyle::Anatomy);
                assert_eq!(instructions, "the face");
                assert_eq!(lang, Some(Language::En));
                assert_eq!(report, ReportFormat::Json);
            }
            _ => panic!("Generateとしてパースされるべき"),
        }
    }

    #[test]
    fn test_parse_invalid_style() {
        assert!(Cli::try_parse_from(["sketch-ai", "generate", "cat.png", "-s", "oil"]).is_err());
    }
}
