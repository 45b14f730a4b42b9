use clap::Parser;
use indicatif::MultiProgress;
use sketch_ai::progress::{spinner, ProgressLogWriter};
use sketch_ai::{cli, config, error, export, GeminiClient, ImageFile, SketchGenerator};
use sketch_ai_common::{build_analysis_prompt, build_image_prompt};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use std::time::Duration;

fn init_logger(verbose: bool, progress: &MultiProgress) {
    let default_level = if verbose { "debug" } else { "info" };
    let writer = ProgressLogWriter::new(progress.clone(), std::io::stderr());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .target(env_logger::Target::Pipe(Box::new(writer)))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let progress = MultiProgress::new();
    init_logger(cli.verbose, &progress);

    if let Err(e) = run(cli, &progress).await {
        eprintln!("エラー: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, progress: &MultiProgress) -> Result<()> {
    let config = Config::load()?;

    match cli.command {
        Commands::Generate { image, style, instructions, lang, output, report } => {
            println!("✏️  sketch-ai - スケッチ生成\n");

            if !image.exists() {
                return Err(error::SketchAiError::FileNotFound(image.display().to_string()));
            }

            let language = lang.unwrap_or(config.default_language);
            let image_file = ImageFile::from_path(&image)?;
            let client = GeminiClient::new(
                &config.get_api_key()?,
                Duration::from_secs(config.timeout_seconds),
            )?;
            let generator = SketchGenerator::new(client, config.models());

            // 1. 生成
            println!("[1/2] 生成中... (スタイル: {}, 言語: {})", style, language);
            if !instructions.trim().is_empty() {
                println!("  指示: {}", instructions);
            }
            let bar = spinner(progress, "Gemini APIを呼び出し中");
            let result = generator
                .generate(&image_file, style, &instructions, language)
                .await;
            bar.finish_and_clear();
            let result = result?;
            println!("✔ 生成完了\n");

            // 2. 保存
            println!("[2/2] 保存中...");
            let output_dir = output.unwrap_or_else(|| std::path::PathBuf::from("."));
            let stem = format!("sketch-{}", chrono::Local::now().format("%Y%m%d-%H%M%S"));

            let image_path = export::write_image(&result.image, &output_dir, &stem)?;
            println!("✔ 画像出力: {}", image_path.display());

            let report_path =
                export::write_report(&result, language, report, &image_path, &output_dir, &stem)?;
            println!("✔ レポート出力 ({}): {}", report, report_path.display());

            println!("\n✅ 完了");
        }

        Commands::Prompt { style, instructions } => {
            println!("=== 画像生成プロンプト ({}) ===\n", style);
            println!("{}\n", build_image_prompt(style, &instructions));
            println!("=== 解説プロンプト ===\n");
            println!("{}", build_analysis_prompt(&instructions));
        }

        Commands::Config { set_api_key, show } => {
            let mut config = config;

            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ APIキーを設定しました");
            }

            if show {
                println!("設定:");
                println!("  画像生成モデル: {}", config.image_model);
                println!("  解説モデル: {}", config.analysis_model);
                println!("  翻訳モデル: {}", config.translation_model);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  デフォルト言語: {}", config.default_language);
                println!("  APIキー: {}", if config.get_api_key().is_ok() { "設定済み" } else { "未設定" });
            }
        }
    }

    Ok(())
}
