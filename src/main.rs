use anyhow::Context;
use clap::Parser;
use navtree::utils::logger::{self, LogFormat};
use navtree::utils::validation::Validate;
use navtree::{CliConfig, DocumentPipeline, LocalStorage, NavEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    let log_format = if config.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(log_format, config.verbose)?;

    tracing::info!("Starting navtree");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    let cwd = std::env::current_dir().context("cannot resolve working directory")?;
    let input = LocalStorage::new(cwd.to_string_lossy().into_owned());
    let output = LocalStorage::new(config.output_path.clone());
    let pipeline = DocumentPipeline::new(input, output, config);
    let engine = NavEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            println!("✅ Menu written to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ navtree failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
