//! Parabox - file inbox captures into a PARA vault.

use anyhow::{Context, Result};
use clap::Parser;
use parabox_ingest::{provider, IngestConfig, IngestController, Provider};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Watch the vault inbox and file every capture into PARA folders.
#[derive(Debug, Parser)]
#[command(name = "parabox")]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file (TOML); defaults apply when omitted
    #[arg(short, long, env = "PARABOX_CONFIG")]
    config: Option<PathBuf>,

    /// Vault root, overriding the configuration
    #[arg(short, long, env = "PARABOX_VAULT")]
    vault: Option<PathBuf>,

    /// Print the Gemini models available to the API key and exit
    #[arg(long)]
    list_models: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();

    if let Err(e) = run(Args::parse()).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => IngestConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => IngestConfig::default(),
    };
    if let Some(vault) = args.vault {
        config.vault_root = vault;
        config.validate().context("invalid configuration")?;
    }

    if args.list_models {
        return list_models(&config).await;
    }

    let provider = Provider::from_config(&config.llm, config.classifier.request_timeout())
        .context("setting up the LLM provider")?;

    let controller = IngestController::new(&config, provider);
    controller
        .run()
        .await
        .with_context(|| format!("watching {}", controller.layout().inbox().display()))?;

    tracing::info!("Stopped");
    Ok(())
}

async fn list_models(config: &IngestConfig) -> Result<()> {
    let gemini = provider::gemini(&config.llm, config.classifier.request_timeout())
        .context("setting up the Gemini client")?;

    for model in gemini.list_models().await? {
        println!(
            "{}  [{}]",
            model.name,
            model.supported_generation_methods.join(", ")
        );
    }
    Ok(())
}
