//! gdocker CLI - Docker daemon facts for configuration management.

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::{Cli, Commands};
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    // Logs go to stderr; stdout carries the JSON document.
    let filter = if cli.debug {
        "gdocker=debug".to_string()
    } else {
        format!("gdocker={}", config.logging.level)
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Fact(args) => commands::fact::execute(args, &config).await,
        Commands::Normalize(args) => commands::normalize::execute(args).await,
        Commands::Version => commands::version::execute(&config).await,
    }
}

/// Loads configuration and applies command-line overrides.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => Config::load().context("failed to load configuration")?,
    };

    if let Some(socket) = &cli.socket {
        config.docker.socket_path.clone_from(socket);
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.docker.timeout_ms = timeout_ms;
    }

    Ok(config)
}
