//! Normalize command implementation.

use anyhow::{Context, Result};
use clap::Args;
use gdocker_core::Normalizer;
use serde_json::Value;
use std::path::PathBuf;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Arguments for the normalize command.
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// JSON file to read (defaults to stdin)
    pub file: Option<PathBuf>,

    /// Reject documents nested deeper than this
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Executes the normalize command.
pub async fn execute(args: NormalizeArgs) -> Result<()> {
    let input = match &args.file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => read_input(tokio::io::stdin())
            .await
            .context("failed to read stdin")?,
    };

    let normalized = normalize_document(&input, args.max_depth)?;

    let output = if args.pretty {
        serde_json::to_string_pretty(&normalized)
    } else {
        serde_json::to_string(&normalized)
    }
    .context("failed to serialize output")?;

    println!("{output}");
    Ok(())
}

async fn read_input<R: AsyncRead + Unpin>(mut reader: R) -> std::io::Result<String> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf).await?;
    Ok(buf)
}

/// Parses `input` as JSON and normalizes its keys.
pub fn normalize_document(input: &str, max_depth: Option<usize>) -> Result<Value> {
    let value: Value = serde_json::from_str(input).context("input is not valid JSON")?;
    let normalizer = max_depth.map_or_else(Normalizer::new, Normalizer::with_max_depth);
    Ok(normalizer.normalize(value)?)
}
