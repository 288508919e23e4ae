//! Fact command implementation.
//!
//! Prints the fact in the executable external-fact format: a JSON object
//! keyed by the fact name. An unreachable daemon still yields a document.

use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use gdocker_client::DockerClient;
use gdocker_core::{compute_facts, DockerFacts};
use serde_json::{Map, Value};

/// Arguments for the fact command.
#[derive(Args, Debug)]
pub struct FactArgs {
    /// Name to report the fact under (overrides configuration)
    #[arg(long)]
    pub name: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Executes the fact command.
pub async fn execute(args: FactArgs, config: &Config) -> Result<()> {
    let client = DockerClient::with_socket(&config.docker.socket_path)
        .with_timeout(config.docker.timeout());

    let facts = compute_facts(&client).await;
    tracing::debug!(
        installed = facts.installed,
        networks = facts.networks.len(),
        "collected docker fact"
    );

    let name = args.name.unwrap_or_else(|| config.fact.name.clone());
    let document = fact_document(&name, &facts)?;

    let output = if args.pretty {
        serde_json::to_string_pretty(&document)
    } else {
        serde_json::to_string(&document)
    }
    .context("failed to serialize fact")?;

    println!("{output}");
    Ok(())
}

/// Wraps the facts in a single-key object named after the fact.
pub fn fact_document(name: &str, facts: &DockerFacts) -> Result<Value> {
    let mut document = Map::new();
    document.insert(
        name.to_string(),
        serde_json::to_value(facts).context("failed to serialize fact")?,
    );
    Ok(Value::Object(document))
}
