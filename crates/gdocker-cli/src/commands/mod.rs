//! CLI command implementations.
//!
//! - `fact`: query the Docker daemon and print the fact as JSON
//! - `normalize`: rewrite the keys of a JSON document as snake_case
//! - `version`: show version information

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod fact;
pub mod normalize;
pub mod version;

/// gdocker - Docker daemon facts for configuration management
#[derive(Parser)]
#[command(name = "gdocker")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Unix socket path of the Docker daemon
    #[arg(long, global = true, env = "DOCKER_SOCKET")]
    pub socket: Option<PathBuf>,

    /// Request timeout in milliseconds
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Configuration file (defaults to /etc/gdocker and ~/.config/gdocker)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Print the Docker fact as JSON
    Fact(fact::FactArgs),

    /// Normalize the keys of a JSON document
    Normalize(normalize::NormalizeArgs),

    /// Show version information
    Version,
}
