//! Version command implementation.

use crate::config::Config;
use anyhow::Result;
use gdocker_client::DockerClient;

/// Executes the version command.
pub async fn execute(config: &Config) -> Result<()> {
    println!("gdocker version {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Platform: {} / {}", std::env::consts::OS, std::env::consts::ARCH);

    let client = DockerClient::with_socket(&config.docker.socket_path)
        .with_timeout(config.docker.timeout());
    match client.get("/version").await {
        Ok(version) => println!(
            "Docker:   {}",
            version.get("Version").and_then(|v| v.as_str()).unwrap_or("unknown")
        ),
        Err(e) => {
            tracing::debug!("Docker version unavailable: {}", e);
            println!("Docker:   not running ({})", client.socket_path().display());
        }
    }

    Ok(())
}
