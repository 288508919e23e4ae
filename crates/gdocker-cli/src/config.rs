//! Configuration management.
//!
//! gdocker configuration is loaded from multiple sources with the following priority:
//!
//! 1. Command-line flags
//! 2. Environment variables (GDOCKER_*)
//! 3. User configuration file (~/.config/gdocker/config.toml)
//! 4. System configuration file (/etc/gdocker/config.toml)
//! 5. Default values
//!
//! ## Example Configuration File
//!
//! ```toml
//! [docker]
//! socket_path = "/var/run/docker.sock"
//! timeout_ms = 5000
//!
//! [fact]
//! name = "g_docker"
//!
//! [logging]
//! level = "info"
//! ```
//!
//! Nested keys are reached from the environment with a double underscore,
//! e.g. `GDOCKER_DOCKER__SOCKET_PATH=/run/docker.sock`.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "GDOCKER_";

/// gdocker configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Docker API configuration.
    pub docker: DockerConfig,
    /// Fact output configuration.
    pub fact: FactConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl Config {
    /// Loads configuration from the system and user files and environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration source cannot be parsed.
    pub fn load() -> Result<Self, figment::Error> {
        let mut figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(system_config_path()));
        if let Some(user) = user_config_path() {
            figment = figment.merge(Toml::file(user));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__")).extract()
    }

    /// Loads configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
    }
}

/// Docker API configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockerConfig {
    /// Unix socket path of the Docker daemon.
    pub socket_path: PathBuf,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl DockerConfig {
    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            socket_path: PathBuf::from(gdocker_client::DEFAULT_SOCKET_PATH),
            timeout_ms: 5_000,
        }
    }
}

/// Fact output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactConfig {
    /// Name the fact is reported under.
    pub name: String,
}

impl Default for FactConfig {
    fn default() -> Self {
        Self {
            name: gdocker_core::FACT_NAME.to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

fn system_config_path() -> PathBuf {
    PathBuf::from("/etc/gdocker/config.toml")
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gdocker").join("config.toml"))
}
