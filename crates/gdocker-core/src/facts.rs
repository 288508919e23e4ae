//! Docker daemon fact collection.
//!
//! The fact is recomputed from scratch on every call; caching is left to the
//! host agent. A daemon that cannot be reached is not an error for the host:
//! [`compute_facts`] reports it as not installed.

use crate::error::Result;
use crate::normalize::normalize_tree;
use async_trait::async_trait;
use ipnetwork::IpNetwork;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Docker Engine API path listing networks.
pub const NETWORKS_PATH: &str = "/networks";

/// Docker Engine API path reporting the daemon version.
pub const VERSION_PATH: &str = "/version";

/// Read access to the Docker Engine API.
#[async_trait]
pub trait EngineApi: Send + Sync {
    /// Performs a GET request and decodes the JSON body.
    async fn get_json(&self, path: &str) -> Result<Value>;
}

/// State of the local Docker daemon as reported to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockerFacts {
    /// Networks with snake_case keys, sorted by `id`.
    pub networks: Vec<Value>,
    /// Daemon version, e.g. `24.0.7`.
    pub version: Option<String>,
    /// Whether the daemon answered.
    pub installed: bool,
}

impl DockerFacts {
    /// Record reported when the daemon cannot be queried.
    #[must_use]
    pub const fn degraded() -> Self {
        Self {
            networks: Vec::new(),
            version: None,
            installed: false,
        }
    }

    /// Looks up a network by its `name`.
    #[must_use]
    pub fn network(&self, name: &str) -> Option<&Value> {
        self.networks
            .iter()
            .find(|n| n.get("name").and_then(Value::as_str) == Some(name))
    }

    /// Returns every IPAM subnet configured on the reported networks.
    ///
    /// Entries that do not parse as CIDR blocks are skipped.
    #[must_use]
    pub fn subnets(&self) -> Vec<IpNetwork> {
        self.networks
            .iter()
            .filter_map(|n| n.pointer("/ipam/config").and_then(Value::as_array))
            .flatten()
            .filter_map(|c| c.get("subnet").and_then(Value::as_str))
            .filter_map(|s| s.parse().ok())
            .collect()
    }
}

impl Default for DockerFacts {
    fn default() -> Self {
        Self::degraded()
    }
}

/// Collects the Docker fact, falling back to [`DockerFacts::degraded`].
pub async fn compute_facts<A: EngineApi + ?Sized>(api: &A) -> DockerFacts {
    match try_compute_facts(api).await {
        Ok(facts) => facts,
        Err(e) => {
            tracing::debug!("Failed to load api data as fact: {}", e);
            DockerFacts::degraded()
        }
    }
}

/// Collects the Docker fact.
///
/// # Errors
///
/// Returns the first transport or decode error from the API.
pub async fn try_compute_facts<A: EngineApi + ?Sized>(api: &A) -> Result<DockerFacts> {
    let networks = collect_networks(api.get_json(NETWORKS_PATH).await?);

    let version = api
        .get_json(VERSION_PATH)
        .await?
        .get("Version")
        .and_then(Value::as_str)
        .map(str::to_owned);

    Ok(DockerFacts {
        networks,
        version,
        installed: true,
    })
}

/// Normalizes the network listing and sorts it by `id`.
///
/// Networks without a string `id` sort first instead of failing the whole fact.
fn collect_networks(body: Value) -> Vec<Value> {
    let Value::Array(items) = body else {
        tracing::debug!("Network listing is not an array, reporting no networks");
        return Vec::new();
    };

    let mut networks: Vec<Value> = items.into_iter().map(normalize_tree).collect();
    networks.sort_by(|a, b| network_id(a).cmp(&network_id(b)));
    networks
}

fn network_id(network: &Value) -> Option<&str> {
    network.get("id").and_then(Value::as_str)
}
