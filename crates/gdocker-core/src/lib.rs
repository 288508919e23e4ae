//! # gdocker-core
//!
//! Docker daemon fact model for configuration-management hosts.
//!
//! Docker Engine answers with PascalCase JSON. The fact exposes the same
//! data with snake_case keys:
//!
//! ```text
//! Docker Engine ──► /networks, /version ──► normalize_tree ──► DockerFacts
//!   (Unix socket)        (EngineApi)          (snake_case)      (host fact)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use gdocker_core::normalize_tree;
//! use serde_json::json;
//!
//! let raw = json!({"Id": "abc", "NetworkSettings": {"IPAddress": "10.0.0.1"}});
//! assert_eq!(
//!     normalize_tree(raw),
//!     json!({"id": "abc", "network_settings": {"ip_address": "10.0.0.1"}})
//! );
//! ```

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod facts;
pub mod normalize;

pub use error::{NormalizeError, Result, TransportError};
pub use facts::{compute_facts, try_compute_facts, DockerFacts, EngineApi};
pub use ipnetwork::IpNetwork;
pub use normalize::{normalize_key, normalize_serialize, normalize_tree, Normalizer};

/// Name under which the fact is reported.
pub const FACT_NAME: &str = "g_docker";
