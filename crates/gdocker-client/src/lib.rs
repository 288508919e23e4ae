//! # gdocker-client
//!
//! Docker Engine API client over a Unix domain socket.
//!
//! Each request opens its own connection, performs an HTTP/1.1 exchange with
//! hyper and closes it again. The client implements
//! [`gdocker_core::EngineApi`], so it can be handed straight to
//! [`gdocker_core::compute_facts`]:
//!
//! ```rust,no_run
//! use gdocker_client::DockerClient;
//!
//! # async fn run() {
//! let client = DockerClient::new();
//! let facts = gdocker_core::compute_facts(&client).await;
//! println!("docker installed: {}", facts.installed);
//! # }
//! ```

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;

pub use client::{DockerClient, DEFAULT_SOCKET_PATH, DEFAULT_TIMEOUT};
