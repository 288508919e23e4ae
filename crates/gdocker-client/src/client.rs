//! Docker Engine client.
//!
//! Provides an HTTP client for the Docker Engine API over its Unix socket.

use async_trait::async_trait;
use gdocker_core::{EngineApi, Result, TransportError};
use http_body_util::{BodyExt, Empty};
use hyper::body::Bytes;
use hyper::{Method, Request};
use hyper_util::rt::TokioIo;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::net::UnixStream;

/// Default socket path for the Docker daemon.
pub const DEFAULT_SOCKET_PATH: &str = "/var/run/docker.sock";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for the Docker Engine API.
#[derive(Debug, Clone)]
pub struct DockerClient {
    socket_path: PathBuf,
    timeout: Duration,
}

impl DockerClient {
    /// Creates a new client with the default socket path.
    #[must_use]
    pub fn new() -> Self {
        Self::with_socket(DEFAULT_SOCKET_PATH)
    }

    /// Creates a new client with a custom socket path.
    pub fn with_socket(path: impl AsRef<Path>) -> Self {
        Self {
            socket_path: path.as_ref().to_path_buf(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the socket path.
    #[must_use]
    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Checks if the daemon is running.
    pub async fn is_running(&self) -> bool {
        self.ping().await.is_ok()
    }

    /// Pings the daemon. `/_ping` answers with plain text.
    ///
    /// # Errors
    ///
    /// Returns an error if the daemon cannot be reached or answers with a
    /// non-success status.
    pub async fn ping(&self) -> Result<()> {
        self.get_raw("/_ping").await.map(|_| ())
    }

    /// Performs a GET request and decodes the JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not JSON.
    pub async fn get(&self, path: &str) -> Result<Value> {
        let body = self.get_raw(path).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Performs a GET request returning raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or times out.
    pub async fn get_raw(&self, path: &str) -> Result<Bytes> {
        let timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
        tokio::time::timeout(self.timeout, self.request(Method::GET, path))
            .await
            .map_err(|_| TransportError::Timeout(timeout_ms))?
    }

    /// Performs an HTTP request to the daemon.
    async fn request(&self, method: Method, path: &str) -> Result<Bytes> {
        tracing::debug!(socket = %self.socket_path.display(), %method, path, "docker api request");

        // Connect to Unix socket
        let stream = UnixStream::connect(&self.socket_path).await.map_err(|e| {
            TransportError::ConnectionRefused(format!(
                "failed to connect to daemon at {}: {}",
                self.socket_path.display(),
                e
            ))
        })?;

        let io = TokioIo::new(stream);

        // Create HTTP connection
        let (mut sender, conn) = hyper::client::conn::http1::handshake(io)
            .await
            .map_err(|e| TransportError::Http(format!("HTTP handshake failed: {e}")))?;

        // Spawn connection handler
        tokio::spawn(async move {
            if let Err(e) = conn.await {
                tracing::debug!("Connection closed: {}", e);
            }
        });

        let request = Request::builder()
            .method(method)
            .uri(format!("http://localhost{path}"))
            .header("Host", "localhost")
            .body(Empty::<Bytes>::new())
            .map_err(|e| TransportError::Http(format!("failed to build request: {e}")))?;

        let response = sender
            .send_request(request)
            .await
            .map_err(|e| TransportError::Http(format!("failed to send request: {e}")))?;

        let status = response.status();

        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| TransportError::Http(format!("failed to read response: {e}")))?
            .to_bytes();

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(body)
    }
}

impl Default for DockerClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EngineApi for DockerClient {
    async fn get_json(&self, path: &str) -> Result<Value> {
        self.get(path).await
    }
}
