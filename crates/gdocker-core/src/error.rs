//! Error types for normalization and Docker API transport.

use thiserror::Error;

/// Result type alias for transport operations.
pub type Result<T> = std::result::Result<T, TransportError>;

/// Errors that can occur while normalizing a value tree.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The input has no JSON node representation.
    #[error("invalid node kind: {0}")]
    InvalidNodeKind(String),

    /// The input nests deeper than the configured limit.
    #[error("value nested deeper than {limit} levels")]
    DepthExceeded {
        /// Maximum nesting depth that was allowed.
        limit: usize,
    },
}

/// Errors that can occur while talking to the Docker Engine API.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The socket could not be connected.
    #[error("connection refused: {0}")]
    ConnectionRefused(String),

    /// The request did not complete in time.
    #[error("timeout after {0} ms")]
    Timeout(u64),

    /// HTTP protocol error.
    #[error("protocol error: {0}")]
    Http(String),

    /// The daemon answered with a non-success status.
    #[error("daemon returned error {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, lossily decoded.
        body: String,
    },

    /// The response body was not valid JSON.
    #[error("failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl TransportError {
    /// Returns true if the daemon could not be reached at all.
    #[must_use]
    pub const fn is_unreachable(&self) -> bool {
        matches!(self, Self::ConnectionRefused(_) | Self::Timeout(_))
    }
}
