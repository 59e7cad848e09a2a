//! Transport-level errors.

use thiserror::Error;

/// Errors reported by a transport when no HTTP response was obtained.
///
/// A response with a non-success status is not a transport error; the
/// binding turns it into [`CallError::HttpStatus`](crate::CallError::HttpStatus).
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed due to a network or protocol error.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Request exceeded its timeout.
    #[error("Request timeout after {duration_ms}ms")]
    Timeout {
        /// The timeout duration in milliseconds.
        duration_ms: u64,
    },

    /// Failed to establish a connection to the server.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The request could not be expressed on the wire (bad header, bad URL).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl TransportError {
    /// Returns `true` if a caller-side retry policy could reasonably retry.
    ///
    /// Bindings never retry on their own.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Connection(_) => true,
            Self::Request(e) => e.is_timeout() || e.is_connect(),
            Self::InvalidRequest(_) => false,
        }
    }
}
