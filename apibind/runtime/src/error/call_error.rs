//! Invocation errors.

use serde_json::Value;
use thiserror::Error;

use super::TransportError;

/// Why a [`PendingCall`](crate::PendingCall) was rejected.
#[derive(Debug, Error)]
pub enum CallError {
    /// A required parameter was absent. Raised before any cache lookup or
    /// transport attempt.
    #[error("Missing required parameter '{parameter}' for operation '{operation}'")]
    MissingParameter {
        /// Operation that was invoked.
        operation: String,
        /// The absent parameter.
        parameter: String,
    },

    /// No binding exists for the requested operation name.
    #[error("Unknown operation '{0}'")]
    UnknownOperation(String),

    /// The server answered outside the 2xx range.
    ///
    /// Status, headers and body are passed through as received; the body is
    /// decoded the same way a successful payload would be.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// The HTTP status code returned.
        status: u16,
        /// Response headers in received order.
        headers: Vec<(String, String)>,
        /// Decoded response body.
        body: Value,
    },

    /// The transport failed without producing a response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A resolved payload did not match the requested type.
    #[error("Failed to decode response of '{operation}': {source}")]
    Decode {
        /// Operation that was invoked.
        operation: String,
        /// Underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },
}

impl CallError {
    /// Returns the HTTP status code if the server answered.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Transport(TransportError::Request(e)) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the call was rejected locally, before any network
    /// attempt.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::MissingParameter { .. } | Self::UnknownOperation(_)
        )
    }
}
