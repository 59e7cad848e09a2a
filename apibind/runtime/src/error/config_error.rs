//! Client configuration errors.

use apibind_define::SchemaError;
use thiserror::Error;

/// Errors raised while building an [`ApiClient`](crate::ApiClient) or a
/// [`ReqwestTransport`](crate::ReqwestTransport).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither the builder nor the catalog supplied a base address.
    #[error("No base URL: the catalog '{title}' has no host and none was configured")]
    MissingBaseUrl {
        /// Title of the catalog.
        title: String,
    },

    /// The base address is not an absolute URL.
    #[error("Invalid base URL '{url}': {message}")]
    InvalidBaseUrl {
        /// The rejected address.
        url: String,
        /// Parser message.
        message: String,
    },

    /// The catalog failed validation, so no bindings were produced.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A default header name or value is invalid.
    #[error("Invalid header '{name}': {message}")]
    InvalidHeader {
        /// The header name as given.
        name: String,
        /// Why it was rejected.
        message: String,
    },

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
