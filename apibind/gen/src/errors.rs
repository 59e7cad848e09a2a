//! Error types for the apibind generator.

use apibind_define::SchemaError;
use thiserror::Error;

/// Errors that can occur during code generation.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The API description is malformed or inconsistent.
    #[error("Invalid API description: {0}")]
    Schema(#[from] SchemaError),

    /// Failed to generate code
    #[error("Code generation failed: {0}")]
    CodeGenError(String),

    /// Failed to read the schema file
    #[error("Failed to read schema file '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write output file
    #[error("Failed to write output file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Two schema names map onto the same generated Rust identifier.
    ///
    /// Parameters `dp-id` and `dpId` of one operation both become the field
    /// `dp_id`; operations `getItems` and `get_items` both become the method
    /// `get_items`.
    #[error(
        "Naming collision in '{operation}': '{identifier}' is already generated for {existing}"
    )]
    NamingCollision {
        /// The operation being generated when the collision was found.
        operation: String,
        /// The Rust identifier both names map to.
        identifier: String,
        /// What already owns the identifier.
        existing: String,
    },

    /// Invalid params suffix configuration.
    ///
    /// The suffix must be alphanumeric (letters and numbers only) to ensure
    /// valid Rust identifier generation.
    #[error("Invalid params suffix '{suffix}': {reason}")]
    InvalidParamsSuffix {
        /// The invalid suffix value.
        suffix: String,
        /// Explanation of why the suffix is invalid.
        reason: String,
    },
}
