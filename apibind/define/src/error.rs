//! Error types for schema loading and catalog validation.

use thiserror::Error;

/// A malformed or incomplete API description.
///
/// Schema errors are fatal: a catalog is never produced from a document
/// that fails to load or validate.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The document is not valid JSON.
    #[error("Failed to parse schema as JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The document is not valid YAML.
    #[error("Failed to parse schema as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A required schema field is absent or has the wrong shape.
    #[error("Invalid schema at '{location}': {message}")]
    Malformed {
        /// JSON-pointer-like location of the offending node.
        location: String,
        /// What was wrong.
        message: String,
    },

    /// The document declares a dialect other than Swagger 2.0.
    #[error("Unsupported schema version '{0}' (only Swagger 2.0 is supported)")]
    UnsupportedVersion(String),

    /// A parameter declares an unknown `in` location.
    #[error("Operation '{operation}': parameter '{parameter}' has unknown location '{location}'")]
    UnknownPlacement {
        /// Operation name.
        operation: String,
        /// Parameter name.
        parameter: String,
        /// The unrecognized `in` value.
        location: String,
    },

    /// A `$ref` does not point at a known shared parameter.
    #[error("Unresolvable parameter reference '{0}'")]
    UnresolvedReference(String),

    /// Two operations share a name.
    #[error("Duplicate operation name '{0}'")]
    DuplicateOperation(String),

    /// An operation declares the same parameter twice.
    #[error("Operation '{operation}': duplicate parameter '{parameter}'")]
    DuplicateParameter {
        /// Operation name.
        operation: String,
        /// Parameter name.
        parameter: String,
    },

    /// An operation declares more than one request payload.
    #[error("Operation '{operation}': {message}")]
    ConflictingBody {
        /// Operation name.
        operation: String,
        /// Which payload rule was broken.
        message: String,
    },

    /// A `{placeholder}` in the path template has no declared path parameter.
    #[error(
        "Operation '{operation}': path placeholder '{{{placeholder}}}' in '{path}' is not declared as a path parameter"
    )]
    UnresolvedPlaceholder {
        /// Operation name.
        operation: String,
        /// Path template.
        path: String,
        /// The unmatched placeholder name.
        placeholder: String,
    },

    /// A declared path parameter does not appear in the path template.
    #[error("Operation '{operation}': path parameter '{parameter}' does not appear in '{path}'")]
    UnusedPathParameter {
        /// Operation name.
        operation: String,
        /// Path template.
        path: String,
        /// Parameter name.
        parameter: String,
    },
}

impl SchemaError {
    pub(crate) fn malformed(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Malformed {
            location: location.into(),
            message: message.into(),
        }
    }
}
