//! Catalog validation.
//!
//! Runs before any binding or source is generated so that schema defects
//! surface as a single [`SchemaError`] instead of broken call sites.
//!
//! ## Validation Checks
//!
//! - **Unique names**: no two operations share a name
//! - **Unique parameters**: no operation declares the same name + placement twice
//! - **Single payload**: at most one body parameter, never combined with form fields
//! - **Path coverage**: every `{placeholder}` has a declared path parameter and
//!   every declared path parameter appears in the template
//!
//! ## Examples
//!
//! ```
//! use apibind_define::{HttpVerb, OperationCatalog, OperationDescriptor};
//! use apibind_define::validation::validate_catalog;
//!
//! let catalog = OperationCatalog::new("Test")
//!     .operation(OperationDescriptor::new("getVersionsByVersion", HttpVerb::Get, "/versions/{version}", vec![]));
//!
//! // `{version}` has no declared path parameter.
//! assert!(validate_catalog(&catalog).is_err());
//! ```

use std::collections::HashSet;

use crate::error::SchemaError;
use crate::template::extract_path_params;
use crate::types::{OperationCatalog, OperationDescriptor, Placement};

/// Validates every operation of a catalog.
///
/// ## Errors
///
/// Returns the first [`SchemaError`] found, in catalog order.
pub fn validate_catalog(catalog: &OperationCatalog) -> Result<(), SchemaError> {
    let mut names = HashSet::new();
    for op in &catalog.operations {
        if !names.insert(op.name.as_str()) {
            return Err(SchemaError::DuplicateOperation(op.name.clone()));
        }
        validate_operation(op)?;
    }
    Ok(())
}

/// Validates a single operation.
///
/// ## Errors
///
/// See [`validate_catalog`].
pub fn validate_operation(op: &OperationDescriptor) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for param in &op.parameters {
        if !seen.insert((param.name.as_str(), param.placement)) {
            return Err(SchemaError::DuplicateParameter {
                operation: op.name.clone(),
                parameter: param.name.clone(),
            });
        }
    }

    let bodies = op.parameters_in(Placement::Body).count();
    if bodies > 1 {
        return Err(SchemaError::ConflictingBody {
            operation: op.name.clone(),
            message: format!("{bodies} body parameters declared, at most one is allowed"),
        });
    }
    if bodies == 1 && op.parameters_in(Placement::FormData).next().is_some() {
        return Err(SchemaError::ConflictingBody {
            operation: op.name.clone(),
            message: "body and formData parameters cannot be combined".to_string(),
        });
    }

    let declared: Vec<&str> = op
        .parameters_in(Placement::Path)
        .map(|p| p.name.as_str())
        .collect();
    let placeholders = extract_path_params(&op.path);

    if let Some(placeholder) = placeholders.iter().find(|p| !declared.contains(*p)) {
        return Err(SchemaError::UnresolvedPlaceholder {
            operation: op.name.clone(),
            path: op.path.clone(),
            placeholder: placeholder.to_string(),
        });
    }
    if let Some(parameter) = declared.iter().find(|p| !placeholders.contains(*p)) {
        return Err(SchemaError::UnusedPathParameter {
            operation: op.name.clone(),
            path: op.path.clone(),
            parameter: parameter.to_string(),
        });
    }

    Ok(())
}
