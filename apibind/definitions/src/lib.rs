//! apibind API Definitions
//!
//! This crate ships API descriptions as embedded Swagger 2.0 documents and
//! loads them with `apibind-define`. Each API is organized in its own module.
//!
//! ## Available APIs
//!
//! - [`rules`] - Rules API (demand partners, supply partners, versions, rules)
//!
//! ## Examples
//!
//! ```
//! use apibind_definitions::rules::define_rules_api;
//!
//! let catalog = define_rules_api().unwrap();
//! assert_eq!(catalog.title, "Rules API");
//! assert_eq!(catalog.operations.len(), 20);
//! ```

pub mod rules;

use apibind_define::{OperationCatalog, SchemaError};

pub use rules::define_rules_api;

/// Names accepted by [`by_name`].
pub const AVAILABLE: &[&str] = &["rules"];

/// Loads a built-in definition by its short name.
///
/// Returns `None` for unknown names.
///
/// ## Examples
///
/// ```
/// use apibind_definitions::by_name;
///
/// assert!(by_name("rules").is_some());
/// assert!(by_name("nope").is_none());
/// ```
pub fn by_name(name: &str) -> Option<Result<OperationCatalog, SchemaError>> {
    match name {
        "rules" => Some(define_rules_api()),
        _ => None,
    }
}
