//! Convenient re-exports for working with operation catalogs.
//!
//! ## Examples
//!
//! ```
//! use apibind_define::prelude::*;
//!
//! let catalog = OperationCatalog::new("My API")
//!     .base_url("https://api.example.com")
//!     .operation(OperationDescriptor::new("getItems", HttpVerb::Get, "/items", vec![
//!         ParameterDescriptor::new("tags", Placement::Query)
//!             .kind(ValueKind::Array(Box::new(ValueKind::String))),
//!     ]));
//!
//! assert_eq!(catalog.operations.len(), 1);
//! ```

pub use crate::error::SchemaError;
pub use crate::loader::{SchemaFormat, load_catalog};
pub use crate::types::{
    CollectionFormat, HttpVerb, OperationCatalog, OperationDescriptor, ParameterDescriptor,
    Placement, ValueKind,
};
