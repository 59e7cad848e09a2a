//! apibind definition library.
//!
//! This crate provides the immutable data model an API description is loaded
//! into, plus the Swagger 2.0 loader that produces it. The catalog is consumed
//! by `apibind-runtime` (callable bindings) and `apibind-gen` (generated
//! strongly-typed client source).
//!
//! ## Core Types
//!
//! - [`OperationCatalog`] - Ordered operations plus a default base address
//! - [`OperationDescriptor`] - One operation: name, verb, path template, parameters
//! - [`ParameterDescriptor`] - One parameter: name, [`Placement`], required flag, [`ValueKind`]
//! - [`HttpVerb`] - HTTP methods
//! - [`SchemaError`] - Everything that can be wrong with a schema
//!
//! ## Modules
//!
//! - [`loader`] - Swagger 2.0 (JSON/YAML) to catalog
//! - [`validation`] - Catalog-wide consistency checks
//! - [`naming`] - Operation and identifier naming rules
//! - [`template`] - `{placeholder}` extraction and substitution
//!
//! ## Examples
//!
//! Build a catalog by hand:
//!
//! ```
//! use apibind_define::{HttpVerb, OperationCatalog, OperationDescriptor, ParameterDescriptor, Placement};
//! use apibind_define::validation::validate_catalog;
//!
//! let catalog = OperationCatalog::new("Rules API")
//!     .base_url("https://api.example.com/v1")
//!     .operation(OperationDescriptor::new(
//!         "getDemandPartnersByDpId",
//!         HttpVerb::Get,
//!         "/demand-partners/{dpId}",
//!         vec![ParameterDescriptor::new("dpId", Placement::Path)],
//!     ));
//!
//! assert!(validate_catalog(&catalog).is_ok());
//! ```

pub mod error;
pub mod loader;
pub mod naming;
pub mod prelude;
pub mod template;
pub mod types;
pub mod validation;

pub use error::SchemaError;
pub use loader::{SchemaFormat, load_catalog};
pub use types::{
    CollectionFormat, HttpVerb, OperationCatalog, OperationDescriptor, ParameterDescriptor,
    Placement, ValueKind,
};
