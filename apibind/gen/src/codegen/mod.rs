//! Code generation modules for apibind.
//!
//! Each submodule produces one part of the generated client module as a
//! `proc_macro2::TokenStream`.
//!
//! ## Submodules
//!
//! - [`catalog`] - The `catalog()` function rebuilding the operation catalog
//! - [`client`] - The client struct with one async method per operation
//! - [`module_docs`] - Module-level documentation
//! - [`params_struct`] - One params struct per operation
//! - [`types`] - Schema value kinds to Rust types and descriptor literals
//!
//! ## Output Format
//!
//! All generators return `proc_macro2::TokenStream`, which is then:
//! - Validated with `syn::parse2` to ensure correctness
//! - Formatted with `prettyplease` for consistent style
//!
//! See [`crate::output`] for the assembly and file writing logic.

pub mod catalog;
pub mod client;
pub mod module_docs;
pub mod params_struct;
pub mod types;

pub use catalog::generate_catalog_fn;
pub use client::generate_client_struct;
pub use module_docs::ModuleDocBuilder;
pub use params_struct::generate_params_struct;
