//! apibind code generator library.
//!
//! This crate turns an [`OperationCatalog`](apibind_define::OperationCatalog)
//! into a small Rust crate that wraps `apibind-runtime`. The generated code
//! includes:
//!
//! - A `catalog()` function rebuilding the operation descriptors from literals
//! - One params struct per operation (required fields plain, optional fields
//!   as `Option<T>` with `with_*` setters)
//! - A client struct with `new()`, `with_base_url()` and one async method per
//!   operation
//! - Module documentation with an operations table and a usage example
//!
//! ## Modules
//!
//! - [`codegen`] - Token generation for individual components
//! - [`output`] - Final assembly, validation, and file writing
//! - [`cargo_gen`] - Cargo.toml generation for the output crate
//! - [`config`] - Naming configuration
//! - [`naming`] - Identifier rules and collision detection
//! - [`schema`] - Schema file and built-in definition loading
//! - [`errors`] - Error types for the generator
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::path::Path;
//! use apibind_definitions::define_rules_api;
//! use apibind_gen::config::GeneratorConfig;
//! use apibind_gen::output::generate_and_write;
//!
//! let catalog = define_rules_api().unwrap();
//! let config = GeneratorConfig::new().crate_name("rules-client");
//!
//! // dry_run=true prints instead of writing
//! let code = generate_and_write(&catalog, &config, Path::new("generated/src"), true).unwrap();
//! assert_eq!(code.module_file, "rules_api.rs");
//! ```
//!
//! ## Generated Code Structure
//!
//! For the Rules API:
//!
//! ```text
//! pub fn catalog() -> define::OperationCatalog { ... }
//!
//! pub struct GetVersionsParams { pub limit: i64, pub offset: i64, ... }
//!
//! pub struct RulesApi { client: ApiClient }
//!
//! impl RulesApi {
//!     pub async fn get_versions<T: DeserializeOwned>(
//!         &self,
//!         params: GetVersionsParams,
//!         options: CallOptions,
//!     ) -> Result<T, CallError>;
//! }
//! ```

pub mod cargo_gen;
pub mod codegen;
pub mod config;
pub mod errors;
pub mod naming;
pub mod output;
pub mod schema;
