//! Output assembly and file writing for generated code.
//!
//! This module handles the final phase of code generation: assembling all
//! generated pieces into complete Rust files, validating the output,
//! formatting it, and writing it to disk atomically.
//!
//! ## Output Structure
//!
//! ```text
//! <crate>/
//! ├── Cargo.toml        # written by cargo_gen
//! └── src/
//!     ├── lib.rs        # Module declaration and re-exports
//!     └── rules_api.rs  # Client, params structs, catalog()
//! ```
//!
//! ## Safety Guarantees
//!
//! - **Validation**: All generated code is validated with `syn` before writing
//! - **Formatting**: Output is formatted with `prettyplease` for consistent style
//! - **Atomic writes**: Uses temp file + rename pattern to prevent partial writes

use std::fs;
use std::path::Path;

use apibind_define::OperationCatalog;
use apibind_define::validation::validate_catalog;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use tracing::{debug, info};

use crate::codegen::{
    ModuleDocBuilder, generate_catalog_fn, generate_client_struct, generate_params_struct,
};
use crate::config::GeneratorConfig;
use crate::errors::GeneratorError;
use crate::naming::check_collisions;

/// Names resolved for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedNames {
    /// Client struct name.
    pub client: String,
    /// Module file name without `.rs`.
    pub module: String,
    /// Params struct suffix.
    pub suffix: String,
}

impl ResolvedNames {
    /// Resolves and checks every generated name.
    ///
    /// ## Errors
    ///
    /// Returns an error if the configuration is invalid, the catalog is
    /// inconsistent, or two schema names map to one Rust identifier.
    pub fn resolve(
        catalog: &OperationCatalog,
        config: &GeneratorConfig,
    ) -> Result<Self, GeneratorError> {
        config.validate()?;
        validate_catalog(catalog)?;

        let names = Self {
            client: config.resolve_client_name(catalog)?,
            module: config.resolve_module_name(catalog)?,
            suffix: config.params_suffix.clone(),
        };
        check_collisions(catalog, &names.client, &names.suffix)?;
        Ok(names)
    }
}

/// Formatted sources for one generated crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCode {
    /// Content of `lib.rs`.
    pub lib_rs: String,
    /// File name of the client module (`rules_api.rs`).
    pub module_file: String,
    /// Content of the client module.
    pub module_rs: String,
}

/// Assembles the client module code.
///
/// Contains, in order: module documentation, imports, `catalog()`, one
/// params struct per operation, and the client struct.
pub fn assemble_api_module(catalog: &OperationCatalog, names: &ResolvedNames) -> TokenStream {
    let module_docs =
        ModuleDocBuilder::new(catalog, &names.client, &names.module, &names.suffix).build();
    let catalog_fn = generate_catalog_fn(catalog);
    let params_structs: TokenStream = catalog
        .operations
        .iter()
        .map(|op| generate_params_struct(op, &names.suffix))
        .collect();
    let client = generate_client_struct(catalog, &names.client, &names.suffix);

    quote! {
        #module_docs

        use std::sync::Arc;

        use apibind_runtime::define;
        use apibind_runtime::{ApiClient, Args, Cache, CallError, CallOptions, ConfigError, Transport};
        use serde::de::DeserializeOwned;

        #catalog_fn

        #params_structs

        #client
    }
}

/// Assembles `lib.rs` for the generated crate.
pub fn assemble_lib_rs(catalog: &OperationCatalog, names: &ResolvedNames) -> TokenStream {
    let module = format_ident!("{}", names.module);
    let intro = format!(" Generated client for {}.", catalog.title);
    let usage = format!(
        " See [`{}`] for the operations and [`{}::catalog`] for the bound descriptors.",
        names.client, names.module
    );

    quote! {
        #![doc = #intro]
        //!
        #![doc = #usage]

        pub mod #module;

        pub use #module::*;

        pub use apibind_runtime::{
            Cache, CacheOptions, CallError, CallOptions, ConfigError, MemoryCache, ReqwestTransport,
            Transport,
        };
    }
}

/// Validates generated code using syn.
///
/// ## Errors
///
/// Returns `GeneratorError::CodeGenError` if the code fails to parse.
pub fn validate_code(tokens: &TokenStream) -> Result<syn::File, GeneratorError> {
    syn::parse2(tokens.clone())
        .map_err(|e| GeneratorError::CodeGenError(format!("Generated code is invalid: {e}")))
}

/// Formats generated code using prettyplease, prepending an auto-generated
/// notice.
pub fn format_code(file: &syn::File) -> String {
    let formatted = prettyplease::unparse(file);
    format!(
        "// This code was automatically generated by apibind-gen. Do not edit manually.\n\n{formatted}"
    )
}

/// Writes content to a file atomically using temp file + rename.
///
/// ## Errors
///
/// Returns `GeneratorError::WriteError` if:
/// - Parent directories cannot be created
/// - The temp file cannot be written
/// - The rename operation fails
pub fn write_atomic(path: &Path, content: &str) -> Result<(), GeneratorError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| GeneratorError::WriteError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(|e| GeneratorError::WriteError {
        path: temp_path.display().to_string(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| GeneratorError::WriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// Generates, validates and formats all sources without touching the disk.
///
/// ## Errors
///
/// Returns an error if names cannot be resolved or the generated code does
/// not parse.
pub fn generate(
    catalog: &OperationCatalog,
    config: &GeneratorConfig,
) -> Result<GeneratedCode, GeneratorError> {
    let names = ResolvedNames::resolve(catalog, config)?;
    debug!(
        client = %names.client,
        module = %names.module,
        operations = catalog.operations.len(),
        "generating client"
    );

    let lib_file = validate_code(&assemble_lib_rs(catalog, &names))?;
    let module_file = validate_code(&assemble_api_module(catalog, &names))?;

    Ok(GeneratedCode {
        lib_rs: format_code(&lib_file),
        module_file: format!("{}.rs", names.module),
        module_rs: format_code(&module_file),
    })
}

/// Generates all sources and writes them to `output_dir` (the `src/`
/// directory of the generated crate).
///
/// With `dry_run`, prints the files instead of writing them.
///
/// ## Errors
///
/// Returns an error if:
/// - Code generation produces invalid Rust
/// - File writing fails
pub fn generate_and_write(
    catalog: &OperationCatalog,
    config: &GeneratorConfig,
    output_dir: &Path,
    dry_run: bool,
) -> Result<GeneratedCode, GeneratorError> {
    let code = generate(catalog, config)?;

    if dry_run {
        println!("=== lib.rs ===\n{}\n", code.lib_rs);
        println!("=== {} ===\n{}\n", code.module_file, code.module_rs);
    } else {
        write_atomic(&output_dir.join("lib.rs"), &code.lib_rs)?;
        write_atomic(&output_dir.join(&code.module_file), &code.module_rs)?;
        info!(
            dir = %output_dir.display(),
            module = %code.module_file,
            "wrote generated sources"
        );
    }

    Ok(code)
}
