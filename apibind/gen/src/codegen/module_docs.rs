//! Module documentation generation for generated clients.

use apibind_define::OperationCatalog;
use proc_macro2::TokenStream;
use quote::quote;

use crate::naming::{method_name, params_struct_name};

/// Builds module-level documentation for a generated client module.
///
/// Sections:
/// - Introduction with title, version and description
/// - Base address
/// - Operations table (method, verb, path)
/// - Usage example
pub struct ModuleDocBuilder<'a> {
    catalog: &'a OperationCatalog,
    client_name: &'a str,
    module_name: &'a str,
    suffix: &'a str,
}

impl<'a> ModuleDocBuilder<'a> {
    /// Creates a documentation builder.
    pub fn new(
        catalog: &'a OperationCatalog,
        client_name: &'a str,
        module_name: &'a str,
        suffix: &'a str,
    ) -> Self {
        Self {
            catalog,
            client_name,
            module_name,
            suffix,
        }
    }

    /// Builds the `#![doc = "..."]` attributes.
    pub fn build(&self) -> TokenStream {
        let lines: Vec<String> = [
            self.intro_section(),
            self.base_url_section(),
            self.operations_section(),
            self.example_section(),
        ]
        .into_iter()
        .flat_map(|mut section| {
            section.push(String::new());
            section
        })
        .collect();

        quote! {
            #(#![doc = #lines])*
        }
    }

    fn intro_section(&self) -> Vec<String> {
        let mut lines = match &self.catalog.version {
            Some(version) => vec![format!(
                " Generated API client for {} (version {version}).",
                self.catalog.title
            )],
            None => vec![format!(" Generated API client for {}.", self.catalog.title)],
        };
        if let Some(description) = &self.catalog.description {
            lines.push(String::new());
            lines.extend(description.trim_end().lines().map(|l| format!(" {l}")));
        }
        lines
    }

    fn base_url_section(&self) -> Vec<String> {
        let mut lines = vec![" ## Base Address".to_string(), String::new()];
        match &self.catalog.base_url {
            Some(url) => lines.push(format!(
                " `{url}` by default; use `{}::with_base_url` to point elsewhere.",
                self.client_name
            )),
            None => lines.push(format!(
                " The API declares no host: create clients with `{}::with_base_url`.",
                self.client_name
            )),
        }
        lines
    }

    fn operations_section(&self) -> Vec<String> {
        let mut lines = vec![
            " ## Operations".to_string(),
            String::new(),
            " | Method | Request | Params |".to_string(),
            " |--------|---------|--------|".to_string(),
        ];
        for op in &self.catalog.operations {
            lines.push(format!(
                " | `{}` | `{} {}` | [`{}`] |",
                method_name(&op.name),
                op.verb,
                op.path,
                params_struct_name(&op.name, self.suffix)
            ));
        }
        lines
    }

    fn example_section(&self) -> Vec<String> {
        let mut lines = vec![
            " ## Example".to_string(),
            String::new(),
            " ```ignore".to_string(),
            " use std::sync::Arc;".to_string(),
            " use apibind_runtime::{CallOptions, ReqwestTransport};".to_string(),
            format!(" use crate::{}::{};", self.module_name, self.client_name),
            String::new(),
        ];
        let constructor = if self.catalog.base_url.is_some() {
            format!(
                " let client = {}::new(Arc::new(ReqwestTransport::new()?))?;",
                self.client_name
            )
        } else {
            format!(
                " let client = {}::with_base_url(\"https://api.example.com\", Arc::new(ReqwestTransport::new()?))?;",
                self.client_name
            )
        };
        lines.push(constructor);

        if let Some(op) = self.catalog.operations.first() {
            let required: Vec<&str> = op
                .parameters
                .iter()
                .filter(|p| p.required)
                .map(|_| "todo!()")
                .collect();
            lines.push(format!(
                " let params = {}::new({});",
                params_struct_name(&op.name, self.suffix),
                required.join(", ")
            ));
            lines.push(format!(
                " let result: serde_json::Value = client.{}(params, CallOptions::new()).await?;",
                method_name(&op.name)
            ));
        }
        lines.push(" ```".to_string());
        lines
    }
}
