//! Client struct generation.
//!
//! The generated client wraps a runtime `ApiClient` built from the
//! generated `catalog()` and exposes one typed async method per operation.

use apibind_define::{OperationCatalog, OperationDescriptor};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::naming::{method_name, params_struct_name};

/// Generates the client struct for `catalog`.
///
/// ## Examples
///
/// ```ignore
/// // Generated code:
/// #[derive(Debug, Clone)]
/// pub struct RulesApi {
///     client: ApiClient,
/// }
///
/// impl RulesApi {
///     pub const BASE_URL: &str = "https://api.ntoggle.com/v1";
///
///     pub fn new(transport: Arc<dyn Transport>) -> Result<Self, ConfigError> { ... }
///
///     pub async fn get_versions<T: DeserializeOwned>(
///         &self,
///         params: GetVersionsParams,
///         options: CallOptions,
///     ) -> Result<T, CallError> { ... }
/// }
/// ```
pub fn generate_client_struct(
    catalog: &OperationCatalog,
    client_name: &str,
    suffix: &str,
) -> TokenStream {
    let struct_name = format_ident!("{}", client_name);
    let doc = format!(" {} client.", catalog.title);
    let base_url_const = catalog.base_url.as_ref().map(|url| {
        quote! {
            /// Default base address.
            pub const BASE_URL: &str = #url;
        }
    });
    let methods = catalog
        .operations
        .iter()
        .map(|op| generate_operation_method(op, suffix));

    quote! {
        #[doc = #doc]
        #[derive(Debug, Clone)]
        pub struct #struct_name {
            client: ApiClient,
        }

        impl #struct_name {
            #base_url_const

            /// Creates a client against the catalog's base address.
            ///
            /// ## Errors
            ///
            /// Fails if the catalog declares no base address.
            pub fn new(transport: Arc<dyn Transport>) -> Result<Self, ConfigError> {
                let client = ApiClient::builder(catalog()).transport(transport).build()?;
                Ok(Self { client })
            }

            /// Creates a client against a custom base address.
            ///
            /// ## Errors
            ///
            /// Fails if `base_url` is not an absolute URL.
            pub fn with_base_url(
                base_url: impl Into<String>,
                transport: Arc<dyn Transport>,
            ) -> Result<Self, ConfigError> {
                let client = ApiClient::builder(catalog())
                    .base_url(base_url)
                    .transport(transport)
                    .build()?;
                Ok(Self { client })
            }

            /// Uses `cache` for every call that brings no cache of its own.
            pub fn with_cache(self, cache: Arc<dyn Cache>) -> Self {
                Self {
                    client: self.client.with_cache(cache),
                }
            }

            /// The underlying binding set.
            pub fn client(&self) -> &ApiClient {
                &self.client
            }

            #(#methods)*
        }
    }
}

fn generate_operation_method(op: &OperationDescriptor, suffix: &str) -> TokenStream {
    let method = format_ident!("{}", method_name(&op.name));
    let params = format_ident!("{}", params_struct_name(&op.name, suffix));
    let name = &op.name;
    let docs = method_docs(op);
    let deprecated = op.deprecated.then(|| quote! { #[deprecated] });

    quote! {
        #(#[doc = #docs])*
        #deprecated
        pub async fn #method<T: DeserializeOwned>(
            &self,
            params: #params,
            options: CallOptions,
        ) -> Result<T, CallError> {
            self.client.call(#name, &params.into_args(), options).json().await
        }
    }
}

fn method_docs(op: &OperationDescriptor) -> Vec<String> {
    let mut lines = Vec::new();
    match &op.summary {
        Some(summary) => lines.push(format!(" {summary}")),
        None => lines.push(format!(" Calls `{}`.", op.name)),
    }
    lines.push(String::new());
    lines.push(format!(" `{} {}`", op.verb, op.path));
    if let Some(description) = &op.description {
        lines.push(String::new());
        lines.extend(description.lines().map(|l| format!(" {l}")));
    }
    lines
}
