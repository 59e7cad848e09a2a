//! Params struct generation for operations.
//!
//! Each operation gets a struct with one field per declared parameter.
//! Required parameters are plain fields and constructor arguments; optional
//! ones are `Option<_>` with a `with_<field>` setter. `into_args()` turns the
//! struct into the runtime argument bag, keyed by the schema names.

use apibind_define::{OperationDescriptor, ParameterDescriptor};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::types::rust_type;
use crate::naming::{field_name, params_struct_name};

/// Constructors with more arguments than this trip clippy.
const MAX_PLAIN_ARGUMENTS: usize = 7;

/// Generates the params struct for `op`.
///
/// ## Examples
///
/// For `GET /versions` with required `limit` and optional `dpId`:
///
/// ```ignore
/// /// Parameters for `getVersions` (`GET /versions`).
/// #[derive(Debug, Clone, PartialEq)]
/// pub struct GetVersionsParams {
///     pub dp_id: Option<String>,
///     pub limit: i64,
/// }
///
/// impl GetVersionsParams {
///     pub fn new(limit: i64) -> Self { ... }
///     pub fn with_dp_id(mut self, value: impl Into<String>) -> Self { ... }
///     pub fn into_args(self) -> Args { ... }
/// }
/// ```
pub fn generate_params_struct(op: &OperationDescriptor, suffix: &str) -> TokenStream {
    let struct_name = format_ident!("{}", params_struct_name(&op.name, suffix));
    let fields: Vec<Field<'_>> = op.parameters.iter().map(Field::new).collect();
    let has_required = fields.iter().any(|f| f.param.required);

    let docs = struct_docs(op);
    let derives = if has_required {
        quote! { #[derive(Debug, Clone, PartialEq)] }
    } else {
        quote! { #[derive(Debug, Clone, Default, PartialEq)] }
    };

    let field_defs = fields.iter().map(Field::definition);
    let new_fn = generate_new(&fields);
    let setters = fields.iter().filter(|f| !f.param.required).map(Field::setter);
    let into_args = generate_into_args(&fields);

    quote! {
        #(#[doc = #docs])*
        #derives
        pub struct #struct_name {
            #(#field_defs)*
        }

        impl #struct_name {
            #new_fn

            #(#setters)*

            #into_args
        }
    }
}

struct Field<'a> {
    param: &'a ParameterDescriptor,
    ident: proc_macro2::Ident,
    ty: TokenStream,
}

impl<'a> Field<'a> {
    fn new(param: &'a ParameterDescriptor) -> Self {
        Self {
            param,
            ident: format_ident!("{}", field_name(&param.name)),
            ty: rust_type(&param.kind),
        }
    }

    fn definition(&self) -> TokenStream {
        let ident = &self.ident;
        let ty = &self.ty;
        let doc = match &self.param.description {
            Some(text) => format!(" {text}"),
            None => format!(" `{}` ({} parameter).", self.param.name, self.param.placement),
        };
        if self.param.required {
            quote! {
                #[doc = #doc]
                pub #ident: #ty,
            }
        } else {
            quote! {
                #[doc = #doc]
                pub #ident: Option<#ty>,
            }
        }
    }

    fn setter(&self) -> TokenStream {
        let ident = &self.ident;
        let ty = &self.ty;
        let setter = format_ident!("with_{}", self.ident.to_string().trim_end_matches('_'));
        let doc = format!(" Sets `{}`.", self.param.name);
        quote! {
            #[doc = #doc]
            pub fn #setter(mut self, value: impl Into<#ty>) -> Self {
                self.#ident = Some(value.into());
                self
            }
        }
    }
}

fn generate_new(fields: &[Field<'_>]) -> TokenStream {
    let required: Vec<&Field<'_>> = fields.iter().filter(|f| f.param.required).collect();
    let args = required.iter().map(|f| {
        let ident = &f.ident;
        let ty = &f.ty;
        quote! { #ident: #ty }
    });
    let inits = fields.iter().map(|f| {
        let ident = &f.ident;
        if f.param.required {
            quote! { #ident }
        } else {
            quote! { #ident: None }
        }
    });
    let allow = (required.len() > MAX_PLAIN_ARGUMENTS)
        .then(|| quote! { #[allow(clippy::too_many_arguments)] });

    quote! {
        /// Creates parameters from every required value.
        #allow
        pub fn new(#(#args),*) -> Self {
            Self {
                #(#inits),*
            }
        }
    }
}

fn generate_into_args(fields: &[Field<'_>]) -> TokenStream {
    if fields.is_empty() {
        return quote! {
            /// Converts into the runtime argument bag.
            pub fn into_args(self) -> Args {
                Args::new()
            }
        };
    }

    let inserts = fields.iter().map(|f| {
        let ident = &f.ident;
        let name = &f.param.name;
        quote! { args.insert(#name, self.#ident); }
    });

    quote! {
        /// Converts into the runtime argument bag. Unset optional values
        /// become `null`, which counts as absent.
        pub fn into_args(self) -> Args {
            let mut args = Args::new();
            #(#inserts)*
            args
        }
    }
}

fn struct_docs(op: &OperationDescriptor) -> Vec<String> {
    let mut lines = vec![format!(
        " Parameters for `{}` (`{} {}`).",
        op.name, op.verb, op.path
    )];
    if let Some(summary) = &op.summary {
        lines.push(String::new());
        lines.push(format!(" {summary}"));
    }
    lines
}
