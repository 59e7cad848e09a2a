//! Generation of the `catalog()` function.
//!
//! The generated client never re-reads the schema: the catalog is rebuilt
//! from literal descriptors, so parameter placement is fixed when the code
//! is generated.

use apibind_define::{
    CollectionFormat, OperationCatalog, OperationDescriptor, ParameterDescriptor, Placement,
};
use proc_macro2::TokenStream;
use quote::quote;

use super::types::{collection_format_literal, placement_literal, value_kind_literal, verb_literal};

/// Generates `pub fn catalog() -> define::OperationCatalog`.
pub fn generate_catalog_fn(catalog: &OperationCatalog) -> TokenStream {
    let title = &catalog.title;
    let base_url = catalog
        .base_url
        .as_ref()
        .map(|url| quote! { .base_url(#url) });
    let description = catalog
        .description
        .as_ref()
        .map(|text| quote! { .description(#text) });
    let version = catalog
        .version
        .as_ref()
        .map(|version| quote! { .version(#version) });
    let operations = catalog.operations.iter().map(operation_literal);

    quote! {
        /// Rebuilds the operation catalog this client was generated from.
        pub fn catalog() -> define::OperationCatalog {
            define::OperationCatalog::new(#title)
                #base_url
                #description
                #version
                #(.operation(#operations))*
        }
    }
}

fn operation_literal(op: &OperationDescriptor) -> TokenStream {
    let name = &op.name;
    let verb = verb_literal(op.verb);
    let path = &op.path;
    let parameters = op.parameters.iter().map(parameter_literal);
    let summary = op.summary.as_ref().map(|s| quote! { .summary(#s) });
    let description = op.description.as_ref().map(|d| quote! { .description(#d) });
    let deprecated = op.deprecated.then(|| quote! { .deprecated(true) });

    quote! {
        define::OperationDescriptor::new(#name, #verb, #path, vec![#(#parameters),*])
            #summary
            #description
            #deprecated
    }
}

fn parameter_literal(param: &ParameterDescriptor) -> TokenStream {
    let name = &param.name;
    let placement = placement_literal(param.placement);
    let kind = value_kind_literal(&param.kind);
    // Path parameters are required by construction.
    let required = (param.required && param.placement != Placement::Path)
        .then(|| quote! { .required(true) });
    let format = (param.collection_format != CollectionFormat::default()).then(|| {
        let format = collection_format_literal(param.collection_format);
        quote! { .collection_format(#format) }
    });
    let description = param
        .description
        .as_ref()
        .map(|d| quote! { .description(#d) });

    quote! {
        define::ParameterDescriptor::new(#name, #placement)
            .kind(#kind)
            #required
            #format
            #description
    }
}
