//! Mapping from descriptor values to Rust tokens.
//!
//! Two directions are needed: the Rust field type a parameter is exposed
//! as, and the literal expression that rebuilds a descriptor value inside
//! the generated `catalog()`.

use apibind_define::{CollectionFormat, HttpVerb, Placement, ValueKind};
use proc_macro2::TokenStream;
use quote::quote;

/// Rust type for a parameter of the given kind.
///
/// | Kind | Type |
/// |------|------|
/// | `string` | `String` |
/// | `integer` | `i64` |
/// | `number` | `f64` |
/// | `boolean` | `bool` |
/// | `array` | `Vec<_>` |
/// | body / other | `serde_json::Value` |
pub fn rust_type(kind: &ValueKind) -> TokenStream {
    match kind {
        ValueKind::String => quote! { String },
        ValueKind::Integer => quote! { i64 },
        ValueKind::Number => quote! { f64 },
        ValueKind::Boolean => quote! { bool },
        ValueKind::Array(inner) => {
            let inner = rust_type(inner);
            quote! { Vec<#inner> }
        }
        ValueKind::Json => quote! { serde_json::Value },
    }
}

/// `define::ValueKind` expression for `kind`.
pub fn value_kind_literal(kind: &ValueKind) -> TokenStream {
    match kind {
        ValueKind::String => quote! { define::ValueKind::String },
        ValueKind::Integer => quote! { define::ValueKind::Integer },
        ValueKind::Number => quote! { define::ValueKind::Number },
        ValueKind::Boolean => quote! { define::ValueKind::Boolean },
        ValueKind::Array(inner) => {
            let inner = value_kind_literal(inner);
            quote! { define::ValueKind::Array(Box::new(#inner)) }
        }
        ValueKind::Json => quote! { define::ValueKind::Json },
    }
}

/// `define::HttpVerb` expression for `verb`.
pub fn verb_literal(verb: HttpVerb) -> TokenStream {
    match verb {
        HttpVerb::Get => quote! { define::HttpVerb::Get },
        HttpVerb::Post => quote! { define::HttpVerb::Post },
        HttpVerb::Put => quote! { define::HttpVerb::Put },
        HttpVerb::Patch => quote! { define::HttpVerb::Patch },
        HttpVerb::Delete => quote! { define::HttpVerb::Delete },
        HttpVerb::Head => quote! { define::HttpVerb::Head },
        HttpVerb::Options => quote! { define::HttpVerb::Options },
    }
}

/// `define::Placement` expression for `placement`.
pub fn placement_literal(placement: Placement) -> TokenStream {
    match placement {
        Placement::Path => quote! { define::Placement::Path },
        Placement::Query => quote! { define::Placement::Query },
        Placement::Body => quote! { define::Placement::Body },
        Placement::Header => quote! { define::Placement::Header },
        Placement::FormData => quote! { define::Placement::FormData },
    }
}

/// `define::CollectionFormat` expression for `format`.
pub fn collection_format_literal(format: CollectionFormat) -> TokenStream {
    match format {
        CollectionFormat::Csv => quote! { define::CollectionFormat::Csv },
        CollectionFormat::Ssv => quote! { define::CollectionFormat::Ssv },
        CollectionFormat::Tsv => quote! { define::CollectionFormat::Tsv },
        CollectionFormat::Pipes => quote! { define::CollectionFormat::Pipes },
        CollectionFormat::Multi => quote! { define::CollectionFormat::Multi },
    }
}
