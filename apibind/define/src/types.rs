//! Core types for operation catalogs.
//!
//! This module provides the immutable descriptors a schema is loaded into:
//!
//! - [`OperationCatalog`] - The ordered set of operations plus a default base address
//! - [`OperationDescriptor`] - A single addressable API operation (verb + path)
//! - [`ParameterDescriptor`] - One declared parameter and where it is serialized
//! - [`HttpVerb`] - HTTP method enumeration
//! - [`Placement`] - Where a parameter goes in the request (path, query, body, header, form)

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::template::extract_path_params;

/// HTTP methods an operation can use.
///
/// ## Examples
///
/// Swagger documents key operations by lowercase verb, so parsing is
/// case-insensitive:
///
/// ```
/// use std::str::FromStr;
/// use apibind_define::HttpVerb;
///
/// assert_eq!(HttpVerb::from_str("get").unwrap(), HttpVerb::Get);
/// assert_eq!(HttpVerb::from_str("DELETE").unwrap(), HttpVerb::Delete);
/// ```
///
/// Display is uppercase, matching what goes on the wire:
///
/// ```
/// use apibind_define::HttpVerb;
///
/// assert_eq!(HttpVerb::Post.to_string(), "POST");
/// assert_eq!(HttpVerb::Post.as_lower(), "post");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum HttpVerb {
    /// HTTP GET - Retrieve a resource
    Get,
    /// HTTP POST - Create a new resource
    Post,
    /// HTTP PUT - Replace a resource entirely
    Put,
    /// HTTP PATCH - Partially update a resource
    Patch,
    /// HTTP DELETE - Remove a resource
    Delete,
    /// HTTP HEAD - Get headers only (no body)
    Head,
    /// HTTP OPTIONS - Get allowed methods for a resource
    Options,
}

impl HttpVerb {
    /// Returns the lowercase verb used as a path-item key and name prefix.
    pub fn as_lower(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Patch => "patch",
            Self::Delete => "delete",
            Self::Head => "head",
            Self::Options => "options",
        }
    }

    /// Returns `true` for verbs whose responses may be served from a cache.
    pub fn is_read(&self) -> bool {
        matches!(self, Self::Get | Self::Head)
    }
}

/// The schema-declared location a parameter is serialized into.
///
/// Placement is fixed when the schema is loaded and never inferred from
/// the shape of a call-time argument.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Placement {
    /// Substituted into a `{placeholder}` of the path template.
    Path,
    /// Appended to the query string.
    Query,
    /// Sent as the JSON request payload (at most one per operation).
    Body,
    /// Sent as a request header.
    Header,
    /// Sent as an `application/x-www-form-urlencoded` field.
    FormData,
}

/// The value type a parameter carries.
///
/// Drives the field types of generated parameter structs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ValueKind {
    /// Text value.
    #[default]
    String,
    /// Whole number.
    Integer,
    /// Floating point number.
    Number,
    /// `true` / `false`.
    Boolean,
    /// Homogeneous list of values.
    Array(Box<ValueKind>),
    /// Arbitrary JSON (request bodies, objects, files).
    Json,
}

impl ValueKind {
    /// Maps a Swagger `type` (and `items.type` for arrays) onto a value kind.
    ///
    /// Unknown or absent types map to [`ValueKind::Json`].
    ///
    /// ## Examples
    ///
    /// ```
    /// use apibind_define::ValueKind;
    ///
    /// assert_eq!(ValueKind::from_swagger(Some("integer"), None), ValueKind::Integer);
    /// assert_eq!(
    ///     ValueKind::from_swagger(Some("array"), Some("string")),
    ///     ValueKind::Array(Box::new(ValueKind::String))
    /// );
    /// assert_eq!(ValueKind::from_swagger(None, None), ValueKind::Json);
    /// ```
    pub fn from_swagger(ty: Option<&str>, items: Option<&str>) -> Self {
        match ty {
            Some("string") => Self::String,
            Some("integer") => Self::Integer,
            Some("number") => Self::Number,
            Some("boolean") => Self::Boolean,
            Some("array") => Self::Array(Box::new(Self::from_swagger(items, None))),
            _ => Self::Json,
        }
    }

    /// Returns `true` if this is a list kind.
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }
}

/// How list values are serialized into a single parameter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CollectionFormat {
    /// Comma separated (`a,b`).
    Csv,
    /// Space separated (`a b`).
    Ssv,
    /// Tab separated.
    Tsv,
    /// Pipe separated (`a|b`).
    Pipes,
    /// Repeated key/value pairs (`tags=a&tags=b`).
    #[default]
    Multi,
}

impl CollectionFormat {
    /// Returns the join separator, or `None` for [`CollectionFormat::Multi`].
    pub fn separator(&self) -> Option<&'static str> {
        match self {
            Self::Csv => Some(","),
            Self::Ssv => Some(" "),
            Self::Tsv => Some("\t"),
            Self::Pipes => Some("|"),
            Self::Multi => None,
        }
    }
}

/// One declared parameter of an operation.
///
/// ## Examples
///
/// ```
/// use apibind_define::{ParameterDescriptor, Placement, ValueKind};
///
/// let limit = ParameterDescriptor::new("limit", Placement::Query)
///     .required(true)
///     .kind(ValueKind::Integer);
/// assert!(limit.required);
///
/// // Path parameters are always required.
/// let id = ParameterDescriptor::new("dpId", Placement::Path);
/// assert!(id.required);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    /// Name as it appears in the schema (and on the wire).
    pub name: String,
    /// Where the parameter is serialized.
    pub placement: Placement,
    /// Whether a call must supply this parameter.
    pub required: bool,
    /// Value type.
    pub kind: ValueKind,
    /// How list values are rendered.
    pub collection_format: CollectionFormat,
    /// Human-readable description.
    pub description: Option<String>,
}

impl ParameterDescriptor {
    /// Creates an optional string parameter (required when placed in the path).
    pub fn new(name: impl Into<String>, placement: Placement) -> Self {
        let kind = if placement == Placement::Body {
            ValueKind::Json
        } else {
            ValueKind::String
        };
        Self {
            name: name.into(),
            placement,
            required: placement == Placement::Path,
            kind,
            collection_format: CollectionFormat::default(),
            description: None,
        }
    }

    /// Sets the required flag. Path parameters stay required.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required || self.placement == Placement::Path;
        self
    }

    /// Sets the value kind.
    pub fn kind(mut self, kind: ValueKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the list serialization format.
    pub fn collection_format(mut self, format: CollectionFormat) -> Self {
        self.collection_format = format;
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A single API operation.
///
/// ## Examples
///
/// ```
/// use apibind_define::{HttpVerb, OperationDescriptor, ParameterDescriptor, Placement};
///
/// let op = OperationDescriptor::new(
///     "getDemandPartnersByDpId",
///     HttpVerb::Get,
///     "/demand-partners/{dpId}",
///     vec![ParameterDescriptor::new("dpId", Placement::Path)],
/// );
///
/// assert!(!op.expects_body);
/// assert!(op.is_cacheable());
/// assert_eq!(op.placeholders(), vec!["dpId"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationDescriptor {
    /// Unique operation name (e.g., `getVersionsByVersion`).
    pub name: String,
    /// HTTP verb.
    pub verb: HttpVerb,
    /// Path template (e.g., `/versions/{version}`).
    pub path: String,
    /// Declared parameters in schema order.
    pub parameters: Vec<ParameterDescriptor>,
    /// Whether a request payload (body or form fields) is expected.
    pub expects_body: bool,
    /// One-line summary.
    pub summary: Option<String>,
    /// Longer description.
    pub description: Option<String>,
    /// Whether the schema marks the operation as deprecated.
    pub deprecated: bool,
}

impl OperationDescriptor {
    /// Creates a descriptor; `expects_body` is derived from the parameters.
    pub fn new(
        name: impl Into<String>,
        verb: HttpVerb,
        path: impl Into<String>,
        parameters: Vec<ParameterDescriptor>,
    ) -> Self {
        let expects_body = parameters
            .iter()
            .any(|p| matches!(p.placement, Placement::Body | Placement::FormData));
        Self {
            name: name.into(),
            verb,
            path: path.into(),
            parameters,
            expects_body,
            summary: None,
            description: None,
            deprecated: false,
        }
    }

    /// Sets the summary.
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks the operation deprecated.
    pub fn deprecated(mut self, deprecated: bool) -> Self {
        self.deprecated = deprecated;
        self
    }

    /// Returns the placeholder names found in the path template.
    pub fn placeholders(&self) -> Vec<&str> {
        extract_path_params(&self.path)
    }

    /// Returns the parameters with the given placement, in declaration order.
    pub fn parameters_in(&self, placement: Placement) -> impl Iterator<Item = &ParameterDescriptor> {
        self.parameters
            .iter()
            .filter(move |p| p.placement == placement)
    }

    /// Returns the body parameter, if any.
    pub fn body_parameter(&self) -> Option<&ParameterDescriptor> {
        self.parameters_in(Placement::Body).next()
    }

    /// Looks up a parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&ParameterDescriptor> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Returns `true` if a successful response may be served from a cache.
    ///
    /// Only reads (GET/HEAD) without a request payload qualify.
    pub fn is_cacheable(&self) -> bool {
        self.verb.is_read() && !self.expects_body
    }
}

/// An ordered set of operations loaded from one API description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationCatalog {
    /// API title (`info.title`).
    pub title: String,
    /// API description (`info.description`).
    pub description: Option<String>,
    /// API version (`info.version`).
    pub version: Option<String>,
    /// Default base address, when the schema declares a host.
    pub base_url: Option<String>,
    /// Operations in document order.
    pub operations: Vec<OperationDescriptor>,
}

impl OperationCatalog {
    /// Creates an empty catalog with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            version: None,
            base_url: None,
            operations: Vec::new(),
        }
    }

    /// Sets the default base address.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the version.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Appends an operation.
    pub fn operation(mut self, operation: OperationDescriptor) -> Self {
        self.operations.push(operation);
        self
    }

    /// Looks up an operation by name.
    pub fn find(&self, name: &str) -> Option<&OperationDescriptor> {
        self.operations.iter().find(|op| op.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn http_verb_display_uppercase() {
        assert_eq!(HttpVerb::Get.to_string(), "GET");
        assert_eq!(HttpVerb::Patch.to_string(), "PATCH");
        assert_eq!(HttpVerb::Options.to_string(), "OPTIONS");
    }

    #[test]
    fn http_verb_from_str_any_case() {
        assert_eq!(HttpVerb::from_str("get").unwrap(), HttpVerb::Get);
        assert_eq!(HttpVerb::from_str("Put").unwrap(), HttpVerb::Put);
        assert_eq!(HttpVerb::from_str("DELETE").unwrap(), HttpVerb::Delete);
        assert!(HttpVerb::from_str("parameters").is_err());
        assert!(HttpVerb::from_str("").is_err());
    }

    #[test]
    fn http_verb_lower_matches_display() {
        for verb in HttpVerb::iter() {
            assert_eq!(verb.as_lower(), verb.to_string().to_lowercase());
        }
    }

    #[test]
    fn http_verb_serde_lowercase() {
        assert_eq!(serde_json::to_string(&HttpVerb::Post).unwrap(), "\"post\"");
        let verb: HttpVerb = serde_json::from_str("\"head\"").unwrap();
        assert_eq!(verb, HttpVerb::Head);
    }

    #[test]
    fn placement_parses_swagger_locations() {
        assert_eq!(Placement::from_str("path").unwrap(), Placement::Path);
        assert_eq!(Placement::from_str("query").unwrap(), Placement::Query);
        assert_eq!(Placement::from_str("body").unwrap(), Placement::Body);
        assert_eq!(Placement::from_str("header").unwrap(), Placement::Header);
        assert_eq!(Placement::from_str("formData").unwrap(), Placement::FormData);
        assert!(Placement::from_str("cookie").is_err());
    }

    #[test]
    fn path_parameter_cannot_be_made_optional() {
        let param = ParameterDescriptor::new("id", Placement::Path).required(false);
        assert!(param.required);
    }

    #[test]
    fn body_parameter_defaults_to_json_kind() {
        let param = ParameterDescriptor::new("payload", Placement::Body);
        assert_eq!(param.kind, ValueKind::Json);
        assert!(!param.required);
    }

    #[test]
    fn expects_body_follows_parameters() {
        let read = OperationDescriptor::new("getItems", HttpVerb::Get, "/items", vec![]);
        assert!(!read.expects_body);
        assert!(read.is_cacheable());

        let write = OperationDescriptor::new(
            "postItems",
            HttpVerb::Post,
            "/items",
            vec![ParameterDescriptor::new("item", Placement::Body).required(true)],
        );
        assert!(write.expects_body);
        assert!(!write.is_cacheable());
        assert_eq!(write.body_parameter().map(|p| p.name.as_str()), Some("item"));

        let form = OperationDescriptor::new(
            "postLogin",
            HttpVerb::Post,
            "/login",
            vec![ParameterDescriptor::new("username", Placement::FormData)],
        );
        assert!(form.expects_body);
    }

    #[test]
    fn delete_is_not_cacheable() {
        let op = OperationDescriptor::new("deleteItem", HttpVerb::Delete, "/items/{id}", vec![]);
        assert!(!op.is_cacheable());
    }

    #[test]
    fn catalog_find_by_name() {
        let catalog = OperationCatalog::new("Test")
            .base_url("https://api.example.com")
            .operation(OperationDescriptor::new("getA", HttpVerb::Get, "/a", vec![]))
            .operation(OperationDescriptor::new("getB", HttpVerb::Get, "/b", vec![]));

        assert_eq!(catalog.find("getB").map(|op| op.path.as_str()), Some("/b"));
        assert!(catalog.find("getC").is_none());
    }

    #[test]
    fn collection_format_separators() {
        assert_eq!(CollectionFormat::Csv.separator(), Some(","));
        assert_eq!(CollectionFormat::Pipes.separator(), Some("|"));
        assert_eq!(CollectionFormat::Multi.separator(), None);
        assert_eq!(CollectionFormat::default(), CollectionFormat::Multi);
    }
}
