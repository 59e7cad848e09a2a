//! Swagger 2.0 schema loader.
//!
//! Parses a Swagger document (JSON or YAML) into an [`OperationCatalog`].
//! Loading is all-or-nothing: any structural problem fails the whole load
//! and no partial catalog is returned.
//!
//! ## Consumed Fields
//!
//! - `swagger`, `info.title`, `info.description`, `info.version`
//! - `host`, `basePath`, `schemes` (base address default)
//! - `paths.<template>.<verb>`: `operationId`, `summary`, `description`,
//!   `deprecated`, `parameters`
//! - `paths.<template>.parameters` (shared by every operation of the path)
//! - `parameters` (shared definitions referenced as `#/parameters/<name>`)
//! - per parameter: `name`, `in`, `required`, `description`, `type`,
//!   `items.type`, `collectionFormat`
//!
//! ## Examples
//!
//! ```
//! use apibind_define::loader::{load_catalog, SchemaFormat};
//!
//! let schema = r#"{
//!     "swagger": "2.0",
//!     "info": { "title": "Rules API", "version": "1" },
//!     "host": "api.example.com",
//!     "basePath": "/v1",
//!     "schemes": ["https"],
//!     "paths": {
//!         "/demand-partners/{dpId}": {
//!             "get": {
//!                 "parameters": [
//!                     { "name": "dpId", "in": "path", "required": true, "type": "string" }
//!                 ]
//!             }
//!         }
//!     }
//! }"#;
//!
//! let catalog = load_catalog(schema, SchemaFormat::Json).unwrap();
//! assert_eq!(catalog.base_url.as_deref(), Some("https://api.example.com/v1"));
//! assert_eq!(catalog.operations[0].name, "getDemandPartnersByDpId");
//! ```

use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::SchemaError;
use crate::naming::{derive_operation_name, normalize_operation_id};
use crate::types::{
    CollectionFormat, HttpVerb, OperationCatalog, OperationDescriptor, ParameterDescriptor,
    Placement, ValueKind,
};
use crate::validation::validate_catalog;

/// The only Swagger version this loader accepts.
const SWAGGER_VERSION: &str = "2.0";

/// Scheme used when the document declares a host but no `schemes`.
const DEFAULT_SCHEME: &str = "https";

/// Prefix of shared parameter references.
const PARAMETER_REF_PREFIX: &str = "#/parameters/";

/// Text encoding of a schema document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaFormat {
    /// JSON document.
    #[default]
    Json,
    /// YAML document.
    Yaml,
}

impl SchemaFormat {
    /// Picks the format from a file extension (`.yaml`/`.yml` are YAML,
    /// everything else is JSON).
    ///
    /// ## Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use apibind_define::loader::SchemaFormat;
    ///
    /// assert_eq!(SchemaFormat::from_path(Path::new("api.yml")), SchemaFormat::Yaml);
    /// assert_eq!(SchemaFormat::from_path(Path::new("api-client.json")), SchemaFormat::Json);
    /// ```
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    info: Option<RawInfo>,
    host: Option<String>,
    #[serde(rename = "basePath")]
    base_path: Option<String>,
    schemes: Option<Vec<String>>,
    paths: Option<Map<String, Value>>,
    #[serde(default)]
    parameters: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawInfo {
    title: Option<String>,
    description: Option<String>,
    version: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawOperation {
    #[serde(rename = "operationId")]
    operation_id: Option<String>,
    summary: Option<String>,
    description: Option<String>,
    #[serde(default)]
    deprecated: bool,
    #[serde(default)]
    parameters: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RawParameter {
    name: Option<String>,
    #[serde(rename = "in")]
    location: Option<String>,
    #[serde(default)]
    required: bool,
    description: Option<String>,
    #[serde(rename = "type")]
    ty: Option<String>,
    items: Option<RawItems>,
    #[serde(rename = "collectionFormat")]
    collection_format: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawItems {
    #[serde(rename = "type")]
    ty: Option<String>,
}

/// Parses schema text into a validated operation catalog.
///
/// ## Errors
///
/// Returns a [`SchemaError`] if the text cannot be parsed, is not a
/// Swagger 2.0 document, is missing required fields, or fails catalog
/// validation (see [`crate::validation::validate_catalog`]).
pub fn load_catalog(text: &str, format: SchemaFormat) -> Result<OperationCatalog, SchemaError> {
    let root: Value = match format {
        SchemaFormat::Json => serde_json::from_str(text)?,
        SchemaFormat::Yaml => serde_yaml::from_str(text)?,
    };
    load_catalog_from_value(root)
}

/// Builds a validated operation catalog from an already-parsed document.
///
/// ## Errors
///
/// Same conditions as [`load_catalog`], minus text parsing.
pub fn load_catalog_from_value(root: Value) -> Result<OperationCatalog, SchemaError> {
    check_version(&root)?;

    let doc: RawDocument = serde_json::from_value(root)
        .map_err(|e| SchemaError::malformed("/", e.to_string()))?;

    let info = doc
        .info
        .ok_or_else(|| SchemaError::malformed("/info", "missing required field 'info'"))?;
    let title = info
        .title
        .ok_or_else(|| SchemaError::malformed("/info/title", "missing required field 'title'"))?;
    let paths = doc
        .paths
        .ok_or_else(|| SchemaError::malformed("/paths", "missing required field 'paths'"))?;

    let mut operations = Vec::new();
    for (template, item) in &paths {
        let location = format!("/paths/{template}");
        let item = item
            .as_object()
            .ok_or_else(|| SchemaError::malformed(&location, "path item must be an object"))?;
        operations.extend(load_path_item(template, item, &doc.parameters, &location)?);
    }

    let base_url = doc.host.as_deref().map(|host| {
        let scheme = doc
            .schemes
            .as_ref()
            .and_then(|s| s.first())
            .map(String::as_str)
            .unwrap_or(DEFAULT_SCHEME);
        let base_path = doc.base_path.as_deref().unwrap_or("").trim_end_matches('/');
        format!("{scheme}://{host}{base_path}")
    });

    let catalog = OperationCatalog {
        title,
        description: info.description,
        version: info.version.as_ref().map(version_text),
        base_url,
        operations,
    };

    validate_catalog(&catalog)?;

    debug!(
        title = %catalog.title,
        operations = catalog.operations.len(),
        base_url = ?catalog.base_url,
        "loaded operation catalog"
    );

    Ok(catalog)
}

fn check_version(root: &Value) -> Result<(), SchemaError> {
    if let Some(openapi) = root.get("openapi") {
        return Err(SchemaError::UnsupportedVersion(version_text(openapi)));
    }
    let version = root
        .get("swagger")
        .ok_or_else(|| SchemaError::malformed("/swagger", "missing required field 'swagger'"))?;
    let version = version_text(version);
    if version != SWAGGER_VERSION {
        return Err(SchemaError::UnsupportedVersion(version));
    }
    Ok(())
}

/// Renders a version field; YAML may hand us `2.0` as a number.
fn version_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 => format!("{f:.1}"),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

fn load_path_item(
    template: &str,
    item: &Map<String, Value>,
    shared: &Map<String, Value>,
    location: &str,
) -> Result<Vec<OperationDescriptor>, SchemaError> {
    let inherited = match item.get("parameters") {
        Some(Value::Array(params)) => params.as_slice(),
        Some(_) => {
            return Err(SchemaError::malformed(
                format!("{location}/parameters"),
                "parameters must be an array",
            ));
        }
        None => &[],
    };

    let mut operations = Vec::new();
    for (key, value) in item {
        if key == "parameters" || key == "$ref" || key.starts_with("x-") {
            continue;
        }
        let op_location = format!("{location}/{key}");
        let verb = HttpVerb::from_str(key).map_err(|_| {
            SchemaError::malformed(&op_location, format!("unknown path item field '{key}'"))
        })?;
        let raw: RawOperation = serde_json::from_value(value.clone())
            .map_err(|e| SchemaError::malformed(&op_location, e.to_string()))?;

        let name = match raw.operation_id.as_deref() {
            Some(id) if !id.trim().is_empty() => normalize_operation_id(id),
            _ => derive_operation_name(verb, template),
        };

        let parameters = collect_parameters(
            &name,
            (inherited, location),
            (raw.parameters.as_slice(), op_location.as_str()),
            shared,
        )?;

        let mut op = OperationDescriptor::new(name, verb, template, parameters)
            .deprecated(raw.deprecated);
        op.summary = raw.summary;
        op.description = raw.description;
        operations.push(op);
    }

    Ok(operations)
}

/// Merges path-level and operation-level parameters.
///
/// An operation parameter replaces an inherited one with the same name and
/// location, keeping the inherited position.
fn collect_parameters(
    operation: &str,
    (inherited, path_location): (&[Value], &str),
    (own, op_location): (&[Value], &str),
    shared: &Map<String, Value>,
) -> Result<Vec<ParameterDescriptor>, SchemaError> {
    let mut parameters: Vec<ParameterDescriptor> = Vec::new();

    for (idx, raw) in inherited.iter().enumerate() {
        let location = format!("{path_location}/parameters/{idx}");
        let param = load_parameter(operation, raw, shared, &location)?;
        push_unique(operation, &mut parameters, param)?;
    }

    let inherited_count = parameters.len();
    for (idx, raw) in own.iter().enumerate() {
        let location = format!("{op_location}/parameters/{idx}");
        let param = load_parameter(operation, raw, shared, &location)?;
        let overrides = parameters[..inherited_count]
            .iter()
            .position(|p| p.name == param.name && p.placement == param.placement);
        match overrides {
            Some(pos) => parameters[pos] = param,
            None => push_unique(operation, &mut parameters, param)?,
        }
    }

    Ok(parameters)
}

fn push_unique(
    operation: &str,
    parameters: &mut Vec<ParameterDescriptor>,
    param: ParameterDescriptor,
) -> Result<(), SchemaError> {
    let duplicate = parameters
        .iter()
        .any(|p| p.name == param.name && p.placement == param.placement);
    if duplicate {
        return Err(SchemaError::DuplicateParameter {
            operation: operation.to_string(),
            parameter: param.name,
        });
    }
    parameters.push(param);
    Ok(())
}

fn load_parameter(
    operation: &str,
    raw: &Value,
    shared: &Map<String, Value>,
    location: &str,
) -> Result<ParameterDescriptor, SchemaError> {
    let resolved = match raw.get("$ref").and_then(Value::as_str) {
        Some(reference) => reference
            .strip_prefix(PARAMETER_REF_PREFIX)
            .and_then(|name| shared.get(name))
            .ok_or_else(|| SchemaError::UnresolvedReference(reference.to_string()))?,
        None => raw,
    };

    let param: RawParameter = serde_json::from_value(resolved.clone())
        .map_err(|e| SchemaError::malformed(location, e.to_string()))?;

    let name = param
        .name
        .ok_or_else(|| SchemaError::malformed(location, "missing required field 'name'"))?;
    let in_value = param
        .location
        .ok_or_else(|| SchemaError::malformed(location, "missing required field 'in'"))?;
    let placement =
        Placement::from_str(&in_value).map_err(|_| SchemaError::UnknownPlacement {
            operation: operation.to_string(),
            parameter: name.clone(),
            location: in_value.clone(),
        })?;

    let kind = match placement {
        Placement::Body => ValueKind::Json,
        _ => ValueKind::from_swagger(
            param.ty.as_deref(),
            param.items.as_ref().and_then(|i| i.ty.as_deref()),
        ),
    };

    let collection_format = match param.collection_format.as_deref() {
        Some(format) => CollectionFormat::from_str(format).map_err(|_| {
            SchemaError::malformed(location, format!("unknown collectionFormat '{format}'"))
        })?,
        None => CollectionFormat::default(),
    };

    let mut descriptor = ParameterDescriptor::new(name, placement)
        .required(param.required)
        .kind(kind)
        .collection_format(collection_format);
    descriptor.description = param.description;
    Ok(descriptor)
}
