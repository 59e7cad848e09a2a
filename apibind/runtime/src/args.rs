//! The argument bag passed to a binding.
//!
//! Arguments are keyed by the declared parameter name. A JSON `null` is the
//! same as leaving the argument out.

use apibind_define::CollectionFormat;
use serde_json::{Map, Value};

/// Parameter values for one invocation, keyed by declared parameter name.
///
/// ## Examples
///
/// ```
/// use apibind_runtime::Args;
/// use serde_json::json;
///
/// let args = Args::new()
///     .with("dpId", "abc")
///     .with("limit", 10)
///     .with("tags", json!(["a", "b"]));
///
/// assert_eq!(args.get("dpId"), Some(&json!("abc")));
/// assert!(args.get("offset").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    values: Map<String, Value>,
}

impl Args {
    /// Creates an empty argument bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an argument, replacing any previous value under the same name.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts an argument in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// Returns the value for `name`, treating `null` as absent.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name).filter(|v| !v.is_null())
    }

    /// Returns `true` if a non-null value is present for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of entries, including explicit nulls.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the bag holds no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Builds an argument bag from a JSON object. Returns `None` for any
    /// other JSON value.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(values) => Some(Self { values }),
            _ => None,
        }
    }
}

impl From<Map<String, Value>> for Args {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Args {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut args = Self::new();
        for (k, v) in iter {
            args.insert(k, v);
        }
        args
    }
}

/// Renders a single value as text: strings verbatim, everything else as
/// JSON text.
pub(crate) fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Renders a value as one string, joining array items with `separator`.
pub(crate) fn render_joined(value: &Value, separator: &str) -> String {
    match value {
        Value::Array(items) => items
            .iter()
            .map(render_scalar)
            .collect::<Vec<_>>()
            .join(separator),
        other => render_scalar(other),
    }
}

/// Expands a value into key/value pairs for a query string or form body.
///
/// Arrays become one pair per item in list order for
/// [`CollectionFormat::Multi`], or a single joined pair otherwise.
pub(crate) fn expand_pairs(
    name: &str,
    value: &Value,
    format: CollectionFormat,
) -> Vec<(String, String)> {
    match (value, format.separator()) {
        (Value::Array(items), None) => items
            .iter()
            .filter(|v| !v.is_null())
            .map(|v| (name.to_string(), render_scalar(v)))
            .collect(),
        (Value::Array(_), Some(sep)) => vec![(name.to_string(), render_joined(value, sep))],
        (other, _) => vec![(name.to_string(), render_scalar(other))],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_counts_as_absent() {
        let args = Args::new().with("dpId", Value::Null).with("spId", "x");
        assert!(!args.contains("dpId"));
        assert!(args.contains("spId"));
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn test_from_value_requires_object() {
        assert!(Args::from_value(json!({"a": 1})).is_some());
        assert!(Args::from_value(json!([1, 2])).is_none());
    }

    #[test]
    fn test_render_scalar() {
        assert_eq!(render_scalar(&json!("abc")), "abc");
        assert_eq!(render_scalar(&json!(42)), "42");
        assert_eq!(render_scalar(&json!(true)), "true");
        assert_eq!(render_scalar(&json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn test_multi_expands_in_order() {
        let pairs = expand_pairs("tags", &json!(["a", "b"]), CollectionFormat::Multi);
        assert_eq!(
            pairs,
            vec![
                ("tags".to_string(), "a".to_string()),
                ("tags".to_string(), "b".to_string())
            ]
        );
    }

    #[test]
    fn test_separator_formats_join() {
        let value = json!(["a", "b", 3]);
        assert_eq!(
            expand_pairs("ids", &value, CollectionFormat::Csv),
            vec![("ids".to_string(), "a,b,3".to_string())]
        );
        assert_eq!(
            expand_pairs("ids", &value, CollectionFormat::Pipes),
            vec![("ids".to_string(), "a|b|3".to_string())]
        );
    }

    #[test]
    fn test_scalar_ignores_collection_format() {
        assert_eq!(
            expand_pairs("limit", &json!(10), CollectionFormat::Multi),
            vec![("limit".to_string(), "10".to_string())]
        );
    }
}
