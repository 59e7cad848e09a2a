//! Deterministic naming for operations and generated identifiers.
//!
//! Operation names come from the schema's `operationId` when present and
//! are otherwise derived from verb + path:
//!
//! | Verb | Path | Name |
//! |------|------|------|
//! | get | `/versions/{version}` | `getVersionsByVersion` |
//! | post | `/demand-partners` | `postDemandPartners` |
//! | get | `/demand-partners/{dpId}/supply-partners` | `getDemandPartnersByDpIdSupplyPartners` |
//! | get | `/` | `get` |

use crate::types::HttpVerb;

/// Derives an operation name from its verb and path template.
///
/// Each `{x}` segment becomes `by` + `X`, and the segments are camel-cased
/// across any non-alphanumeric separator.
///
/// ## Examples
///
/// ```
/// use apibind_define::HttpVerb;
/// use apibind_define::naming::derive_operation_name;
///
/// assert_eq!(
///     derive_operation_name(HttpVerb::Get, "/versions/{version}"),
///     "getVersionsByVersion"
/// );
/// assert_eq!(
///     derive_operation_name(HttpVerb::Post, "/versions/{version}/createDraft"),
///     "postVersionsByVersionCreateDraft"
/// );
/// ```
pub fn derive_operation_name(verb: HttpVerb, path: &str) -> String {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return verb.as_lower().to_string();
    }

    let joined = trimmed
        .split('/')
        .map(|segment| match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            Some(inner) => format!("by{}", upper_first(inner)),
            None => segment.to_string(),
        })
        .collect::<Vec<_>>()
        .join("-");

    format!("{}{}", verb.as_lower(), to_pascal_case(&joined))
}

/// Normalizes a schema `operationId` into a usable operation name.
///
/// Dots, dashes, braces and whitespace become underscores.
///
/// ## Examples
///
/// ```
/// use apibind_define::naming::normalize_operation_id;
///
/// assert_eq!(normalize_operation_id("rules.list-all"), "rules_list_all");
/// assert_eq!(normalize_operation_id("getUser"), "getUser");
/// ```
pub fn normalize_operation_id(id: &str) -> String {
    id.trim()
        .chars()
        .map(|c| match c {
            '.' | '-' | '{' | '}' => '_',
            c if c.is_whitespace() => '_',
            c => c,
        })
        .collect()
}

/// Converts any identifier-ish text to `snake_case`.
///
/// ## Examples
///
/// ```
/// use apibind_define::naming::to_snake_case;
///
/// assert_eq!(to_snake_case("getDemandPartnersByDpId"), "get_demand_partners_by_dp_id");
/// assert_eq!(to_snake_case("spTypeId"), "sp_type_id");
/// assert_eq!(to_snake_case("X-Request-ID"), "x_request_id");
/// ```
pub fn to_snake_case(s: &str) -> String {
    words(s)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Converts any identifier-ish text to `PascalCase`.
///
/// ## Examples
///
/// ```
/// use apibind_define::naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("getVersionsByVersion"), "GetVersionsByVersion");
/// assert_eq!(to_pascal_case("Rules API"), "RulesApi");
/// assert_eq!(to_pascal_case("demand-partners"), "DemandPartners");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    words(s)
        .iter()
        .map(|w| upper_first(&w.to_lowercase()))
        .collect()
}

/// Splits text into words on non-alphanumeric separators and CamelCase boundaries.
fn words(s: &str) -> Vec<&str> {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|piece| !piece.is_empty())
        .flat_map(split_camel_case)
        .collect()
}

/// Splits a CamelCase string into individual words.
///
/// - "getVersions" -> ["get", "Versions"]
/// - "HTTPClient" -> ["HTTP", "Client"]
/// - "dpId" -> ["dp", "Id"]
fn split_camel_case(s: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut word_start = 0;
    let chars: Vec<(usize, char)> = s.char_indices().collect();

    for i in 1..chars.len() {
        let (offset, current) = chars[i];
        let prev = chars[i - 1].1;

        // "dpId" -> "dp", "Id"; "HTTPClient" -> "HTTP", "Client"
        let is_new_word = current.is_uppercase()
            && (prev.is_lowercase()
                || prev.is_ascii_digit()
                || (i + 1 < chars.len() && chars[i + 1].1.is_lowercase() && prev.is_uppercase()));

        if is_new_word {
            if offset > word_start {
                words.push(&s[word_start..offset]);
            }
            word_start = offset;
        }
    }

    if word_start < s.len() {
        words.push(&s[word_start..]);
    }

    words
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
