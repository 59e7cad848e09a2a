//! Rust identifiers for generated items.
//!
//! Operation and parameter names come from the schema and may be keywords,
//! start with digits, or collide once case-converted. Everything generated
//! goes through this module.
//!
//! | Schema name | Generated |
//! |-------------|-----------|
//! | operation `getDemandPartnersByDpId` | method `get_demand_partners_by_dp_id`, struct `GetDemandPartnersByDpIdParams` |
//! | parameter `spTypeId` | field `sp_type_id` |
//! | parameter `type` | field `type_` |
//! | parameter `1st` | field `p_1st` |

use std::collections::HashMap;

use apibind_define::naming::{to_pascal_case, to_snake_case};
use apibind_define::{OperationCatalog, OperationDescriptor};

use crate::errors::GeneratorError;

/// Methods every generated client defines itself.
pub const RESERVED_METHODS: &[&str] = &["new", "with_base_url", "with_cache", "client"];

/// Rust keywords (strict, reserved and 2024-edition) that cannot be plain
/// identifiers.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "Self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Returns `true` if `name` is a Rust keyword.
pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

/// Turns snake_case text into a usable identifier: keywords get a trailing
/// `_`, a leading digit gets a `p_` prefix, empty text becomes `param`.
fn escape(ident: String) -> String {
    if ident.is_empty() {
        return "param".to_string();
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("p_{ident}");
    }
    if is_keyword(&ident) {
        return format!("{ident}_");
    }
    ident
}

/// Field name for a parameter.
///
/// ## Examples
///
/// ```
/// use apibind_gen::naming::field_name;
///
/// assert_eq!(field_name("spTypeId"), "sp_type_id");
/// assert_eq!(field_name("X-Request-Id"), "x_request_id");
/// assert_eq!(field_name("type"), "type_");
/// ```
pub fn field_name(parameter: &str) -> String {
    escape(to_snake_case(parameter))
}

/// Method name for an operation.
pub fn method_name(operation: &str) -> String {
    escape(to_snake_case(operation))
}

/// Params struct name for an operation.
///
/// ## Examples
///
/// ```
/// use apibind_gen::naming::params_struct_name;
///
/// assert_eq!(params_struct_name("getVersionsByVersion", "Params"), "GetVersionsByVersionParams");
/// ```
pub fn params_struct_name(operation: &str, suffix: &str) -> String {
    let base = to_pascal_case(operation);
    if base.starts_with(|c: char| c.is_ascii_digit()) || base.is_empty() {
        format!("Op{base}{suffix}")
    } else {
        format!("{base}{suffix}")
    }
}

/// Checks that every generated identifier is unique where it must be.
///
/// ## Errors
///
/// Returns [`GeneratorError::NamingCollision`] if:
/// - Two parameters of one operation map to the same field
/// - Two operations map to the same method or params struct
/// - A method collides with a client constructor, or a params struct with
///   the client struct
pub fn check_collisions(
    catalog: &OperationCatalog,
    client_name: &str,
    suffix: &str,
) -> Result<(), GeneratorError> {
    let mut methods: HashMap<String, String> = RESERVED_METHODS
        .iter()
        .map(|m| (m.to_string(), "the client itself".to_string()))
        .collect();
    let mut structs: HashMap<String, String> =
        HashMap::from([(client_name.to_string(), "the client struct".to_string())]);

    for op in &catalog.operations {
        check_fields(op)?;

        let method = method_name(&op.name);
        if let Some(existing) = methods.insert(method.clone(), format!("operation '{}'", op.name)) {
            return Err(GeneratorError::NamingCollision {
                operation: op.name.clone(),
                identifier: method,
                existing,
            });
        }

        let params = params_struct_name(&op.name, suffix);
        if let Some(existing) = structs.insert(params.clone(), format!("operation '{}'", op.name)) {
            return Err(GeneratorError::NamingCollision {
                operation: op.name.clone(),
                identifier: params,
                existing,
            });
        }
    }

    Ok(())
}

fn check_fields(op: &OperationDescriptor) -> Result<(), GeneratorError> {
    let mut fields: HashMap<String, &str> = HashMap::new();
    for param in &op.parameters {
        let field = field_name(&param.name);
        if let Some(existing) = fields.insert(field.clone(), &param.name) {
            return Err(GeneratorError::NamingCollision {
                operation: op.name.clone(),
                identifier: field,
                existing: format!("parameter '{existing}'"),
            });
        }
    }
    Ok(())
}
