//! Path template handling.
//!
//! Path templates use `{param}` placeholders. Substitution is an exact
//! textual replacement of `{name}` by the supplied value.

/// Extracts placeholder names from a path template, in order of appearance.
///
/// ## Examples
///
/// ```
/// use apibind_define::template::extract_path_params;
///
/// assert_eq!(extract_path_params("/versions"), Vec::<&str>::new());
/// assert_eq!(extract_path_params("/versions/{version}"), vec!["version"]);
/// assert_eq!(
///     extract_path_params("/demand-partners/{dpId}/supply-partners/{spId}"),
///     vec!["dpId", "spId"]
/// );
/// ```
pub fn extract_path_params(path: &str) -> Vec<&str> {
    let mut params = Vec::new();
    let mut start = None;

    for (idx, c) in path.char_indices() {
        match c {
            '{' => start = Some(idx + 1),
            '}' => {
                if let Some(pos) = start.take() {
                    let param = &path[pos..idx];
                    if !param.is_empty() {
                        params.push(param);
                    }
                }
            }
            _ => {}
        }
    }

    params
}

/// Substitutes placeholders with their values in a single pass over the
/// template. Values are copied as-is and never rescanned.
///
/// Placeholders without a supplied value are left in place; callers use
/// [`unresolved_placeholders`] to detect them.
///
/// ## Examples
///
/// ```
/// use apibind_define::template::substitute_path_params;
///
/// let path = substitute_path_params("/versions/{version}", &[("version", "42")]);
/// assert_eq!(path, "/versions/42");
/// ```
pub fn substitute_path_params(path: &str, params: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(path.len());
    let mut copied = 0;
    let mut start = None;

    for (idx, c) in path.char_indices() {
        match c {
            '{' => start = Some(idx),
            '}' => {
                if let Some(pos) = start.take() {
                    let name = &path[pos + 1..idx];
                    if let Some((_, value)) = params.iter().find(|(n, _)| *n == name) {
                        result.push_str(&path[copied..pos]);
                        result.push_str(value);
                        copied = idx + 1;
                    }
                }
            }
            _ => {}
        }
    }

    result.push_str(&path[copied..]);
    result
}

/// Returns the placeholders of `path` that are not in `declared`.
///
/// ## Examples
///
/// ```
/// use apibind_define::template::unresolved_placeholders;
///
/// let missing = unresolved_placeholders("/a/{x}/b/{y}", &["x"]);
/// assert_eq!(missing, vec!["y"]);
/// ```
pub fn unresolved_placeholders<'a>(path: &'a str, declared: &[&str]) -> Vec<&'a str> {
    extract_path_params(path)
        .into_iter()
        .filter(|p| !declared.contains(p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_no_params() {
        assert_eq!(extract_path_params("/versions"), Vec::<&str>::new());
        assert_eq!(extract_path_params("/"), Vec::<&str>::new());
        assert_eq!(extract_path_params(""), Vec::<&str>::new());
    }

    #[test]
    fn extract_single_param() {
        assert_eq!(extract_path_params("/rules/{ruleId}"), vec!["ruleId"]);
        assert_eq!(extract_path_params("/{id}"), vec!["id"]);
        assert_eq!(
            extract_path_params("/versions/{version}/qps"),
            vec!["version"]
        );
    }

    #[test]
    fn extract_multiple_params() {
        assert_eq!(
            extract_path_params(
                "/demand-partners/{dpId}/supply-partners/{spId}/types/{spTypeId}/rules/{ruleId}"
            ),
            vec!["dpId", "spId", "spTypeId", "ruleId"]
        );
    }

    #[test]
    fn extract_consecutive_params() {
        assert_eq!(extract_path_params("/{a}/{b}"), vec!["a", "b"]);
        assert_eq!(extract_path_params("/{a}{b}"), vec!["a", "b"]);
    }

    #[test]
    fn extract_ignores_empty_and_unbalanced_braces() {
        assert_eq!(extract_path_params("/{}/x"), Vec::<&str>::new());
        assert_eq!(extract_path_params("/x}/{y}"), vec!["y"]);
        assert_eq!(extract_path_params("/{open"), Vec::<&str>::new());
    }

    #[test]
    fn substitute_multiple_params() {
        assert_eq!(
            substitute_path_params(
                "/demand-partners/{dpId}/supply-partners/{spId}",
                &[("dpId", "abc"), ("spId", "xyz")]
            ),
            "/demand-partners/abc/supply-partners/xyz"
        );
    }

    #[test]
    fn substitute_repeated_placeholder() {
        assert_eq!(
            substitute_path_params("/{id}/copy-of/{id}", &[("id", "7")]),
            "/7/copy-of/7"
        );
    }

    #[test]
    fn substitute_is_verbatim() {
        assert_eq!(
            substitute_path_params("/search/{q}", &[("q", "a b/c")]),
            "/search/a b/c"
        );
    }

    #[test]
    fn substitute_does_not_rescan_values() {
        assert_eq!(
            substitute_path_params("/dp/{dpId}/sp/{spId}", &[("dpId", "{spId}"), ("spId", "x")]),
            "/dp/{spId}/sp/x"
        );
        assert_eq!(
            substitute_path_params("/{a}/{b}", &[("b", "{a}"), ("a", "1")]),
            "/1/{a}"
        );
    }

    #[test]
    fn substitute_keeps_unbalanced_braces() {
        assert_eq!(
            substitute_path_params("/x}/{y}/{open", &[("y", "1")]),
            "/x}/1/{open"
        );
    }

    #[test]
    fn substitute_missing_param_unchanged() {
        assert_eq!(
            substitute_path_params("/versions/{version}", &[]),
            "/versions/{version}"
        );
    }

    #[test]
    fn unresolved_lists_undeclared() {
        assert!(unresolved_placeholders("/a/{x}", &["x"]).is_empty());
        assert_eq!(unresolved_placeholders("/a/{x}/{y}", &[]), vec!["x", "y"]);
    }
}
