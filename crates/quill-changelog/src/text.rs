//! Text transforms applied to commit heads
//!
//! Every function here is total: any input string produces an output, and
//! none of them look at configuration.

use std::sync::LazyLock;

use regex::Regex;

/// `(scope)` at the start of a description, with an optional `!`/`:` after it
static SCOPE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(([^)]*)\)[!:]*\s*").expect("Invalid regex"));

/// Lowercase-to-uppercase boundary inside a word
static CASE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("Invalid regex"));

/// File extensions that leak into scopes from file-named commits
static EXTENSION_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(php|md|json|txt|csv)$").expect("Invalid regex"));

/// Uppercase the first character
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Split a leading `(scope)` marker off a description
///
/// Returns the scope as written and the rest of the text. Without a marker
/// the scope is `None` and the text comes back unchanged.
pub fn split_scope(text: &str) -> (Option<&str>, &str) {
    match SCOPE_PREFIX.captures(text) {
        Some(caps) => {
            let whole = caps.get(0).map_or(0, |m| m.end());
            let scope = caps.get(1).map(|m| m.as_str());
            (scope, &text[whole..])
        }
        None => (None, text),
    }
}

/// Turn a raw scope into a heading label
///
/// `user_profile` becomes `User profile`, `apiClient` becomes `Api Client`
/// and `README.md` becomes `README`. Scopes that are blank after cleanup
/// give `None`.
pub fn normalize_context(scope: &str) -> Option<String> {
    let spaced = scope.trim().replace('_', " ");
    let capitalized = capitalize(&spaced);
    let split = CASE_BOUNDARY.replace_all(&capitalized, "${1} ${2}");
    let stripped = EXTENSION_SUFFIX.replace(&split, "");
    let label = stripped.trim();

    if label.is_empty() {
        None
    } else {
        Some(label.to_string())
    }
}

/// Collapse whitespace runs into single spaces and capitalize
pub fn clean_description(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    capitalize(&collapsed)
}

/// Normalized form of a description used to merge duplicate entries
///
/// Lowercases and keeps only `[a-z0-9_-]`.
pub fn dedup_key(description: &str) -> String {
    description
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("add support"), "Add support");
        assert_eq!(capitalize("élan"), "Élan");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_split_scope() {
        assert_eq!(split_scope("(parser): add imports"), (Some("parser"), "add imports"));
        assert_eq!(split_scope("(api)! drop v1"), (Some("api"), "drop v1"));
        assert_eq!(split_scope("() empty scope"), (Some(""), "empty scope"));
        assert_eq!(split_scope("no scope (here)"), (None, "no scope (here)"));
    }


    #[test]
    fn test_normalize_context() {
        assert_eq!(normalize_context("parser").as_deref(), Some("Parser"));
        assert_eq!(normalize_context("user_profile").as_deref(), Some("User profile"));
        assert_eq!(normalize_context("apiClient").as_deref(), Some("Api Client"));
        assert_eq!(normalize_context("README.md").as_deref(), Some("README"));
        assert_eq!(normalize_context("export.CSV").as_deref(), Some("Export"));
        assert_eq!(normalize_context(" settings.json ").as_deref(), Some("Settings"));
        assert_eq!(normalize_context("  "), None);
        assert_eq!(normalize_context(".md"), None);
    }

    #[test]
    fn test_clean_description() {
        assert_eq!(
            clean_description("  add   support\n for\tscoped imports "),
            "Add support for scoped imports"
        );
    }

    #[test]
    fn test_dedup_key() {
        assert_eq!(dedup_key("Fix the Parser!"), "fixtheparser");
        assert_eq!(dedup_key("fix the parser"), "fixtheparser");
        assert_eq!(dedup_key("snake_case and kebab-case"), "snake_caseandkebab-case");
    }
}
