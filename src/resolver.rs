//! Key-path resolution into nested translation tables.

use serde_json::Value;

/// Outcome of walking a key path through a table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    /// The path ends at a string leaf.
    Found(&'a str),
    /// The path exists but ends at something other than a string, usually a
    /// nested object because the path named a prefix.
    Branch(&'a Value),
    /// Some segment is absent.
    NotFound,
}

impl<'a> Lookup<'a> {
    #[must_use]
    pub const fn as_str(self) -> Option<&'a str> {
        match self {
            Self::Found(s) => Some(s),
            Self::Branch(_) | Self::NotFound => None,
        }
    }

    #[must_use]
    pub const fn is_found(self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Walks `root` one segment at a time.
///
/// Only objects are descended into; arrays and scalars stop the walk.
#[must_use]
pub fn lookup<'a>(root: &'a Value, path: &str, separator: &str) -> Lookup<'a> {
    if path.is_empty() || separator.is_empty() {
        return Lookup::NotFound;
    }

    let mut current = root;
    for segment in path.split(separator) {
        match current.as_object().and_then(|map| map.get(segment)) {
            Some(next) => current = next,
            None => return Lookup::NotFound,
        }
    }

    match current {
        Value::String(s) => Lookup::Found(s),
        other => Lookup::Branch(other),
    }
}

/// Resolves `path` to display text.
///
/// Missing keys fall back to the path itself. A path that stops on a nested
/// object or a non-string scalar yields that value's JSON text.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use dashboard_i18n::resolver::resolve;
///
/// let table = json!({ "dashboard": { "title": "Painel" } });
///
/// assert_eq!(resolve(&table, "dashboard.title", "."), "Painel");
/// assert_eq!(resolve(&table, "dashboard.missing", "."), "dashboard.missing");
/// ```
#[must_use]
pub fn resolve(root: &Value, path: &str, separator: &str) -> String {
    match lookup(root, path, separator) {
        Lookup::Found(s) => s.to_string(),
        Lookup::Branch(value) => value.to_string(),
        Lookup::NotFound => {
            tracing::trace!(path, "Translation key not found");
            path.to_string()
        }
    }
}
