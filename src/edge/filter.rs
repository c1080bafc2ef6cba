//! Per-request locale prefix enforcement.

use super::accept_language::preferred_locale;
use crate::routing::{
    has_locale_prefix,
    prefix_locale,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterDecision {
    PassThrough,
    /// Redirect to this path. Query strings are the caller's concern.
    RedirectTo(String),
}

/// Decides whether `path` needs a locale prefix.
///
/// Paths already prefixed pass through. Anything else is redirected to the
/// original path, unchanged, under the best locale from `accept_language`.
#[must_use]
pub fn filter(path: &str, accept_language: Option<&str>) -> FilterDecision {
    if has_locale_prefix(path) {
        return FilterDecision::PassThrough;
    }

    let locale = preferred_locale(accept_language);
    FilterDecision::RedirectTo(prefix_locale(path, locale))
}
