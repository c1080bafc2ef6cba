//! Locale segments in URL paths.
//!
//! A path such as `/pt/dashboard` carries its locale in the first segment.
//! These helpers read, strip and rewrite that segment.

use crate::types::Locale;

/// Returns the locale named by the first path segment, if it is supported.
///
/// Empty segments are skipped, so `//pt/x` still yields `pt`.
///
/// # Examples
/// ```
/// use dashboard_i18n::routing::locale_from_path;
/// use dashboard_i18n::types::Locale;
///
/// assert_eq!(locale_from_path("/pt/dashboard"), Some(Locale::Pt));
/// assert_eq!(locale_from_path("/dashboard"), None);
/// ```
#[must_use]
pub fn locale_from_path(path: &str) -> Option<Locale> {
    let first = path.split('/').find(|segment| !segment.is_empty())?;
    Locale::ALL.into_iter().find(|locale| locale.code() == first)
}

/// Strips the locale segment, returning the logical path.
///
/// Paths without a locale segment are returned unchanged.
#[must_use]
pub fn path_without_locale(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|segment| !segment.is_empty()).collect();

    match segments.split_first() {
        Some((first, rest)) if Locale::ALL.iter().any(|locale| locale.code() == *first) => {
            format!("/{}", rest.join("/"))
        }
        _ => path.to_string(),
    }
}

/// Rewrites `path` so its first segment is `locale`.
///
/// An existing locale segment is replaced; otherwise one is inserted.
/// The root path maps to `/<locale>` without a trailing slash.
#[must_use]
pub fn with_locale(path: &str, locale: Locale) -> String {
    let logical = path_without_locale(path);
    let logical = logical.trim_start_matches('/');

    if logical.is_empty() {
        format!("/{}", locale.code())
    } else {
        format!("/{}/{logical}", locale.code())
    }
}

/// Puts `locale` in front of `path` without touching its segments.
///
/// Unlike [`with_locale`], nothing is stripped: `//pt/x` becomes `/en//pt/x`.
#[must_use]
pub fn prefix_locale(path: &str, locale: Locale) -> String {
    match path {
        "" | "/" => format!("/{}", locale.code()),
        _ if path.starts_with('/') => format!("/{}{path}", locale.code()),
        _ => format!("/{}/{path}", locale.code()),
    }
}

/// True if the path is exactly `/<locale>` or starts with `/<locale>/`.
///
/// Stricter than [`locale_from_path`]: the path must begin with a single slash.
#[must_use]
pub fn has_locale_prefix(path: &str) -> bool {
    Locale::ALL.iter().any(|locale| {
        path.strip_prefix('/')
            .and_then(|rest| rest.strip_prefix(locale.code()))
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("/en", Some(Locale::En))]
    #[case("/pt/dashboard", Some(Locale::Pt))]
    #[case("pt/dashboard", Some(Locale::Pt))]
    #[case("/dashboard/pt", None)]
    #[case("/", None)]
    #[case("", None)]
    #[case("/ptx/dashboard", None)]
    fn test_locale_from_path(#[case] path: &str, #[case] expected: Option<Locale>) {
        assert_that!(locale_from_path(path), eq(expected));
    }

    #[rstest]
    #[case("/pt/dashboard", "/dashboard")]
    #[case("/en", "/")]
    #[case("/en/", "/")]
    #[case("/en/a/b", "/a/b")]
    #[case("/dashboard", "/dashboard")]
    #[case("/", "/")]
    fn test_path_without_locale(#[case] path: &str, #[case] expected: &str) {
        assert_that!(path_without_locale(path), eq(expected));
    }

    #[rstest]
    #[case::replace("/en/dashboard", Locale::Pt, "/pt/dashboard")]
    #[case::insert("/dashboard", Locale::Pt, "/pt/dashboard")]
    #[case::root("/", Locale::En, "/en")]
    #[case::bare_locale("/pt", Locale::En, "/en")]
    #[case::same("/pt/x", Locale::Pt, "/pt/x")]
    fn test_with_locale(#[case] path: &str, #[case] locale: Locale, #[case] expected: &str) {
        assert_that!(with_locale(path, locale), eq(expected));
    }

    #[rstest]
    #[case::root("/", "/pt")]
    #[case::empty("", "/pt")]
    #[case::plain("/dashboard", "/pt/dashboard")]
    #[case::empty_segment_kept("//pt/dashboard", "/pt//pt/dashboard")]
    #[case::trailing_slash("/dashboard/", "/pt/dashboard/")]
    #[case::relative("dashboard", "/pt/dashboard")]
    fn test_prefix_locale(#[case] path: &str, #[case] expected: &str) {
        assert_that!(prefix_locale(path, Locale::Pt), eq(expected));
    }

    #[rstest]
    #[case("/en", true)]
    #[case("/en/dashboard", true)]
    #[case("/pt/", true)]
    #[case("/english", false)]
    #[case("/dashboard", false)]
    #[case("en/dashboard", false)]
    #[case("/", false)]
    fn test_has_locale_prefix(#[case] path: &str, #[case] expected: bool) {
        assert_that!(has_locale_prefix(path), eq(expected));
    }
}
