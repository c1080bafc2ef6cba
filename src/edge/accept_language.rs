//! `Accept-Language` parsing.

use crate::types::{
    Locale,
    primary_subtag,
};

/// One entry of an `Accept-Language` header.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguagePreference {
    /// Lowercased primary subtag (`pt` for `pt-BR`).
    pub language: String,
    pub weight: f32,
}

/// Parses a header into preferences ordered by descending weight.
///
/// Entries with equal weight keep their header order. A missing weight is
/// 1.0; an unparsable one, or one outside `0.0..=1.0` (`nan`, `inf`), is 0.0.
/// Empty entries are dropped.
#[must_use]
pub fn parse_accept_language(header: &str) -> Vec<LanguagePreference> {
    let mut preferences: Vec<LanguagePreference> = header
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split(';');
            let tag = parts.next().unwrap_or_default().trim();
            if tag.is_empty() {
                return None;
            }

            let weight = parts
                .find_map(|param| param.trim().strip_prefix("q="))
                .map_or(1.0, |q| parse_weight(q.trim()));

            Some(LanguagePreference { language: primary_subtag(tag).to_ascii_lowercase(), weight })
        })
        .collect();

    // sort_by is stable
    preferences.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    preferences
}

fn parse_weight(q: &str) -> f32 {
    q.parse::<f32>().ok().filter(|q| q.is_finite() && (0.0..=1.0).contains(q)).unwrap_or(0.0)
}

/// First supported language of the header, if any.
#[must_use]
pub fn negotiate(header: &str) -> Option<Locale> {
    parse_accept_language(header)
        .iter()
        .find_map(|preference| Locale::from_code(&preference.language))
}

/// [`negotiate`] with the default locale as fallback.
#[must_use]
pub fn preferred_locale(header: Option<&str>) -> Locale {
    header.and_then(negotiate).unwrap_or(Locale::DEFAULT)
}
