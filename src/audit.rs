//! Consistency check between translation tables.

use std::fmt;

use crate::input::translation::Translations;
use crate::types::Locale;

/// Keys another table has and `locale`'s table lacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Divergence {
    pub locale: Locale,
    /// The table the keys were found in.
    pub reference: Locale,
    /// Sorted leaf key paths.
    pub missing_keys: Vec<String>,
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' is missing {} key(s) present in '{}': {}",
            self.locale,
            self.missing_keys.len(),
            self.reference,
            self.missing_keys.join(", ")
        )
    }
}

/// Compares every pair of tables by their leaf key paths.
///
/// An empty result means every table defines the same keys.
#[must_use]
pub fn audit(translations: &Translations, separator: &str) -> Vec<Divergence> {
    let key_sets: Vec<_> =
        translations.iter().map(|table| (table.locale(), table.leaf_keys(separator))).collect();

    let mut divergences = Vec::new();
    for (locale, keys) in &key_sets {
        for (reference, reference_keys) in &key_sets {
            if locale == reference {
                continue;
            }

            let missing_keys: Vec<String> = reference_keys.difference(keys).cloned().collect();
            if !missing_keys.is_empty() {
                tracing::debug!(
                    locale = %locale,
                    reference = %reference,
                    count = missing_keys.len(),
                    "Translation table diverges"
                );
                divergences.push(Divergence {
                    locale: *locale,
                    reference: *reference,
                    missing_keys,
                });
            }
        }
    }

    divergences
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::test_utils::create_translations;

    #[googletest::test]
    fn shipped_tables_are_consistent() {
        let translations = Translations::embedded().unwrap();

        expect_that!(audit(&translations, "."), is_empty());
    }

    #[googletest::test]
    fn reports_missing_keys_in_both_directions() {
        let translations = create_translations(
            json!({"common": {"appName": "App", "extra": "x"}}),
            json!({"common": {"appName": "App"}, "home": {"title": "Início"}}),
        );

        let divergences = audit(&translations, ".");

        expect_that!(
            divergences,
            elements_are![
                eq(&Divergence {
                    locale: Locale::En,
                    reference: Locale::Pt,
                    missing_keys: vec!["home.title".to_string()],
                }),
                eq(&Divergence {
                    locale: Locale::Pt,
                    reference: Locale::En,
                    missing_keys: vec!["common.extra".to_string()],
                }),
            ]
        );
    }

    #[googletest::test]
    fn leaf_versus_branch_is_a_divergence() {
        let translations =
            create_translations(json!({"cards": {"label": "Label"}}), json!({"cards": "Cartões"}));

        let divergences = audit(&translations, ".");

        expect_that!(divergences, len(eq(2)));
        expect_that!(
            divergences.first().map(ToString::to_string),
            some(contains_substring("'en' is missing 1 key(s) present in 'pt': cards"))
        );
    }
}
