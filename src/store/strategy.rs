//! Where the current locale comes from and where changes go.
//!
//! Two strategies exist: [`StorageStrategy`] remembers the choice in
//! preference storage, [`UrlPathStrategy`] keeps it in the first path segment.

use std::fmt;
use std::sync::Arc;

use super::StoreError;
use super::host::{
    Host,
    detected_locale,
};
use crate::config::StrategyKind;
use crate::input::storage::{
    LOCALE_KEY,
    PreferenceStorage,
};
use crate::routing;
use crate::types::Locale;

pub trait LocaleStrategy: Send + Sync + fmt::Debug {
    fn kind(&self) -> StrategyKind;

    /// Locale available synchronously, before the host is consulted in full.
    fn initial_locale(&self, host: &dyn Host) -> Locale;

    /// Locale established once mounted. `None` keeps the initial one.
    fn hydrate(&self, host: &dyn Host) -> Option<Locale>;

    /// Side effects of an explicit locale change, run before it is committed.
    ///
    /// # Errors
    /// Returns error if the change cannot be persisted.
    fn apply(&self, locale: Locale, host: &dyn Host) -> Result<(), StoreError>;

    /// Locale implied by a new location. Strategies ignoring the URL return `None`.
    fn locale_from_location(&self, _path: &str) -> Option<Locale> {
        None
    }
}

/// Locale remembered in preference storage.
///
/// Resolution order on mount: stored code, host language, default.
#[derive(Debug, Clone)]
pub struct StorageStrategy {
    storage: Arc<dyn PreferenceStorage>,
}

impl StorageStrategy {
    #[must_use]
    pub fn new(storage: Arc<dyn PreferenceStorage>) -> Self {
        Self { storage }
    }

    fn stored_locale(&self) -> Option<Locale> {
        match self.storage.get(LOCALE_KEY) {
            Ok(Some(code)) => {
                let locale = Locale::from_code(&code);
                if locale.is_none() {
                    tracing::warn!("Ignoring unsupported stored locale '{code}'");
                }
                locale
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Failed to read stored locale: {e}");
                None
            }
        }
    }
}

impl LocaleStrategy for StorageStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Storage
    }

    fn initial_locale(&self, _host: &dyn Host) -> Locale {
        Locale::DEFAULT
    }

    fn hydrate(&self, host: &dyn Host) -> Option<Locale> {
        let locale = self
            .stored_locale()
            .or_else(|| detected_locale(host))
            .unwrap_or(Locale::DEFAULT);
        Some(locale)
    }

    fn apply(&self, locale: Locale, _host: &dyn Host) -> Result<(), StoreError> {
        self.storage.set(LOCALE_KEY, locale.code())?;
        Ok(())
    }
}

/// Locale carried in the first URL path segment.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlPathStrategy;

impl LocaleStrategy for UrlPathStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::UrlPath
    }

    fn initial_locale(&self, host: &dyn Host) -> Locale {
        routing::locale_from_path(&host.current_path())
            .or_else(|| detected_locale(host))
            .unwrap_or(Locale::DEFAULT)
    }

    fn hydrate(&self, _host: &dyn Host) -> Option<Locale> {
        None
    }

    fn apply(&self, locale: Locale, host: &dyn Host) -> Result<(), StoreError> {
        let target = routing::with_locale(&host.current_path(), locale);
        host.navigate(&target);
        Ok(())
    }

    fn locale_from_location(&self, path: &str) -> Option<Locale> {
        routing::locale_from_path(path)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::input::storage::MemoryStorage;
    use crate::store::host::HeadlessHost;

    fn storage_strategy(storage: MemoryStorage) -> (StorageStrategy, Arc<MemoryStorage>) {
        let storage = Arc::new(storage);
        (StorageStrategy::new(storage.clone()), storage)
    }

    #[rstest]
    #[case::stored_wins(Some("pt"), Some("en-US"), Locale::Pt)]
    #[case::invalid_stored_falls_back(Some("xx"), Some("pt-BR"), Locale::Pt)]
    #[case::detected(None, Some("pt-PT"), Locale::Pt)]
    #[case::unsupported_language(None, Some("fr-FR"), Locale::En)]
    #[case::nothing(None, None, Locale::En)]
    fn storage_hydrate_order(
        #[case] stored: Option<&str>,
        #[case] language: Option<&str>,
        #[case] expected: Locale,
    ) {
        let storage =
            stored.map_or_else(MemoryStorage::new, |code| MemoryStorage::with_entry(LOCALE_KEY, code));
        let (strategy, _) = storage_strategy(storage);
        let host = HeadlessHost::new(language, "/");

        assert_that!(strategy.initial_locale(&host), eq(Locale::DEFAULT));
        assert_that!(strategy.hydrate(&host), some(eq(expected)));
    }

    #[googletest::test]
    fn storage_apply_persists_code() {
        let (strategy, storage) = storage_strategy(MemoryStorage::new());
        let host = HeadlessHost::new(None, "/");

        strategy.apply(Locale::Pt, &host).unwrap();

        expect_that!(storage.get(LOCALE_KEY).unwrap(), some(eq("pt")));
        expect_that!(storage.write_count(), eq(1));
        expect_that!(host.navigations(), is_empty());
    }

    #[rstest]
    #[case::from_path("/pt/dashboard", None, Locale::Pt)]
    #[case::path_over_language("/en", Some("pt-BR"), Locale::En)]
    #[case::language_without_prefix("/dashboard", Some("pt-BR"), Locale::Pt)]
    #[case::default("/", None, Locale::En)]
    fn url_initial_locale(#[case] path: &str, #[case] language: Option<&str>, #[case] expected: Locale) {
        let host = HeadlessHost::new(language, path);

        assert_that!(UrlPathStrategy.initial_locale(&host), eq(expected));
        assert_that!(UrlPathStrategy.hydrate(&host), none());
    }

    #[rstest]
    #[case("/en/dashboard", "/pt/dashboard")]
    #[case("/en", "/pt")]
    #[case("/dashboard", "/pt/dashboard")]
    fn url_apply_navigates(#[case] from: &str, #[case] expected: &str) {
        let host = HeadlessHost::new(None, from);

        UrlPathStrategy.apply(Locale::Pt, &host).unwrap();

        assert_that!(host.current_path(), eq(expected));
    }

    #[googletest::test]
    fn only_url_strategy_reads_location() {
        let (storage, _) = storage_strategy(MemoryStorage::new());

        expect_that!(UrlPathStrategy.locale_from_location("/pt/x"), some(eq(Locale::Pt)));
        expect_that!(UrlPathStrategy.locale_from_location("/x"), none());
        expect_that!(storage.locale_from_location("/pt/x"), none());
    }
}
