//! The locale store: one current locale, observable by many consumers.
//!
//! The store owns the current [`Locale`] and the translation catalog. Reads
//! go through [`LocaleStore::translate`] and the formatting helpers; writes go
//! through [`LocaleStore::set_locale`], which runs the active strategy's side
//! effects before committing and then notifies every [`LocaleSubscriber`].

pub mod host;
pub mod strategy;
pub mod subscriber;

use std::fmt;
use std::sync::Arc;

use chrono::{
    DateTime,
    TimeZone,
};
use thiserror::Error;
use tokio::sync::watch;

pub use self::host::{
    HeadlessHost,
    Host,
};
pub use self::strategy::{
    LocaleStrategy,
    StorageStrategy,
    UrlPathStrategy,
};
pub use self::subscriber::LocaleSubscriber;
use crate::config::{
    I18nSettings,
    StrategyKind,
};
use crate::format::{
    self,
    DateFormatOptions,
    NumberFormatOptions,
};
use crate::input::storage::{
    FileStorage,
    MemoryStorage,
    PreferenceStorage,
    StorageError,
};
use crate::input::translation::{
    TranslationError,
    Translations,
};
use crate::types::{
    Locale,
    LocaleError,
};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid locale: {0}")]
    InvalidLocale(#[from] LocaleError),

    /// The handle outlived the store that provided it.
    #[error("Locale store is no longer available")]
    ProviderGone,

    #[error("Failed to persist locale: {0}")]
    Storage(#[from] StorageError),

    #[error("Failed to load translations: {0}")]
    Translation(#[from] TranslationError),
}

pub struct LocaleStore {
    translations: Arc<Translations>,
    strategy: Box<dyn LocaleStrategy>,
    host: Arc<dyn Host>,
    key_separator: String,
    state: watch::Sender<Locale>,
}

impl fmt::Debug for LocaleStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocaleStore")
            .field("locale", &self.locale())
            .field("strategy", &self.strategy.kind())
            .field("key_separator", &self.key_separator)
            .finish_non_exhaustive()
    }
}

impl LocaleStore {
    /// Creates a store resolved to the strategy's initial locale.
    ///
    /// The document language is set immediately. Call [`Self::mount`] to
    /// let the strategy consult slower sources.
    #[must_use]
    pub fn new(
        translations: Arc<Translations>,
        strategy: Box<dyn LocaleStrategy>,
        host: Arc<dyn Host>,
        key_separator: impl Into<String>,
    ) -> Arc<Self> {
        let initial = strategy.initial_locale(host.as_ref());
        host.set_document_lang(initial);
        tracing::debug!(locale = %initial, strategy = ?strategy.kind(), "Locale store created");

        let (state, _) = watch::channel(initial);
        Arc::new(Self { translations, strategy, host, key_separator: key_separator.into(), state })
    }

    /// Builds a store from settings: translation source, strategy and storage.
    ///
    /// # Errors
    /// Returns error if the translation directory cannot be loaded.
    pub fn from_settings(
        settings: &I18nSettings,
        host: Arc<dyn Host>,
    ) -> Result<Arc<Self>, StoreError> {
        let translations = match &settings.translations_dir {
            Some(dir) => Translations::load_dir(dir)?,
            None => Translations::embedded()?,
        };

        let strategy: Box<dyn LocaleStrategy> = match settings.strategy {
            StrategyKind::Storage => Box::new(StorageStrategy::new(open_storage(settings))),
            StrategyKind::UrlPath => Box::new(UrlPathStrategy),
        };

        Ok(Self::new(Arc::new(translations), strategy, host, settings.key_separator.clone()))
    }

    /// Lets the strategy settle the locale from its slower sources.
    ///
    /// Hydration never persists or navigates. Returns the resolved locale.
    pub fn mount(&self) -> Locale {
        let Some(resolved) = self.strategy.hydrate(self.host.as_ref()) else {
            return self.locale();
        };

        self.host.set_document_lang(resolved);
        if self.commit(resolved) {
            tracing::info!(locale = %resolved, "Locale resolved on mount");
        }
        resolved
    }

    #[must_use]
    pub fn locale(&self) -> Locale {
        *self.state.borrow()
    }

    #[must_use]
    pub fn strategy_kind(&self) -> StrategyKind {
        self.strategy.kind()
    }

    #[must_use]
    pub fn translations(&self) -> &Translations {
        &self.translations
    }

    #[must_use]
    pub fn key_separator(&self) -> &str {
        &self.key_separator
    }

    /// Switches the locale.
    ///
    /// Returns `Ok(false)` without side effects if `locale` is already
    /// current. Otherwise the strategy persists or navigates first; if that
    /// fails the current locale is left unchanged.
    ///
    /// # Errors
    /// Returns [`StoreError::Storage`] if the choice cannot be persisted.
    pub fn set_locale(&self, locale: Locale) -> Result<bool, StoreError> {
        let previous = self.locale();
        if previous == locale {
            tracing::trace!(locale = %locale, "Locale unchanged");
            return Ok(false);
        }

        self.strategy.apply(locale, self.host.as_ref())?;
        self.host.set_document_lang(locale);
        self.commit(locale);

        tracing::info!(from = %previous, to = %locale, "Locale changed");
        Ok(true)
    }

    /// [`Self::set_locale`] for untrusted input such as a switcher value.
    ///
    /// # Errors
    /// Returns [`StoreError::InvalidLocale`] for codes outside the supported set.
    pub fn set_locale_code(&self, code: &str) -> Result<bool, StoreError> {
        let locale = code.parse::<Locale>()?;
        self.set_locale(locale)
    }

    /// Follows a location change made outside the store (back button, link).
    ///
    /// Only strategies that read the URL react. Nothing is navigated.
    /// Returns true if the locale changed.
    pub fn location_changed(&self, path: &str) -> bool {
        let Some(locale) = self.strategy.locale_from_location(path) else {
            return false;
        };

        let changed = self.commit(locale);
        if changed {
            self.host.set_document_lang(locale);
            tracing::info!(locale = %locale, path, "Locale changed by navigation");
        }
        changed
    }

    /// Resolves `key` in the current locale's table.
    ///
    /// Unknown keys come back verbatim.
    #[must_use]
    pub fn translate(&self, key: &str) -> String {
        self.translations.table(self.locale()).resolve(key, &self.key_separator)
    }

    #[must_use]
    pub fn format_number(&self, value: f64, options: &NumberFormatOptions) -> String {
        format::format_number(value, self.locale().regional_tag(), options)
    }

    #[must_use]
    pub fn format_date<Tz>(&self, value: &DateTime<Tz>, options: &DateFormatOptions) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        format::format_date(value, self.locale().regional_tag(), options)
    }

    #[must_use]
    pub fn subscribe(self: &Arc<Self>) -> LocaleSubscriber {
        LocaleSubscriber::new(self)
    }

    /// Stores `locale` and wakes subscribers if it differs.
    fn commit(&self, locale: Locale) -> bool {
        self.state.send_if_modified(|current| {
            if *current == locale {
                false
            } else {
                *current = locale;
                true
            }
        })
    }
}

/// File storage at the configured or platform path, in-memory when neither exists.
fn open_storage(settings: &I18nSettings) -> Arc<dyn PreferenceStorage> {
    match settings.storage.path.clone().or_else(FileStorage::default_path) {
        Some(path) => Arc::new(FileStorage::new(path)),
        None => {
            tracing::warn!("No preference location available; locale choice will not persist");
            Arc::new(MemoryStorage::new())
        }
    }
}
