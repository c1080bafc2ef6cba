//! Consumer-side handle to a [`LocaleStore`].

use std::fmt;
use std::sync::{
    Arc,
    Weak,
};

use chrono::{
    DateTime,
    TimeZone,
};
use tokio::sync::watch;

use super::{
    LocaleStore,
    StoreError,
};
use crate::format::{
    DateFormatOptions,
    NumberFormatOptions,
};
use crate::types::Locale;

/// A view onto the store from inside the tree it provides for.
///
/// The handle does not keep the store alive. Once the store is dropped every
/// operation fails with [`StoreError::ProviderGone`].
#[derive(Debug, Clone)]
pub struct LocaleSubscriber {
    store: Weak<LocaleStore>,
    receiver: watch::Receiver<Locale>,
}

impl LocaleSubscriber {
    pub(super) fn new(store: &Arc<LocaleStore>) -> Self {
        Self { store: Arc::downgrade(store), receiver: store.state.subscribe() }
    }

    /// The live store, or `ProviderGone` once it has been dropped.
    fn store(&self) -> Result<Arc<LocaleStore>, StoreError> {
        self.store.upgrade().ok_or(StoreError::ProviderGone)
    }

    pub fn locale(&self) -> Result<Locale, StoreError> {
        Ok(self.store()?.locale())
    }

    pub fn translate(&self, key: &str) -> Result<String, StoreError> {
        Ok(self.store()?.translate(key))
    }

    pub fn set_locale(&self, locale: Locale) -> Result<bool, StoreError> {
        self.store()?.set_locale(locale)
    }

    pub fn format_number(
        &self,
        value: f64,
        options: &NumberFormatOptions,
    ) -> Result<String, StoreError> {
        Ok(self.store()?.format_number(value, options))
    }

    pub fn format_date<Tz>(
        &self,
        value: &DateTime<Tz>,
        options: &DateFormatOptions,
    ) -> Result<String, StoreError>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        Ok(self.store()?.format_date(value, options))
    }

    /// True if the locale changed since this handle last looked.
    pub fn has_changed(&self) -> Result<bool, StoreError> {
        self.receiver.has_changed().map_err(|_| StoreError::ProviderGone)
    }

    /// Waits for the next locale change and returns the new locale.
    pub async fn changed(&mut self) -> Result<Locale, StoreError> {
        self.receiver.changed().await.map_err(|_| StoreError::ProviderGone)?;
        Ok(*self.receiver.borrow_and_update())
    }
}
