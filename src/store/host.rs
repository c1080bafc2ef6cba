//! The environment the locale store runs in.

use std::fmt;
use std::sync::{
    Mutex,
    MutexGuard,
    PoisonError,
};

use crate::types::Locale;

/// What the store needs from its surroundings.
///
/// In a browser this is `navigator.language`, `document.documentElement.lang`
/// and the router.
pub trait Host: Send + Sync + fmt::Debug {
    /// Preferred language tag of the user agent, e.g. `pt-BR`.
    fn preferred_language(&self) -> Option<String>;

    fn set_document_lang(&self, locale: Locale);

    fn current_path(&self) -> String;

    /// Replaces the current location.
    fn navigate(&self, path: &str);
}

/// Locale detected from the host's preferred language, if supported.
pub fn detected_locale(host: &dyn Host) -> Option<Locale> {
    host.preferred_language().as_deref().and_then(Locale::from_language_tag)
}

/// ブラウザ側の状態の代わり
#[derive(Debug, Default)]
struct HostState {
    /// 現在の URL パス
    path: String,
    /// `<html lang>` 相当
    document_lang: Option<Locale>,
    /// `set_document_lang` の呼び出し履歴
    lang_updates: Vec<Locale>,
    /// `navigate` で遷移したパスの履歴
    navigations: Vec<String>,
}

/// A host without a browser: records document and location changes in memory.
#[derive(Debug)]
pub struct HeadlessHost {
    language: Option<String>,
    state: Mutex<HostState>,
}

impl HeadlessHost {
    #[must_use]
    pub fn new(language: Option<&str>, path: &str) -> Self {
        Self {
            language: language.map(String::from),
            state: Mutex::new(HostState { path: path.to_string(), ..HostState::default() }),
        }
    }

    /// Uses the operating system locale as the preferred language.
    #[must_use]
    pub fn detect(path: &str) -> Self {
        let language = sys_locale::get_locale();
        tracing::debug!("Detected system locale: {:?}", language);
        Self::new(language.as_deref(), path)
    }

    /// 状態のロックを取る
    fn state(&self) -> MutexGuard<'_, HostState> {
        // 記録用の状態なので poison されても中身は使える
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn document_lang(&self) -> Option<Locale> {
        self.state().document_lang
    }

    /// Every value written to the document language, in order.
    #[must_use]
    pub fn lang_updates(&self) -> Vec<Locale> {
        self.state().lang_updates.clone()
    }

    /// Every navigation target, in order.
    #[must_use]
    pub fn navigations(&self) -> Vec<String> {
        self.state().navigations.clone()
    }
}

impl Host for HeadlessHost {
    fn preferred_language(&self) -> Option<String> {
        self.language.clone()
    }

    fn set_document_lang(&self, locale: Locale) {
        let mut state = self.state();
        state.document_lang = Some(locale);
        state.lang_updates.push(locale);
    }

    fn current_path(&self) -> String {
        self.state().path.clone()
    }

    fn navigate(&self, path: &str) {
        tracing::debug!("Navigating to {path}");
        let mut state = self.state();
        state.path = path.to_string();
        state.navigations.push(path.to_string());
    }
}
