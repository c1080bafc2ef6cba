//! Core types used throughout the project.

use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocaleError {
    #[error("Unsupported locale '{0}'. Supported locales: en, pt")]
    Unsupported(String),
}

/// A locale supported by the dashboard.
///
/// The set is closed: adding a locale means adding a variant, a translation
/// table and a regional tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Pt,
}

impl Locale {
    /// Every supported locale, default first.
    pub const ALL: [Self; 2] = [Self::En, Self::Pt];

    pub const DEFAULT: Self = Self::En;

    /// The short code used in URLs, storage and translation file names.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Pt => "pt",
        }
    }

    /// Native name shown by the language switcher.
    #[must_use]
    pub const fn native_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Pt => "Português",
        }
    }

    #[must_use]
    pub const fn regional_tag(self) -> RegionalTag {
        match self {
            Self::En => RegionalTag::EnUs,
            Self::Pt => RegionalTag::PtBr,
        }
    }

    /// Exact code match, case-insensitive. Region suffixes are not accepted here.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|locale| locale.code().eq_ignore_ascii_case(code.trim()))
    }

    /// Matches the primary subtag of a BCP 47-ish tag.
    ///
    /// `pt-BR`, `pt_PT` and `PT` all map to [`Locale::Pt`].
    #[must_use]
    pub fn from_language_tag(tag: &str) -> Option<Self> {
        Self::from_code(primary_subtag(tag))
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| LocaleError::Unsupported(s.to_string()))
    }
}

/// Returns the primary language subtag of a tag like `pt-BR` or `en_US`.
#[must_use]
pub fn primary_subtag(tag: &str) -> &str {
    tag.trim().split(['-', '_']).next().unwrap_or_default()
}

/// Fully-qualified regional tag selecting number and date conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionalTag {
    EnUs,
    PtBr,
}

impl RegionalTag {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::PtBr => "pt-BR",
        }
    }

    /// Digit grouping and decimal conventions.
    #[must_use]
    pub const fn num_locale(self) -> num_format::Locale {
        match self {
            Self::EnUs => num_format::Locale::en,
            Self::PtBr => num_format::Locale::pt,
        }
    }

    /// Locale used by chrono's localized formatting.
    #[must_use]
    pub const fn chrono_locale(self) -> chrono::Locale {
        match self {
            Self::EnUs => chrono::Locale::en_US,
            Self::PtBr => chrono::Locale::pt_BR,
        }
    }
}

impl fmt::Display for RegionalTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
