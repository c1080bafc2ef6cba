//! Translation table input definitions

use std::collections::{
    BTreeMap,
    BTreeSet,
};
use std::path::{
    Path,
    PathBuf,
};

use ignore::WalkBuilder;
use serde_json::Value;
use thiserror::Error;

use crate::resolver::{
    self,
    Lookup,
};
use crate::types::Locale;

/// Shipped English table.
const EMBEDDED_EN: &str = include_str!("../../locales/en.json");
/// Shipped Portuguese table.
const EMBEDDED_PT: &str = include_str!("../../locales/pt.json");

#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("Failed to read translation file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse translation JSON from '{origin}': {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Translation table '{origin}' must be a JSON object at the top level")]
    NotAnObject { origin: String },

    #[error("No translation file found for locale '{0}'")]
    MissingLocale(Locale),

    #[error(
        "Locale '{locale}' is defined by both '{}' and '{}'",
        first.display(),
        second.display()
    )]
    DuplicateLocale { locale: Locale, first: PathBuf, second: PathBuf },

    #[error("Failed to walk translation directory: {0}")]
    Walk(#[from] ignore::Error),
}

/// Detect locale from file path heuristically
///
/// Splits the path by '/' and '.', then searches backwards for a part that
/// names a supported locale, optionally followed by a two-letter region.
///
/// # Examples
/// - `locales/en.json` → `en`
/// - `messages/pt-BR.json` → `pt`
/// - `translations/pt_BR/common.json` → `pt`
/// - `locales/en-trans.json` → none
fn detect_locale_from_path(file_path: &Path) -> Option<Locale> {
    let path_str = file_path.to_string_lossy();
    let parts: Vec<&str> = path_str.split(['/', '\\', '.']).collect();

    parts.iter().rev().find_map(|part| {
        let (code, region) = part.split_once(['-', '_']).unwrap_or((*part, ""));
        let region_ok = region.is_empty()
            || (region.len() == 2 && region.chars().all(|c| c.is_ascii_alphabetic()));
        if region_ok { Locale::from_code(code) } else { None }
    })
}

/// One locale's nested key-value structure.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationTable {
    locale: Locale,
    root: Value,
}

impl TranslationTable {
    /// Wraps an already parsed JSON document.
    ///
    /// # Errors
    /// Returns [`TranslationError::NotAnObject`] unless `root` is an object.
    pub fn new(locale: Locale, root: Value, origin: &str) -> Result<Self, TranslationError> {
        if !root.is_object() {
            return Err(TranslationError::NotAnObject { origin: origin.to_string() });
        }
        Ok(Self { locale, root })
    }

    /// Parses a table from JSON text. `origin` names the source in errors.
    ///
    /// # Errors
    /// Returns error if the JSON is malformed or not an object.
    pub fn from_json_str(locale: Locale, text: &str, origin: &str) -> Result<Self, TranslationError> {
        let root: Value = serde_json::from_str(text)
            .map_err(|source| TranslationError::Parse { origin: origin.to_string(), source })?;
        Self::new(locale, root, origin)
    }

    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    #[must_use]
    pub const fn root(&self) -> &Value {
        &self.root
    }

    #[must_use]
    pub fn lookup<'a>(&'a self, path: &str, separator: &str) -> Lookup<'a> {
        resolver::lookup(&self.root, path, separator)
    }

    /// Resolves `path`, falling back to the path itself when absent.
    #[must_use]
    pub fn resolve(&self, path: &str, separator: &str) -> String {
        resolver::resolve(&self.root, path, separator)
    }

    /// Every leaf key path in the table, sorted.
    #[must_use]
    pub fn leaf_keys(&self, separator: &str) -> BTreeSet<String> {
        flatten_json(&self.root, separator, None).into_keys().collect()
    }
}

/// The complete set of tables, one per supported locale.
///
/// Tables are loaded once at startup and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Translations {
    en: TranslationTable,
    pt: TranslationTable,
}

impl Translations {
    /// Builds the catalog from any collection of tables.
    ///
    /// # Errors
    /// Returns [`TranslationError::MissingLocale`] if a supported locale has no table.
    pub fn from_tables(
        tables: impl IntoIterator<Item = TranslationTable>,
    ) -> Result<Self, TranslationError> {
        let mut by_locale: BTreeMap<Locale, TranslationTable> =
            tables.into_iter().map(|table| (table.locale, table)).collect();

        let en = by_locale.remove(&Locale::En).ok_or(TranslationError::MissingLocale(Locale::En))?;
        let pt = by_locale.remove(&Locale::Pt).ok_or(TranslationError::MissingLocale(Locale::Pt))?;

        Ok(Self { en, pt })
    }

    /// The tables compiled into the crate.
    ///
    /// # Errors
    /// Returns error if a shipped table is malformed.
    pub fn embedded() -> Result<Self, TranslationError> {
        Self::from_tables([
            TranslationTable::from_json_str(Locale::En, EMBEDDED_EN, "locales/en.json")?,
            TranslationTable::from_json_str(Locale::Pt, EMBEDDED_PT, "locales/pt.json")?,
        ])
    }

    /// Loads `<dir>/<locale>.json` style files.
    ///
    /// Only the top level of `dir` is scanned. The locale of each file is
    /// detected from its name; files naming no supported locale are skipped.
    ///
    /// # Errors
    /// Returns error on unreadable or malformed files, on two files for the
    /// same locale, and when a locale has no file.
    pub fn load_dir(dir: &Path) -> Result<Self, TranslationError> {
        tracing::debug!(dir = %dir.display(), "Loading translation tables");

        let mut found: BTreeMap<Locale, PathBuf> = BTreeMap::new();

        for result in WalkBuilder::new(dir).max_depth(Some(1)).hidden(true).build() {
            let entry = result?;

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }

            let Some(file_name) = path.file_name() else {
                continue;
            };
            let Some(locale) = detect_locale_from_path(Path::new(file_name)) else {
                tracing::debug!(path = %path.display(), "Skipping file without a locale name");
                continue;
            };

            if let Some(first) = found.get(&locale) {
                let (first, second) = if first.as_path() < path {
                    (first.clone(), path.to_path_buf())
                } else {
                    (path.to_path_buf(), first.clone())
                };
                return Err(TranslationError::DuplicateLocale { locale, first, second });
            }
            found.insert(locale, path.to_path_buf());
        }

        let tables = found
            .into_iter()
            .map(|(locale, path)| load_translation_file(locale, &path))
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_tables(tables)
    }

    #[must_use]
    pub const fn table(&self, locale: Locale) -> &TranslationTable {
        match locale {
            Locale::En => &self.en,
            Locale::Pt => &self.pt,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TranslationTable> {
        Locale::ALL.into_iter().map(|locale| self.table(locale))
    }
}

/// Load a single translation file.
///
/// # Errors
/// Returns error if file read or JSON parse fails.
pub fn load_translation_file(
    locale: Locale,
    file_path: &Path,
) -> Result<TranslationTable, TranslationError> {
    let content = std::fs::read_to_string(file_path)
        .map_err(|source| TranslationError::Io { path: file_path.to_path_buf(), source })?;

    TranslationTable::from_json_str(locale, &content, &file_path.to_string_lossy())
}

/// Flatten nested JSON object into a sorted, dot-separated key map.
///
/// Arrays are indexed as `key[0]`; non-string scalars keep their JSON text.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use dashboard_i18n::input::translation::flatten_json;
///
/// let json = json!({
///     "dashboard": {
///         "title": "Dashboard",
///         "months": { "jan": "Jan" }
///     }
/// });
///
/// let flattened = flatten_json(&json, ".", None);
/// assert_eq!(flattened.get("dashboard.title"), Some(&"Dashboard".to_string()));
/// assert_eq!(flattened.get("dashboard.months.jan"), Some(&"Jan".to_string()));
/// ```
#[must_use]
pub fn flatten_json(
    json: &Value,
    separator: &str,
    prefix: Option<&str>,
) -> BTreeMap<String, String> {
    let mut result = BTreeMap::new();
    flatten_json_value(json, separator, prefix, &mut result);
    result
}

fn flatten_json_value(
    json: &Value,
    separator: &str,
    prefix: Option<&str>,
    result: &mut BTreeMap<String, String>,
) {
    match json {
        Value::Object(map) => {
            for (key, value) in map {
                let full_key =
                    prefix.map_or_else(|| key.clone(), |p| format!("{p}{separator}{key}"));
                flatten_json_value(value, separator, Some(&full_key), result);
            }
        }
        Value::Array(arr) => {
            for (index, value) in arr.iter().enumerate() {
                let full_key =
                    prefix.map_or_else(|| format!("[{index}]"), |p| format!("{p}[{index}]"));
                flatten_json_value(value, separator, Some(&full_key), result);
            }
        }
        Value::String(s) => {
            if let Some(key) = prefix {
                result.insert(key.to_string(), s.clone());
            }
        }
        _ => {
            if let Some(key) = prefix {
                result.insert(key.to_string(), json.to_string());
            }
        }
    }
}
