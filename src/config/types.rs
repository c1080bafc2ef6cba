use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "edge.excludePatterns[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Where the current locale lives between page loads.
///
/// Exactly one strategy is active per process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum StrategyKind {
    /// Durable preference storage plus host language detection.
    Storage,
    /// First URL path segment.
    #[default]
    UrlPath,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct I18nSettings {
    pub strategy: StrategyKind,

    pub key_separator: String,

    /// Directory holding `<locale>.json` tables.
    /// If unset, the tables compiled into the crate are used.
    pub translations_dir: Option<PathBuf>,

    pub storage: StorageConfig,
    pub edge: EdgeConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageConfig {
    /// Preference file. Defaults to the platform config directory.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EdgeConfig {
    /// Request paths the redirect filter never touches (assets, internals).
    pub exclude_patterns: Vec<String>,

    /// Carry the query string over to the redirect target.
    pub preserve_query: bool,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            exclude_patterns: vec![
                "/_next/**".to_string(),
                "/api/**".to_string(),
                "/favicon.ico".to_string(),
                "**/*.{png,jpg,jpeg,gif,svg,ico,webp,css,js,map,txt,woff,woff2}".to_string(),
            ],
            preserve_query: true,
        }
    }
}

impl I18nSettings {
    /// # Errors
    /// - Invalid separator
    /// - Invalid glob pattern
    /// - Empty path
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        }

        if let Some(dir) = &self.translations_dir
            && dir.as_os_str().is_empty()
        {
            errors.push(ValidationError::new(
                "translationsDir",
                "The directory cannot be empty. Remove this field to use the built-in tables",
            ));
        }

        if let Some(path) = &self.storage.path
            && path.as_os_str().is_empty()
        {
            errors.push(ValidationError::new(
                "storage.path",
                "The path cannot be empty. Remove this field to use the default location",
            ));
        }

        for (index, pattern) in self.edge.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("edge.excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            key_separator: ".".to_string(),
            translations_dir: None,
            storage: StorageConfig::default(),
            edge: EdgeConfig::default(),
        }
    }
}
