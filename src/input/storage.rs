//! Durable locale preference storage.

use std::collections::BTreeMap;
use std::path::{
    Path,
    PathBuf,
};
use std::sync::Mutex;

use thiserror::Error;

/// Key under which the chosen locale code is stored.
pub const LOCALE_KEY: &str = "locale";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to access preference file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Preference file '{}' is not a JSON object of strings: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Preference storage lock was poisoned")]
    Poisoned,
}

/// String key-value storage that survives restarts.
pub trait PreferenceStorage: Send + Sync + std::fmt::Debug {
    /// Reads a value. `Ok(None)` means the key was never written.
    ///
    /// # Errors
    /// Returns error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes a value, replacing any previous one.
    ///
    /// # Errors
    /// Returns error if the backing store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Preferences kept as a flat JSON object in a single file.
///
/// The file is read on every `get` and rewritten on every `set`; there is
/// exactly one key in practice.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileStorage {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path, write_lock: Mutex::new(()) }
    }

    /// `<config dir>/dashboard-i18n/preferences.json`, if the platform has a config dir.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("dashboard-i18n").join("preferences.json"))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whole file as a map. A missing file is an empty map.
    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => return Err(StorageError::Io { path: self.path.clone(), source }),
        };

        serde_json::from_str(&content)
            .map_err(|source| StorageError::Parse { path: self.path.clone(), source })
    }
}

impl PreferenceStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().map_err(|_| StorageError::Poisoned)?;

        // 壊れたファイルは空として扱い、上書きで復旧する
        let mut entries = match self.read_all() {
            Err(StorageError::Parse { source, .. }) => {
                tracing::warn!(path = %self.path.display(), "Overwriting unreadable preference file: {source}");
                BTreeMap::new()
            }
            other => other?,
        };
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|source| StorageError::Io { path: parent.to_path_buf(), source })?;
        }

        let json = serde_json::to_string_pretty(&entries)
            .map_err(|source| StorageError::Parse { path: self.path.clone(), source })?;
        write_atomic(&self.path, &json)
            .map_err(|source| StorageError::Io { path: self.path.clone(), source })?;

        tracing::debug!(path = %self.path.display(), key, "Preference saved");
        Ok(())
    }
}

/// Writes through a sibling `.tmp` file and renames it over `path`, so a
/// crash never leaves a half-written preference file behind.
fn write_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    let temp_path = path.with_extension("json.tmp");
    std::fs::write(&temp_path, content)?;

    if let Err(e) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e);
    }
    Ok(())
}

/// In-process storage. Counts writes so callers can observe persistence.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
    writes: Mutex<usize>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with one entry.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        if let Ok(mut entries) = storage.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        storage
    }

    /// Number of successful `set` calls.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.lock().map_or(0, |writes| *writes)
    }
}

impl PreferenceStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        drop(entries);

        let mut writes = self.writes.lock().map_err(|_| StorageError::Poisoned)?;
        *writes += 1;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    #[rstest]
    fn file_storage_missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("prefs.json"));

        assert_that!(storage.get(LOCALE_KEY).unwrap(), none());
    }

    #[rstest]
    fn file_storage_round_trips_and_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("prefs.json");
        let storage = FileStorage::new(path.clone());

        storage.set(LOCALE_KEY, "pt").unwrap();

        assert_that!(storage.get(LOCALE_KEY).unwrap(), some(eq("pt")));
        assert_that!(fs::read_to_string(path).unwrap(), contains_substring("\"locale\": \"pt\""));
    }

    #[rstest]
    fn file_storage_keeps_other_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, r#"{"theme": "dark"}"#).unwrap();
        let storage = FileStorage::new(path);

        storage.set(LOCALE_KEY, "en").unwrap();

        assert_that!(storage.get("theme").unwrap(), some(eq("dark")));
        assert_that!(storage.get(LOCALE_KEY).unwrap(), some(eq("en")));
    }

    #[rstest]
    fn file_storage_rejects_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "not json").unwrap();
        let storage = FileStorage::new(path);

        let result = storage.get(LOCALE_KEY);

        assert!(matches!(result, Err(StorageError::Parse { .. })));
    }

    #[googletest::test]
    fn file_storage_set_recovers_truncated_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, r#"{"locale": "p"#).unwrap();
        let storage = FileStorage::new(path);

        storage.set(LOCALE_KEY, "pt").unwrap();

        expect_that!(storage.get(LOCALE_KEY).unwrap(), some(eq("pt")));
        expect_that!(dir.path().join("prefs.json.tmp").exists(), eq(false));
    }

    #[rstest]
    fn memory_storage_counts_writes() {
        let storage = MemoryStorage::with_entry(LOCALE_KEY, "en");

        storage.set(LOCALE_KEY, "pt").unwrap();
        storage.set(LOCALE_KEY, "en").unwrap();

        assert_eq!(storage.write_count(), 2);
        assert_eq!(storage.get(LOCALE_KEY).unwrap().as_deref(), Some("en"));
    }
}
