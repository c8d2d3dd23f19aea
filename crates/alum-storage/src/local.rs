//! JSON-file-backed key/value store.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use alum_config::StorageConfig;
use alum_core::state::KeyValueStore;

use crate::error::StorageError;

const STORE_FILE_NAME: &str = "local_store.json";

/// String key/value store. Every write rewrites the backing file; there is
/// no journaling and concurrent processes may overwrite each other.
pub struct LocalStore {
    path: Option<PathBuf>,
    entries: Mutex<BTreeMap<String, String>>,
}

impl LocalStore {
    /// A store that lives only for the lifetime of the process.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: Mutex::new(BTreeMap::new()),
        }
    }

    /// Open (or start) the store file at `path`.
    ///
    /// A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the file exists but cannot be read or is
    /// not a JSON object of strings.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = if path.exists() {
            let contents = fs::read_to_string(&path).map_err(|source| StorageError::Io {
                path: path.display().to_string(),
                source,
            })?;
            if contents.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&contents).map_err(|source| StorageError::Corrupt {
                    path: path.display().to_string(),
                    source,
                })?
            }
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path: Some(path),
            entries: Mutex::new(entries),
        })
    }

    /// Open the store in the configured storage directory.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NoDirectory`] when no directory can be
    /// resolved, or any error from [`Self::open`].
    pub fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
        let dir = config.resolved_dir().ok_or(StorageError::NoDirectory)?;
        Self::open(dir.join(STORE_FILE_NAME))
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// All keys currently stored, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.entries
            .lock()
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(entries).map_err(|source| StorageError::Corrupt {
            path: path.display().to_string(),
            source,
        })?;
        fs::write(path, json).map_err(|source| StorageError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    fn mutate(&self, f: impl FnOnce(&mut BTreeMap<String, String>)) {
        let Ok(mut entries) = self.entries.lock() else {
            tracing::warn!("local store lock poisoned; write dropped");
            return;
        };
        f(&mut entries);
        if let Err(error) = self.persist(&entries) {
            tracing::warn!(%error, "failed to persist local store");
        }
    }
}

impl KeyValueStore for LocalStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.mutate(|entries| {
            entries.insert(key.to_string(), value.to_string());
        });
    }

    fn remove_item(&self, key: &str) {
        self.mutate(|entries| {
            entries.remove(key);
        });
    }
}
