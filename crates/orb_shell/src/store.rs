use std::collections::BTreeMap;
#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access store file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Store contents are not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Browser storage is unavailable")]
    StorageUnavailable,

    #[error("Browser storage rejected {key}: {reason}")]
    StorageRejected { key: String, reason: String },
}

/// Small persistent string map, the fallback used when no host keeps the high
/// score for us.
pub trait KeyValueStore: Send + Sync + 'static {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MemoryStore {
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// JSON file next to the executable's working directory. Every write rewrites
/// the whole file.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    contents: MemoryStore,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    /// Opens the store at `path`. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let contents = match std::fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => MemoryStore::default(),
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.display().to_string(),
                    source,
                });
            }
        };
        Ok(Self { path, contents })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.contents.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.contents.set(key, value)?;
        let text = serde_json::to_string_pretty(&self.contents)?;
        std::fs::write(&self.path, text).map_err(|source| StoreError::Io {
            path: self.path.display().to_string(),
            source,
        })
    }
}

/// The page's `localStorage`.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserStore;

#[cfg(target_arch = "wasm32")]
impl BrowserStore {
    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .ok_or(StoreError::StorageUnavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::storage()?
            .get_item(key)
            .map_err(|err| StoreError::StorageRejected {
                key: key.to_owned(),
                reason: format!("{err:?}"),
            })
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|err| StoreError::StorageRejected {
                key: key.to_owned(),
                reason: format!("{err:?}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_overwrites_values() {
        let mut store = MemoryStore::default();
        assert!(
            store.get("HighScore").unwrap().is_none(),
            "fresh store is empty"
        );
        store.set("HighScore", "3").unwrap();
        store.set("HighScore", "7").unwrap();
        assert_eq!(
            store.get("HighScore").unwrap().as_deref(),
            Some("7"),
            "latest write wins"
        );
    }

    #[test]
    fn file_store_persists_between_opens() {
        let path = std::env::temp_dir().join(format!(
            "orb_shell_store_{}_{}.json",
            std::process::id(),
            unique_suffix()
        ));

        let mut store = FileStore::open(&path).unwrap();
        assert!(
            store.get("HighScore").unwrap().is_none(),
            "missing file opens as an empty store"
        );
        store.set("HighScore", "12").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("HighScore").unwrap().as_deref(),
            Some("12"),
            "value survives a reopen"
        );

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn file_store_rejects_malformed_json() {
        let path = std::env::temp_dir().join(format!(
            "orb_shell_bad_store_{}_{}.json",
            std::process::id(),
            unique_suffix()
        ));
        std::fs::write(&path, "not json").unwrap();

        let result = FileStore::open(&path);
        assert!(
            matches!(result, Err(StoreError::Malformed(_))),
            "garbage on disk is reported, not silently dropped"
        );

        std::fs::remove_file(&path).unwrap();
    }

    fn unique_suffix() -> u128 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos())
            .unwrap_or_default()
    }
}
