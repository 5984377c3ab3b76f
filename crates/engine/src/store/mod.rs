//! String key-value persistence.
//!
//! Values are replaced whole on every `put`; there is no partial update and no
//! versioning. Callers own the encoding of values.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

mod atomic_io;
mod file_store;

pub use file_store::FileStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid store key '{key}': keys must be non-empty and use [A-Za-z0-9_-]")]
    InvalidKey { key: String },
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to delete '{path}': {source}")]
    Delete {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub trait KeyValueStore {
    fn put(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    /// Removing an absent key is not an error.
    fn delete(&mut self, key: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn put(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        Ok(self.entries.get(key).cloned())
    }

    fn delete(&mut self, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        self.entries.remove(key);
        Ok(())
    }
}

pub(crate) fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey {
            key: key.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_put_get_delete() {
        let mut store = MemoryStore::new();
        store.put("slot_1", "{}").expect("put");
        assert_eq!(store.get("slot_1").expect("get").as_deref(), Some("{}"));

        store.put("slot_1", "[]").expect("overwrite");
        assert_eq!(store.get("slot_1").expect("get").as_deref(), Some("[]"));
        assert_eq!(store.len(), 1);

        store.delete("slot_1").expect("delete");
        assert_eq!(store.get("slot_1").expect("get"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn delete_of_missing_key_is_ok() {
        let mut store = MemoryStore::new();
        assert!(store.delete("never_written").is_ok());
    }

    #[test]
    fn keys_with_path_separators_are_rejected() {
        let mut store = MemoryStore::new();
        let error = store.put("../escape", "x").expect_err("must reject");
        assert!(matches!(error, StoreError::InvalidKey { .. }));
        assert!(matches!(
            store.get(""),
            Err(StoreError::InvalidKey { .. })
        ));
    }
}
