//! Key-value persistence sink for the serialized cart.
//!
//! The cart is persisted wholesale under a single string key on every
//! successful mutation, and read back once when a store is constructed.
//! [`Persister`] keeps the medium pluggable: [`FileStore`] writes one JSON
//! file per key under a data directory, [`MemoryStore`] backs tests and
//! ephemeral sessions.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;

/// Errors that can occur reading or writing the persistence sink.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// A synchronous string-keyed key-value store.
///
/// Methods take `&self` so implementations use interior mutability for
/// thread-safe access.
pub trait Persister: Send + Sync {
    /// Retrieve the value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, PersistError>;

    /// Insert or overwrite the value stored under `key`.
    fn put(&self, key: &str, value: &str) -> Result<(), PersistError>;

    /// Remove the value stored under `key`. Removing an absent key is not
    /// an error.
    fn delete(&self, key: &str) -> Result<(), PersistError>;
}

// =============================================================================
// FileStore
// =============================================================================

/// File-backed persister: one JSON file per key under a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a file store rooted at `dir`. The directory is created lazily
    /// on first write.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_key(key)))
    }
}

impl Persister for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<(), PersistError> {
        std::fs::create_dir_all(&self.dir)?;

        // Write-then-rename so readers never observe a half-written payload
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), PersistError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Map a storage key to a filesystem-safe file stem.
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

// =============================================================================
// MemoryStore
// =============================================================================

/// In-memory persister backed by a shared map.
///
/// Cloning yields a handle to the same underlying map, so a "restarted"
/// store can re-read what a previous one wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Persister for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        let entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), PersistError> {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), PersistError> {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("cart").unwrap(), None);

        store.put("cart", "[]").unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[]"));

        store.delete("cart").unwrap();
        assert_eq!(store.get("cart").unwrap(), None);
    }

    #[test]
    fn test_memory_store_clone_shares_entries() {
        let store = MemoryStore::new();
        let handle = store.clone();

        store.put("cart", "[1]").unwrap();
        assert_eq!(handle.get("cart").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_memory_store_delete_absent_key_is_ok() {
        let store = MemoryStore::new();
        assert!(store.delete("missing").is_ok());
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        assert_eq!(store.get("shopcart:cart").unwrap(), None);

        store.put("shopcart:cart", r#"[{"id":1}]"#).unwrap();
        assert_eq!(
            store.get("shopcart:cart").unwrap().as_deref(),
            Some(r#"[{"id":1}]"#)
        );

        store.delete("shopcart:cart").unwrap();
        assert_eq!(store.get("shopcart:cart").unwrap(), None);
    }

    #[test]
    fn test_file_store_overwrites_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.put("cart", "old").unwrap();
        store.put("cart", "new").unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn test_sanitize_key_maps_separators() {
        assert_eq!(sanitize_key("shopcart:cart"), "shopcart-cart");
        assert_eq!(sanitize_key("a/b\\c"), "a-b-c");
        assert_eq!(sanitize_key("plain_key-1"), "plain_key-1");
    }

    #[test]
    fn test_file_store_delete_absent_key_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.delete("missing").is_ok());
    }
}
