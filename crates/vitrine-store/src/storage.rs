//! Key-value storage areas the document is mirrored into
//!
//! A storage area maps string keys to string values, like a browser's local
//! storage. [`FileStorage`] keeps one JSON file per key in a directory;
//! [`MemoryStorage`] keeps values in memory and is shared between clones,
//! which lets several stores observe the same area.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use vitrine_types::StorageError;

/// Synchronous string key-value storage
pub trait StorageArea {
    /// Read a value; `Ok(None)` if the key is absent
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value stored under `key`
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a key; `Ok(false)` if it was absent
    fn remove_item(&self, key: &str) -> Result<bool, StorageError>;
}

fn check_quota(quota: Option<usize>, key: &str, value: &str) -> Result<(), StorageError> {
    match quota {
        Some(quota) if value.len() > quota => Err(StorageError::QuotaExceeded {
            key: key.to_string(),
            len: value.len(),
            quota,
        }),
        _ => Ok(()),
    }
}

/// Directory-backed storage: `<dir>/<key>.json` per key
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
    quota: Option<usize>,
}

impl FileStorage {
    /// Open (creating if needed) a storage directory
    pub fn open(dir: PathBuf) -> Result<Self, StorageError> {
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir, quota: None })
    }

    /// Reject values larger than `bytes`
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that holds `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageArea for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        check_quota(self.quota, key, value)?;

        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        let io_err = |source| StorageError::Io {
            key: key.to_string(),
            source,
        };

        // Replace in one rename so a failed write keeps the previous copy
        fs::write(&tmp, value).map_err(io_err)?;
        fs::rename(&tmp, &path).map_err(io_err)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<bool, StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}

/// In-memory storage; clones share the same entries
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject values larger than `bytes`
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl StorageArea for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        check_quota(self.quota, key, value)?;
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.items.borrow_mut().remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_storage_roundtrip() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::open(dir.path().join("data")).unwrap();

        assert_eq!(storage.get_item("k").unwrap(), None);
        storage.set_item("k", "{\"a\":1}").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("{\"a\":1}"));
        assert!(storage.path_for("k").exists());
        assert!(!dir.path().join("data").join("k.json.tmp").exists());

        assert!(storage.remove_item("k").unwrap());
        assert!(!storage.remove_item("k").unwrap());
    }

    #[test]
    fn test_quota_keeps_previous_value() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::open(dir.path().to_path_buf())
            .unwrap()
            .with_quota(8);

        storage.set_item("k", "short").unwrap();
        let err = storage.set_item("k", "much too long").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { len: 13, quota: 8, .. }));
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("short"));
    }

    #[test]
    fn test_memory_clones_share_entries() {
        let a = MemoryStorage::new();
        let b = a.clone();
        a.set_item("k", "v").unwrap();
        assert_eq!(b.get_item("k").unwrap().as_deref(), Some("v"));
        assert_eq!(b.len(), 1);
    }
}
