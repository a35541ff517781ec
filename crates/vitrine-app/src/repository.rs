//! Opening the persistent store

use std::path::PathBuf;

use tracing::debug;
use vitrine_store::{DocumentStore, FileStorage};
use vitrine_types::Result;

use crate::config::Config;

/// Document store backed by the data directory
pub type Store = DocumentStore<FileStorage>;

/// Open the store in the configured data directory
pub fn open_store(config: &Config) -> Result<Store> {
    open_store_at(config.data_dir()?, config.storage_quota_bytes)
}

/// Open the store in a custom directory
pub fn open_store_at(data_dir: PathBuf, quota: Option<usize>) -> Result<Store> {
    debug!(dir = %data_dir.display(), ?quota, "opening store");
    let mut storage = FileStorage::open(data_dir)?;
    if let Some(bytes) = quota {
        storage = storage.with_quota(bytes);
    }
    DocumentStore::open(storage)
}
