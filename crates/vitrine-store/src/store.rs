//! The document store: one JSON document, saved whole on every mutation

use std::cell::RefCell;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use vitrine_domain::model::{Document, Item, Settings, SettingsPatch, Stats};
use vitrine_types::{Error, Result};

use crate::id;
use crate::notifier::{ChangeNotifier, DocumentUpdated, Subscription};
use crate::seed::default_document;
use crate::storage::StorageArea;

/// Storage key of the document
pub const DOCUMENT_KEY: &str = "vitrine.db";

/// Storage key of the on-demand backup copy
pub const BACKUP_KEY: &str = "vitrine.db.backup";

/// Sole owner of the in-memory document and its storage mirror.
///
/// Every mutation goes through [`DocumentStore::save`], which stamps
/// `last_update`, writes the whole document and notifies subscribers. Two
/// stores over the same storage do not coordinate: the last save wins.
pub struct DocumentStore<S: StorageArea> {
    storage: S,
    document: RefCell<Document>,
    notifier: ChangeNotifier,
}

impl<S: StorageArea> DocumentStore<S> {
    /// Load the document from `storage`, or write the sample catalog if
    /// nothing usable is stored
    pub fn open(storage: S) -> Result<Self> {
        let loaded = Self::load(&storage);
        let fresh = loaded.is_none();

        let store = Self {
            storage,
            document: RefCell::new(loaded.unwrap_or_default()),
            notifier: ChangeNotifier::new(),
        };

        if fresh {
            store.initialize_defaults()?;
        }
        Ok(store)
    }

    /// Read and parse the stored document. Missing, unreadable and
    /// unparsable data all come back as `None`.
    pub fn load(storage: &S) -> Option<Document> {
        let text = match storage.get_item(DOCUMENT_KEY) {
            Ok(Some(text)) => text,
            Ok(None) => {
                debug!(key = DOCUMENT_KEY, "no stored document");
                return None;
            }
            Err(e) => {
                warn!(key = DOCUMENT_KEY, error = %e, "storage unreadable, using defaults");
                return None;
            }
        };

        match serde_json::from_str::<Document>(&text) {
            Ok(document) => {
                if let Some(id) = document.duplicate_item_id() {
                    warn!(id, "stored document has duplicate item ids; vehicles shadow residences");
                }
                Some(document)
            }
            Err(e) => {
                warn!(key = DOCUMENT_KEY, error = %e, "stored document corrupt, using defaults");
                None
            }
        }
    }

    /// Stamp `last_update`, write the whole document, then notify
    /// subscribers. On a write error nothing is broadcast and the in-memory
    /// document stays ahead of the stored copy.
    pub fn save(&self) -> Result<DateTime<Utc>> {
        let timestamp = Utc::now();
        let text = {
            let mut document = self.document.borrow_mut();
            document.last_update = timestamp;
            serde_json::to_string(&*document)?
        };

        self.storage.set_item(DOCUMENT_KEY, &text)?;
        debug!(bytes = text.len(), %timestamp, "document saved");

        self.notifier.notify(&DocumentUpdated { timestamp });
        Ok(timestamp)
    }

    /// Replace the document with the sample catalog and persist it
    pub fn initialize_defaults(&self) -> Result<()> {
        *self.document.borrow_mut() = default_document();
        self.save()?;
        info!("document initialized with sample catalog");
        Ok(())
    }

    /// Alias of [`initialize_defaults`](Self::initialize_defaults) for the admin reset
    pub fn reset(&self) -> Result<()> {
        self.initialize_defaults()
    }

    /// Apply `f` to the document and persist the result
    pub(crate) fn mutate<T>(&self, f: impl FnOnce(&mut Document) -> T) -> Result<T> {
        let out = f(&mut self.document.borrow_mut());
        self.save()?;
        Ok(out)
    }

    /// Run `f` against the current document
    pub fn read<T>(&self, f: impl FnOnce(&Document) -> T) -> T {
        f(&self.document.borrow())
    }

    /// Copy of the current document
    pub fn snapshot(&self) -> Document {
        self.document.borrow().clone()
    }

    /// Swap in a new document and persist it
    pub(crate) fn replace(&self, document: Document) -> Result<()> {
        *self.document.borrow_mut() = document;
        self.save()?;
        Ok(())
    }

    /// Next fresh id for an item or reservation in this document
    pub(crate) fn next_id(&self) -> Result<u64> {
        id::next_id(self.read(Document::max_id))
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&DocumentUpdated) + 'static,
    {
        self.notifier.subscribe(listener)
    }

    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    pub fn last_update(&self) -> DateTime<Utc> {
        self.read(|d| d.last_update)
    }

    /// Write a copy of the whole document under [`BACKUP_KEY`]
    pub fn backup(&self) -> Result<()> {
        let text = serde_json::to_string(&*self.document.borrow())?;
        self.storage.set_item(BACKUP_KEY, &text)?;
        info!(bytes = text.len(), "backup written");
        Ok(())
    }

    /// Replace the document with the backup copy. `Ok(false)` if there is
    /// no usable backup; the current document is then left as is and a
    /// corrupt copy is removed.
    pub fn restore_backup(&self) -> Result<bool> {
        let Some(text) = self.storage.get_item(BACKUP_KEY)? else {
            return Ok(false);
        };
        match serde_json::from_str::<Document>(&text) {
            Ok(document) => {
                self.replace(document)?;
                info!("document restored from backup");
                Ok(true)
            }
            Err(e) => {
                warn!(error = %e, "backup copy is corrupt, discarding it");
                self.storage.remove_item(BACKUP_KEY)?;
                Ok(false)
            }
        }
    }

    pub fn settings(&self) -> Settings {
        self.read(|d| d.settings.clone())
    }

    pub fn update_settings(&self, patch: &SettingsPatch) -> Result<Settings> {
        self.mutate(|d| {
            patch.apply(&mut d.settings);
            d.settings.clone()
        })
    }

    pub fn stats(&self) -> Stats {
        self.read(Document::stats)
    }

    /// Flip an item's availability; `Ok(None)` if no item has this id
    pub fn toggle_available(&self, id: u64) -> Result<Option<bool>> {
        let current = self.read(|d| d.find_item(id).map(|item| item.available()));
        let Some(current) = current else {
            return Ok(None);
        };

        self.mutate(|d| {
            if let Some(v) = d.vehicles.iter_mut().find(|v| v.id == id) {
                v.available = !current;
            } else if let Some(r) = d.residences.iter_mut().find(|r| r.id == id) {
                r.available = !current;
            }
        })?;
        Ok(Some(!current))
    }

    /// The `limit` most recently created items, newest first
    pub fn recent_items(&self, limit: usize) -> Vec<Item> {
        let mut items = self.read(Document::items);
        items.sort_by(|a, b| b.id().cmp(&a.id()));
        items.truncate(limit);
        items
    }

    /// Parse a snapshot into a document, rejecting colliding item ids
    pub(crate) fn parse_snapshot(text: &str) -> Result<Document> {
        let document: Document = serde_json::from_str(text)?;
        if let Some(id) = document.duplicate_item_id() {
            return Err(Error::DuplicateId(id));
        }
        Ok(document)
    }
}

impl<S: StorageArea> std::fmt::Debug for DocumentStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stats = self.stats();
        f.debug_struct("DocumentStore")
            .field("stats", &stats)
            .field("notifier", &self.notifier)
            .finish()
    }
}
