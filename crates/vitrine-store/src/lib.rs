//! Persistent document store for the vitrine catalog and reservations
//!
//! The whole application state is a single [`Document`] kept in memory by a
//! [`DocumentStore`] and mirrored, whole, into a [`StorageArea`] on every
//! mutation. The store implements the domain's
//! [`CatalogRepository`](vitrine_domain::repository::CatalogRepository) and
//! [`ReservationLedger`](vitrine_domain::repository::ReservationLedger).
//!
//! [`Document`]: vitrine_domain::model::Document

mod catalog;
mod id;
mod ledger;
pub mod notifier;
pub mod seed;
pub mod storage;
mod store;

pub use id::next_id;
pub use notifier::{ChangeNotifier, DocumentUpdated, Subscription};
pub use seed::default_document;
pub use storage::{FileStorage, MemoryStorage, StorageArea};
pub use store::{DocumentStore, BACKUP_KEY, DOCUMENT_KEY};
