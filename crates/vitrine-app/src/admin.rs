//! Administration use cases: dashboard, export and import files

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::info;

use vitrine_domain::model::{Item, Settings, Stats};
use vitrine_domain::repository::CatalogRepository;
use vitrine_domain::service::format_price;
use vitrine_store::{DocumentStore, StorageArea};
use vitrine_types::Result;

const RECENT_ITEMS: usize = 5;

/// Export file name for a given day, e.g. `vitrine-backup-2026-10-17.json`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("vitrine-backup-{}.json", date.format("%Y-%m-%d"))
}

/// What the admin dashboard shows
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub stats: Stats,
    pub recent: Vec<Item>,
    pub settings: Settings,
    pub last_update: DateTime<Utc>,
}

impl std::fmt::Display for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let or_unset = |s: &str| {
            if s.is_empty() {
                "(not set)".to_string()
            } else {
                s.to_string()
            }
        };

        writeln!(f, "Catalog")?;
        writeln!(f, "=======")?;
        writeln!(f, "Vehicles for sale:  {}", self.stats.vehicles_for_sale)?;
        writeln!(f, "Vehicles for rent:  {}", self.stats.vehicles_for_rent)?;
        writeln!(f, "Residences:         {}", self.stats.residences)?;
        writeln!(f, "Reservations:       {}", self.stats.reservations)?;
        writeln!(f, "  pending:          {}", self.stats.pending)?;
        writeln!(f, "  confirmed:        {}", self.stats.confirmed)?;
        writeln!(f, "  cancelled:        {}", self.stats.cancelled)?;
        writeln!(f)?;
        writeln!(f, "Site")?;
        writeln!(f, "====")?;
        writeln!(f, "Name:               {}", or_unset(&self.settings.name))?;
        writeln!(f, "Phone:              {}", or_unset(&self.settings.contact_phone))?;
        writeln!(f, "Email:              {}", or_unset(&self.settings.contact_email))?;
        writeln!(f, "Last update:        {}", self.last_update.to_rfc3339())?;

        if !self.recent.is_empty() {
            writeln!(f)?;
            writeln!(f, "Recently added")?;
            writeln!(f, "==============")?;
            for item in &self.recent {
                writeln!(
                    f,
                    "{:>14}  {:<9}  {}  ({})",
                    item.id(),
                    item.kind(),
                    item.title(),
                    format_price(item.price(), item.category().is_monthly())
                )?;
            }
        }
        Ok(())
    }
}

/// Whole-store administration
pub struct AdminService<'a, S: StorageArea> {
    store: &'a DocumentStore<S>,
}

impl<'a, S: StorageArea> AdminService<'a, S> {
    pub fn new(store: &'a DocumentStore<S>) -> Self {
        Self { store }
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard {
            stats: self.store.stats(),
            recent: self.store.recent_items(RECENT_ITEMS),
            settings: self.store.settings(),
            last_update: self.store.last_update(),
        }
    }

    /// Write the pretty-printed document as `<dir>/vitrine-backup-<date>.json`
    pub fn export_to_dir(&self, dir: &Path, date: NaiveDate) -> Result<PathBuf> {
        let path = dir.join(export_file_name(date));
        self.export_to_file(&path)?;
        Ok(path)
    }

    pub fn export_to_file(&self, path: &Path) -> Result<()> {
        let text = self.store.export_snapshot()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, text)?;
        info!(path = %path.display(), "document exported");
        Ok(())
    }

    /// Replace the whole document with the file's content. Destructive; on a
    /// read or parse error the current document is kept.
    pub fn import_from_file(&self, path: &Path) -> Result<()> {
        let text = std::fs::read_to_string(path)?;
        self.store.import_snapshot(&text)?;
        info!(path = %path.display(), "document imported");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use vitrine_domain::model::{Category, VehicleDraft};
    use vitrine_store::MemoryStorage;

    #[test]
    fn test_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        assert_eq!(export_file_name(date), "vitrine-backup-2026-10-17.json");
    }

    #[test]
    fn test_export_then_import_into_other_store() {
        let dir = tempdir().unwrap();
        let source = DocumentStore::open(MemoryStorage::new()).unwrap();
        source
            .add_vehicle(VehicleDraft::new("Nissan Navara", 21000.0, Category::Sale))
            .unwrap();

        let path = AdminService::new(&source)
            .export_to_dir(dir.path(), NaiveDate::from_ymd_opt(2026, 10, 17).unwrap())
            .unwrap();
        assert!(path.ends_with("vitrine-backup-2026-10-17.json"));

        let target = DocumentStore::open(MemoryStorage::new()).unwrap();
        AdminService::new(&target).import_from_file(&path).unwrap();
        assert_eq!(target.list_all(), source.list_all());
    }

    #[test]
    fn test_import_missing_file_keeps_document() {
        let dir = tempdir().unwrap();
        let store = DocumentStore::open(MemoryStorage::new()).unwrap();
        let before = store.list_all();

        assert!(AdminService::new(&store)
            .import_from_file(&dir.path().join("absent.json"))
            .is_err());
        assert_eq!(store.list_all(), before);
    }

    #[test]
    fn test_dashboard_lists_recent_first() {
        let store = DocumentStore::open(MemoryStorage::new()).unwrap();
        let added = store
            .add_vehicle(VehicleDraft::new("Ford Ranger", 0.0, Category::Rent))
            .unwrap();

        let dashboard = AdminService::new(&store).dashboard();
        assert_eq!(dashboard.recent[0].id(), added.id);
        assert_eq!(dashboard.stats.vehicles_for_rent, 2);
        assert!(dashboard.to_string().contains("Prix sur demande"));
    }
}
