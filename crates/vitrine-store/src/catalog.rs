//! Catalog repository over the document store

use tracing::{debug, info};

use vitrine_domain::model::{
    Category, Item, ItemPatch, Residence, ResidenceDraft, Vehicle, VehicleDraft,
};
use vitrine_domain::repository::CatalogRepository;
use vitrine_types::Error;

use crate::storage::StorageArea;
use crate::store::DocumentStore;

impl<S: StorageArea> DocumentStore<S> {
    fn vehicles_in(&self, category: Category) -> Vec<Vehicle> {
        self.read(|d| {
            d.vehicles
                .iter()
                .filter(|v| v.category == category)
                .cloned()
                .collect()
        })
    }
}

impl<S: StorageArea> CatalogRepository for DocumentStore<S> {
    fn list_for_sale(&self) -> Vec<Vehicle> {
        self.vehicles_in(Category::Sale)
    }

    fn list_for_rent(&self) -> Vec<Vehicle> {
        self.vehicles_in(Category::Rent)
    }

    fn list_residences(&self) -> Vec<Residence> {
        self.read(|d| d.residences.clone())
    }

    fn list_all(&self) -> Vec<Item> {
        self.read(|d| d.items())
    }

    fn find_by_id(&self, id: u64) -> Option<Item> {
        self.read(|d| d.find_item(id))
    }

    fn add_vehicle(&self, draft: VehicleDraft) -> Result<Vehicle, Error> {
        let vehicle = draft.into_vehicle(self.next_id()?);
        let created = vehicle.clone();
        self.mutate(|d| d.vehicles.push(vehicle))?;
        info!(id = created.id, title = %created.title, "vehicle added");
        Ok(created)
    }

    fn add_residence(&self, draft: ResidenceDraft) -> Result<Residence, Error> {
        let residence = draft.into_residence(self.next_id()?);
        let created = residence.clone();
        self.mutate(|d| d.residences.push(residence))?;
        info!(id = created.id, title = %created.title, "residence added");
        Ok(created)
    }

    fn update_item(&self, id: u64, patch: &ItemPatch) -> Result<bool, Error> {
        if self.find_by_id(id).is_none() {
            debug!(id, "update: no such item");
            return Ok(false);
        }

        self.mutate(|d| {
            if let Some(v) = d.vehicles.iter_mut().find(|v| v.id == id) {
                patch.apply_to_vehicle(v);
            } else if let Some(r) = d.residences.iter_mut().find(|r| r.id == id) {
                patch.apply_to_residence(r);
            }
        })?;
        info!(id, "item updated");
        Ok(true)
    }

    fn delete_item(&self, id: u64) -> Result<bool, Error> {
        let location = self.read(|d| {
            d.vehicles
                .iter()
                .position(|v| v.id == id)
                .map(|i| (true, i))
                .or_else(|| d.residences.iter().position(|r| r.id == id).map(|i| (false, i)))
        });
        let Some((is_vehicle, index)) = location else {
            debug!(id, "delete: no such item");
            return Ok(false);
        };

        self.mutate(|d| {
            if is_vehicle {
                d.vehicles.remove(index);
            } else {
                d.residences.remove(index);
            }
        })?;
        info!(id, "item deleted");
        Ok(true)
    }

    fn export_snapshot(&self) -> Result<String, Error> {
        Ok(self.read(|d| serde_json::to_string_pretty(d))?)
    }

    fn import_snapshot(&self, text: &str) -> Result<(), Error> {
        let document = Self::parse_snapshot(text)?;
        let counts = (
            document.vehicles.len(),
            document.residences.len(),
            document.reservations.len(),
        );
        self.replace(document)?;
        info!(
            vehicles = counts.0,
            residences = counts.1,
            reservations = counts.2,
            "snapshot imported"
        );
        Ok(())
    }
}
