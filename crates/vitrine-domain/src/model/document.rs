//! The persisted root document and its site settings

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::category::Category;
use super::item::{Item, Residence, Vehicle};
use super::reservation::{Reservation, ReservationStatus};

/// All persisted application state, saved and loaded as one unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub vehicles: Vec<Vehicle>,
    #[serde(default)]
    pub residences: Vec<Residence>,
    #[serde(default)]
    pub reservations: Vec<Reservation>,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default = "Utc::now")]
    pub last_update: DateTime<Utc>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            vehicles: Vec::new(),
            residences: Vec::new(),
            reservations: Vec::new(),
            settings: Settings::default(),
            last_update: Utc::now(),
        }
    }
}

impl Document {
    /// Vehicles then residences, in document order
    pub fn items(&self) -> Vec<Item> {
        self.vehicles
            .iter()
            .cloned()
            .map(Item::Vehicle)
            .chain(self.residences.iter().cloned().map(Item::Residence))
            .collect()
    }

    /// First item with this id, vehicles scanned before residences
    pub fn find_item(&self, id: u64) -> Option<Item> {
        if let Some(v) = self.vehicles.iter().find(|v| v.id == id) {
            return Some(Item::Vehicle(v.clone()));
        }
        self.residences
            .iter()
            .find(|r| r.id == id)
            .map(|r| Item::Residence(r.clone()))
    }

    /// Largest id used by any item or reservation
    pub fn max_id(&self) -> u64 {
        self.vehicles
            .iter()
            .map(|v| v.id)
            .chain(self.residences.iter().map(|r| r.id))
            .chain(self.reservations.iter().map(|r| r.id))
            .max()
            .unwrap_or(0)
    }

    /// First item id that appears more than once across vehicles and residences
    pub fn duplicate_item_id(&self) -> Option<u64> {
        let mut seen = HashSet::new();
        self.vehicles
            .iter()
            .map(|v| v.id)
            .chain(self.residences.iter().map(|r| r.id))
            .find(|id| !seen.insert(*id))
    }

    pub fn stats(&self) -> Stats {
        let count_status = |status: ReservationStatus| {
            self.reservations
                .iter()
                .filter(|r| r.status == status)
                .count()
        };

        Stats {
            vehicles_for_sale: self
                .vehicles
                .iter()
                .filter(|v| v.category == Category::Sale)
                .count(),
            vehicles_for_rent: self
                .vehicles
                .iter()
                .filter(|v| v.category == Category::Rent)
                .count(),
            residences: self.residences.len(),
            reservations: self.reservations.len(),
            pending: count_status(ReservationStatus::Pending),
            confirmed: count_status(ReservationStatus::Confirmed),
            cancelled: count_status(ReservationStatus::Cancelled),
        }
    }
}

/// Opening hours shown on the public pages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessHours {
    pub weekday: String,
    pub saturday: String,
}

/// Site name, contact info and hours
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub name: String,
    pub description: String,
    pub contact_phone: String,
    pub other_phones: Vec<String>,
    pub contact_email: String,
    pub business_hours: BusinessHours,
}

/// Partial update for [`Settings`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub contact_phone: Option<String>,
    pub other_phones: Option<Vec<String>>,
    pub contact_email: Option<String>,
    pub weekday_hours: Option<String>,
    pub saturday_hours: Option<String>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        *self == SettingsPatch::default()
    }

    pub fn apply(&self, settings: &mut Settings) {
        if let Some(ref name) = self.name {
            settings.name = name.clone();
        }
        if let Some(ref description) = self.description {
            settings.description = description.clone();
        }
        if let Some(ref phone) = self.contact_phone {
            settings.contact_phone = phone.clone();
        }
        if let Some(ref phones) = self.other_phones {
            settings.other_phones = phones.clone();
        }
        if let Some(ref email) = self.contact_email {
            settings.contact_email = email.clone();
        }
        if let Some(ref hours) = self.weekday_hours {
            settings.business_hours.weekday = hours.clone();
        }
        if let Some(ref hours) = self.saturday_hours {
            settings.business_hours.saturday = hours.clone();
        }
    }
}

/// Catalog and ledger counters for the admin dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub vehicles_for_sale: usize,
    pub vehicles_for_rent: usize,
    pub residences: usize,
    pub reservations: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub cancelled: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ResidenceDraft, VehicleDraft};

    fn document() -> Document {
        Document {
            vehicles: vec![
                VehicleDraft::new("A", 1.0, Category::Sale).into_vehicle(1),
                VehicleDraft::new("B", 2.0, Category::Rent).into_vehicle(2),
            ],
            residences: vec![ResidenceDraft::new("C", 3.0, "Plateau").into_residence(3)],
            ..Default::default()
        }
    }

    #[test]
    fn test_items_vehicles_first() {
        let titles: Vec<_> = document()
            .items()
            .iter()
            .map(|i| i.title().to_string())
            .collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_find_item_prefers_vehicles() {
        let mut doc = document();
        doc.residences[0].id = 2;
        assert_eq!(doc.find_item(2).map(|i| i.title().to_string()), Some("B".into()));
        assert_eq!(doc.duplicate_item_id(), Some(2));
    }

    #[test]
    fn test_stats() {
        let stats = document().stats();
        assert_eq!(stats.vehicles_for_sale, 1);
        assert_eq!(stats.vehicles_for_rent, 1);
        assert_eq!(stats.residences, 1);
        assert_eq!(stats.reservations, 0);
    }

    #[test]
    fn test_missing_vehicles_is_rejected() {
        let parsed = serde_json::from_str::<Document>(r#"{"residences":[]}"#);
        assert!(parsed.is_err());
        let parsed: Document = serde_json::from_str(r#"{"vehicles":[]}"#).unwrap();
        assert!(parsed.reservations.is_empty());
    }
}
