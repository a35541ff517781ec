//! Repository trait definitions for the catalog and the reservation ledger
//!
//! Every mutating method persists the whole document before returning.
//! Lookup misses are `None` / `false`, never errors; `Err` means the
//! mutation could not be made durable (or the input could not be parsed).

use crate::model::{
    Item, ItemPatch, NewReservation, Reservation, ReservationStatus, Residence, ResidenceDraft,
    Vehicle, VehicleDraft,
};
use vitrine_types::Error;

/// Typed access to vehicles and residences
pub trait CatalogRepository {
    /// Vehicles offered for sale, in document order
    fn list_for_sale(&self) -> Vec<Vehicle>;

    /// Vehicles offered for rent, in document order
    fn list_for_rent(&self) -> Vec<Vehicle>;

    fn list_residences(&self) -> Vec<Residence>;

    /// Vehicles then residences, in document order
    fn list_all(&self) -> Vec<Item>;

    /// First item with this id (vehicles are scanned before residences)
    fn find_by_id(&self, id: u64) -> Option<Item>;

    fn add_vehicle(&self, draft: VehicleDraft) -> Result<Vehicle, Error>;

    fn add_residence(&self, draft: ResidenceDraft) -> Result<Residence, Error>;

    /// Shallow-merge `patch` into the item; `Ok(false)` if no item has this id
    fn update_item(&self, id: u64, patch: &ItemPatch) -> Result<bool, Error>;

    /// Remove the item; `Ok(false)` if no item has this id
    fn delete_item(&self, id: u64) -> Result<bool, Error>;

    /// Pretty-printed JSON of the whole document
    fn export_snapshot(&self) -> Result<String, Error>;

    /// Replace the whole document with a parsed snapshot.
    /// On error the current document is left untouched.
    fn import_snapshot(&self, text: &str) -> Result<(), Error>;
}

/// Append-mostly list of booking requests
pub trait ReservationLedger {
    /// Record a new pending reservation
    fn append(&self, reservation: NewReservation) -> Result<Reservation, Error>;

    /// All reservations in document order
    fn list(&self) -> Vec<Reservation>;

    fn find(&self, id: u64) -> Option<Reservation>;

    /// Overwrite the status; `Ok(false)` if no reservation has this id
    fn set_status(&self, id: u64, status: ReservationStatus) -> Result<bool, Error>;
}
