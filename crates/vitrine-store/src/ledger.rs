//! Reservation ledger over the document store

use chrono::Utc;
use tracing::{debug, info};

use vitrine_domain::model::{NewReservation, Reservation, ReservationStatus};
use vitrine_domain::repository::ReservationLedger;
use vitrine_types::Error;

use crate::storage::StorageArea;
use crate::store::DocumentStore;

impl<S: StorageArea> ReservationLedger for DocumentStore<S> {
    fn append(&self, reservation: NewReservation) -> Result<Reservation, Error> {
        let record = reservation.into_reservation(self.next_id()?, Utc::now());
        let created = record.clone();
        self.mutate(|d| d.reservations.push(record))?;
        info!(id = created.id, item_id = created.item_id, "reservation recorded");
        Ok(created)
    }

    fn list(&self) -> Vec<Reservation> {
        self.read(|d| d.reservations.clone())
    }

    fn find(&self, id: u64) -> Option<Reservation> {
        self.read(|d| d.reservations.iter().find(|r| r.id == id).cloned())
    }

    fn set_status(&self, id: u64, status: ReservationStatus) -> Result<bool, Error> {
        if self.find(id).is_none() {
            debug!(id, "set_status: no such reservation");
            return Ok(false);
        }

        let label = status.to_string();
        self.mutate(|d| {
            if let Some(r) = d.reservations.iter_mut().find(|r| r.id == id) {
                r.status = status;
            }
        })?;
        info!(id, status = %label, "reservation status changed");
        Ok(true)
    }
}
