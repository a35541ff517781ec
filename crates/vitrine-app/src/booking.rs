//! Reservation intake: validate the form, snapshot the item, record the
//! request and prepare the notification link

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use url::Url;

use vitrine_domain::model::{Item, NewReservation, Reservation};
use vitrine_domain::repository::{CatalogRepository, ReservationLedger};
use vitrine_domain::service::{booking_message, sanitize_input, validate_contact, whatsapp_link};
use vitrine_store::{DocumentStore, StorageArea};
use vitrine_types::{Error, Result, ValidationError};

/// Booking form as submitted by a customer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub item_id: u64,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub requested_date: NaiveDate,
    #[serde(default)]
    pub message: Option<String>,
}

/// Outcome of a successful booking
#[derive(Debug, Clone)]
pub struct Booking {
    pub reservation: Reservation,
    pub item: Item,
    /// Text summary for the business
    pub message: String,
    /// Messaging deep link carrying `message`
    pub link: Url,
}

/// Books catalog items into the reservation ledger
pub struct BookingService<'a, S: StorageArea> {
    store: &'a DocumentStore<S>,
    whatsapp_number: String,
    business_name: String,
}

impl<'a, S: StorageArea> BookingService<'a, S> {
    pub fn new(
        store: &'a DocumentStore<S>,
        whatsapp_number: impl Into<String>,
        business_name: impl Into<String>,
    ) -> Self {
        Self {
            store,
            whatsapp_number: whatsapp_number.into(),
            business_name: business_name.into(),
        }
    }

    /// Validate and record a booking request made on `today`
    pub fn book(&self, request: BookingRequest, today: NaiveDate) -> Result<Booking> {
        let name = sanitize_input(&request.customer_name);
        let email = sanitize_input(&request.email);
        let phone = sanitize_input(&request.phone);
        let note = request
            .message
            .as_deref()
            .map(sanitize_input)
            .filter(|m| !m.is_empty());

        let mut problems = match validate_contact(&name, &email, &phone) {
            Ok(()) => Vec::new(),
            Err(e) => e.messages,
        };
        if request.requested_date < today {
            problems.push(format!(
                "requested date {} is in the past",
                request.requested_date
            ));
        }
        if !problems.is_empty() {
            return Err(ValidationError::new(problems).into());
        }

        let item = self
            .store
            .find_by_id(request.item_id)
            .ok_or(Error::ItemNotFound(request.item_id))?;

        let mut new = NewReservation::new(item.id(), name, request.requested_date)
            .with_contact(email, phone)
            .with_item_snapshot(&item);
        if let Some(note) = note {
            new = new.with_message(note);
        }

        let reservation = self.store.append(new)?;
        let message = booking_message(
            &self.store.settings(),
            &self.business_name,
            &item,
            &reservation,
            Utc::now(),
        );
        let link = whatsapp_link(&self.whatsapp_number, &message)?;

        info!(
            reservation = reservation.id,
            item = item.id(),
            "booking recorded"
        );
        Ok(Booking {
            reservation,
            item,
            message,
            link,
        })
    }
}
