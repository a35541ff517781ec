//! Reservation (booking request) types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::str::FromStr;

use super::category::ItemKind;
use super::item::Item;

/// Reservation status.
///
/// The ledger accepts any status string; values outside the known set are
/// kept verbatim in [`ReservationStatus::Other`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Other(String),
}

impl ReservationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::Other(s) => s,
        }
    }
}

impl From<String> for ReservationStatus {
    fn from(s: String) -> Self {
        match s.trim().to_lowercase().as_str() {
            "pending" | "en attente" => ReservationStatus::Pending,
            "confirmed" | "confirmée" | "confirmee" => ReservationStatus::Confirmed,
            "cancelled" | "canceled" | "annulée" | "annulee" => ReservationStatus::Cancelled,
            _ => ReservationStatus::Other(s),
        }
    }
}

impl From<&str> for ReservationStatus {
    fn from(s: &str) -> Self {
        ReservationStatus::from(s.to_string())
    }
}

impl From<ReservationStatus> for String {
    fn from(status: ReservationStatus) -> Self {
        match status {
            ReservationStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for ReservationStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ReservationStatus::from(s))
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// A booking request recorded in the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: u64,
    /// Catalog item this request refers to (not enforced; may dangle)
    pub item_id: u64,
    pub customer_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    /// Date the customer asked for
    pub requested_date: NaiveDate,
    #[serde(default, alias = "optionalMessage", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub status: ReservationStatus,
    /// When the request was recorded
    pub created_at: DateTime<Utc>,
    /// Item title at booking time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_kind: Option<ItemKind>,
    /// Item price at booking time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// Input for appending a reservation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReservation {
    pub item_id: u64,
    pub customer_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub requested_date: NaiveDate,
    #[serde(default, alias = "optionalMessage")]
    pub message: Option<String>,
    #[serde(default)]
    pub item_title: Option<String>,
    #[serde(default)]
    pub item_kind: Option<ItemKind>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl NewReservation {
    pub fn new(item_id: u64, customer_name: impl Into<String>, requested_date: NaiveDate) -> Self {
        Self {
            item_id,
            customer_name: customer_name.into(),
            email: String::new(),
            phone: String::new(),
            requested_date,
            message: None,
            item_title: None,
            item_kind: None,
            price: None,
        }
    }

    pub fn with_contact(mut self, email: impl Into<String>, phone: impl Into<String>) -> Self {
        self.email = email.into();
        self.phone = phone.into();
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Record the item's title, kind and price as they are right now
    pub fn with_item_snapshot(mut self, item: &Item) -> Self {
        self.item_title = Some(item.title().to_string());
        self.item_kind = Some(item.kind());
        self.price = Some(item.price());
        self
    }

    /// Build the ledger record; every new reservation starts pending.
    pub fn into_reservation(self, id: u64, created_at: DateTime<Utc>) -> Reservation {
        Reservation {
            id,
            item_id: self.item_id,
            customer_name: self.customer_name,
            email: self.email,
            phone: self.phone,
            requested_date: self.requested_date,
            message: self.message.filter(|m| !m.is_empty()),
            status: ReservationStatus::Pending,
            created_at,
            item_title: self.item_title,
            item_kind: self.item_kind,
            price: self.price,
        }
    }
}
