//! Domain model types

pub mod category;
pub mod document;
pub mod item;
pub mod reservation;

pub use category::{Category, ItemKind};
pub use document::{BusinessHours, Document, Settings, SettingsPatch, Stats};
pub use item::{
    parse_features, parse_price, Item, ItemPatch, Residence, ResidenceDraft, Vehicle,
    VehicleDraft,
};
pub use reservation::{NewReservation, Reservation, ReservationStatus};
