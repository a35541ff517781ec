//! Domain services

pub mod message;
pub mod pricing;
pub mod validation;

pub use message::{booking_message, whatsapp_link};
pub use pricing::format_price;
pub use validation::{is_valid_email, is_valid_phone, sanitize_input, validate_contact};
