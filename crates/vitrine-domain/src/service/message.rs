//! Booking notification text and messaging deep link

use chrono::{DateTime, Utc};
use url::Url;
use vitrine_types::{Error, Result};

use crate::model::{Category, Item, ItemKind, Reservation, Settings};
use crate::service::pricing::format_price;

const WHATSAPP_BASE: &str = "https://wa.me/";

/// Text summary of a reservation sent to the business
pub fn booking_message(
    settings: &Settings,
    fallback_name: &str,
    item: &Item,
    reservation: &Reservation,
    sent_at: DateTime<Utc>,
) -> String {
    let business = if settings.name.is_empty() {
        fallback_name
    } else {
        &settings.name
    };
    let kind = match item.kind() {
        ItemKind::Vehicle => "Véhicule",
        ItemKind::Residence => "Résidence",
    };
    let service = match item.category() {
        Category::Sale => "Achat",
        Category::Rent => "Location",
    };

    let mut text = format!("*NOUVELLE RÉSERVATION - {business}*\n\n");
    text.push_str(&format!("*SERVICE:* {service} {kind}\n"));
    text.push_str(&format!("*ÉLÉMENT:* {}\n", item.title()));
    text.push_str(&format!(
        "*MONTANT:* {}\n\n",
        format_price(item.price(), item.category().is_monthly())
    ));
    text.push_str("*CLIENT:*\n");
    text.push_str(&format!("- Nom: {}\n", reservation.customer_name));
    let email = if reservation.email.is_empty() {
        "Non fourni"
    } else {
        &reservation.email
    };
    text.push_str(&format!("- Email: {email}\n"));
    text.push_str(&format!("- Téléphone: {}\n", reservation.phone));
    text.push_str(&format!(
        "- Date souhaitée: {}\n\n",
        reservation.requested_date.format("%d/%m/%Y")
    ));

    if let Some(ref message) = reservation.message {
        text.push_str(&format!("*MESSAGE:*\n{message}\n\n"));
    }

    text.push_str("---\n");
    if !settings.contact_email.is_empty() {
        text.push_str(&format!("Contact: {}\n", settings.contact_email));
    }
    if !settings.contact_phone.is_empty() {
        text.push_str(&format!("Téléphone: {}\n", settings.contact_phone));
    }
    text.push_str(&format!("Date: {}", sent_at.format("%d/%m/%Y %H:%M")));
    text
}

/// `https://wa.me/<number>?text=<encoded text>`; non-digits are dropped from the number
pub fn whatsapp_link(number: &str, text: &str) -> Result<Url> {
    let digits: String = number.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Err(Error::InvalidInput(format!(
            "messaging number has no digits: {number:?}"
        )));
    }

    Url::parse_with_params(&format!("{WHATSAPP_BASE}{digits}"), &[("text", text)])
        .map_err(|e| Error::InvalidInput(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewReservation, VehicleDraft};
    use chrono::NaiveDate;

    #[test]
    fn test_link_encodes_text() {
        let url = whatsapp_link("+225 0748735115", "Bonjour & merci").unwrap();
        assert_eq!(url.host_str(), Some("wa.me"));
        assert_eq!(url.path(), "/2250748735115");
        let text: Vec<_> = url.query_pairs().collect();
        assert_eq!(text[0].1, "Bonjour & merci");
    }

    #[test]
    fn test_link_requires_digits() {
        assert!(whatsapp_link("n/a", "x").is_err());
    }

    #[test]
    fn test_message_mentions_item_and_client() {
        let item = Item::from(VehicleDraft::new("Mercedes Classe A", 450.0, Category::Rent).into_vehicle(2));
        let reservation = NewReservation::new(
            2,
            "Awa Koné",
            NaiveDate::from_ymd_opt(2026, 11, 2).unwrap(),
        )
        .with_contact("", "0748735115")
        .into_reservation(9, Utc::now());

        let text = booking_message(&Settings::default(), "Vitrine", &item, &reservation, Utc::now());
        assert!(text.contains("NOUVELLE RÉSERVATION - Vitrine"));
        assert!(text.contains("Location Véhicule"));
        assert!(text.contains("450 FCFA/mois"));
        assert!(text.contains("Email: Non fourni"));
        assert!(text.contains("02/11/2026"));
        assert!(!text.contains("MESSAGE"));
    }
}
