//! Sample catalog written on first run and on reset

use chrono::Utc;

use vitrine_domain::model::{
    BusinessHours, Category, Document, ResidenceDraft, Settings, VehicleDraft,
};

fn features(list: &[&str]) -> Vec<String> {
    list.iter().map(|f| f.to_string()).collect()
}

/// Two sample vehicles, one residence, no reservations
pub fn default_document() -> Document {
    let rav4 = VehicleDraft {
        title: "Toyota RAV4 2023".to_string(),
        price: 32000.0,
        category: Category::Sale,
        description: "SUV familial en excellent état".to_string(),
        image_ref: "images/rav4.webp".to_string(),
        features: features(&["4x4", "Automatique", "Climatisation", "Caméra de recul"]),
        vehicle_type: "SUV".to_string(),
    }
    .into_vehicle(1);

    let classe_a = VehicleDraft {
        title: "Mercedes Classe A".to_string(),
        price: 450.0,
        category: Category::Rent,
        description: "Location mensuelle avec option d'achat".to_string(),
        image_ref: "images/classe-a.webp".to_string(),
        features: features(&["Diesel", "Automatique", "Toit ouvrant"]),
        vehicle_type: "Berline".to_string(),
    }
    .into_vehicle(2);

    let apartment = ResidenceDraft {
        title: "Appartement Moderne 3 pièces".to_string(),
        price: 850.0,
        description: "Appartement neuf en centre-ville".to_string(),
        image_ref: "images/appartement.jpg".to_string(),
        features: features(&["80m²", "3 chambres", "Balcon", "Ascenseur"]),
        location: "Cocody, Abidjan".to_string(),
    }
    .into_residence(3);

    Document {
        vehicles: vec![rav4, classe_a],
        residences: vec![apartment],
        reservations: Vec::new(),
        settings: Settings {
            name: "Vitrine Auto & Immo".to_string(),
            description: "Vente • Location • Assurance".to_string(),
            contact_phone: String::new(),
            other_phones: Vec::new(),
            contact_email: String::new(),
            business_hours: BusinessHours {
                weekday: "Lun - Ven : 8h00 - 18h00".to_string(),
                saturday: "Sam : 9h00 - 13h00".to_string(),
            },
        },
        last_update: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_ids_are_unique() {
        let doc = default_document();
        assert_eq!(doc.duplicate_item_id(), None);
        assert_eq!(doc.stats().vehicles_for_sale, 1);
        assert_eq!(doc.stats().vehicles_for_rent, 1);
        assert_eq!(doc.residences[0].category, Category::Rent);
    }
}
