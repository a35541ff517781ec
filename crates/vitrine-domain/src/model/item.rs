//! Catalog item type definitions

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::category::{Category, ItemKind};

/// Vehicle offered for sale or rent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: u64,
    pub title: String,
    #[serde(default, deserialize_with = "price_or_zero")]
    pub price: f64,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_ref: String,
    #[serde(default, deserialize_with = "features_as_strings")]
    pub features: Vec<String>,
    #[serde(default = "default_true")]
    pub available: bool,
    /// Free-text vehicle class (e.g. "SUV", "Berline")
    #[serde(rename = "type", default)]
    pub vehicle_type: String,
}

/// Residential rental
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Residence {
    pub id: u64,
    pub title: String,
    #[serde(default, deserialize_with = "price_or_zero")]
    pub price: f64,
    #[serde(default = "rent")]
    pub category: Category,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_ref: String,
    #[serde(default, deserialize_with = "features_as_strings")]
    pub features: Vec<String>,
    #[serde(default = "default_true")]
    pub available: bool,
    /// Free-text address or area
    #[serde(default)]
    pub location: String,
}

fn default_true() -> bool {
    true
}

fn rent() -> Category {
    Category::Rent
}

/// Stored prices are clamped like entered ones: negative, non-finite and
/// non-numeric values read as 0, numeric text is parsed.
fn price_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64().map(clamp_price).unwrap_or(0.0),
        Some(Value::String(s)) => parse_price(&s),
        _ => 0.0,
    })
}

/// Older documents store numbers among the features; keep them as text.
fn features_as_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(values
        .into_iter()
        .filter_map(|v| match v {
            Value::String(s) => Some(s),
            Value::Null => None,
            other => Some(other.to_string()),
        })
        .collect())
}

/// A catalog entry, explicitly tagged by kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Item {
    Vehicle(Vehicle),
    Residence(Residence),
}

impl Item {
    pub fn kind(&self) -> ItemKind {
        match self {
            Item::Vehicle(_) => ItemKind::Vehicle,
            Item::Residence(_) => ItemKind::Residence,
        }
    }

    pub fn id(&self) -> u64 {
        match self {
            Item::Vehicle(v) => v.id,
            Item::Residence(r) => r.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Item::Vehicle(v) => &v.title,
            Item::Residence(r) => &r.title,
        }
    }

    pub fn price(&self) -> f64 {
        match self {
            Item::Vehicle(v) => v.price,
            Item::Residence(r) => r.price,
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Item::Vehicle(v) => v.category,
            Item::Residence(r) => r.category,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Item::Vehicle(v) => &v.description,
            Item::Residence(r) => &r.description,
        }
    }

    pub fn features(&self) -> &[String] {
        match self {
            Item::Vehicle(v) => &v.features,
            Item::Residence(r) => &r.features,
        }
    }

    pub fn available(&self) -> bool {
        match self {
            Item::Vehicle(v) => v.available,
            Item::Residence(r) => r.available,
        }
    }

    /// Shallow-merge `patch` over this item. The id and kind never change.
    pub fn apply(&mut self, patch: &ItemPatch) {
        match self {
            Item::Vehicle(v) => patch.apply_to_vehicle(v),
            Item::Residence(r) => patch.apply_to_residence(r),
        }
    }
}

impl From<Vehicle> for Item {
    fn from(v: Vehicle) -> Self {
        Item::Vehicle(v)
    }
}

impl From<Residence> for Item {
    fn from(r: Residence) -> Self {
        Item::Residence(r)
    }
}

/// Input for creating a vehicle
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VehicleDraft {
    pub title: String,
    pub price: f64,
    pub category: Category,
    pub description: String,
    pub image_ref: String,
    pub features: Vec<String>,
    #[serde(rename = "type")]
    pub vehicle_type: String,
}

impl VehicleDraft {
    pub fn new(title: impl Into<String>, price: f64, category: Category) -> Self {
        Self {
            title: title.into(),
            price,
            category,
            ..Default::default()
        }
    }

    /// Build the stored record. New vehicles are always available.
    pub fn into_vehicle(self, id: u64) -> Vehicle {
        Vehicle {
            id,
            title: self.title,
            price: clamp_price(self.price),
            category: self.category,
            description: self.description,
            image_ref: self.image_ref,
            features: self.features,
            available: true,
            vehicle_type: self.vehicle_type,
        }
    }
}

/// Input for creating a residence
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResidenceDraft {
    pub title: String,
    pub price: f64,
    pub description: String,
    pub image_ref: String,
    pub features: Vec<String>,
    pub location: String,
}

impl ResidenceDraft {
    pub fn new(title: impl Into<String>, price: f64, location: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            price,
            location: location.into(),
            ..Default::default()
        }
    }

    /// Build the stored record. Residences are always rentals and start available.
    pub fn into_residence(self, id: u64) -> Residence {
        Residence {
            id,
            title: self.title,
            price: clamp_price(self.price),
            category: Category::Rent,
            description: self.description,
            image_ref: self.image_ref,
            features: self.features,
            available: true,
            location: self.location,
        }
    }
}

/// Partial update for an item; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemPatch {
    pub title: Option<String>,
    pub price: Option<f64>,
    pub category: Option<Category>,
    pub description: Option<String>,
    pub image_ref: Option<String>,
    pub features: Option<Vec<String>>,
    pub available: Option<bool>,
    /// Ignored for residences
    #[serde(rename = "type")]
    pub vehicle_type: Option<String>,
    /// Ignored for vehicles
    pub location: Option<String>,
}

impl ItemPatch {
    pub fn is_empty(&self) -> bool {
        *self == ItemPatch::default()
    }

    pub fn apply_to_vehicle(&self, v: &mut Vehicle) {
        if let Some(ref title) = self.title {
            v.title = title.clone();
        }
        if let Some(price) = self.price {
            v.price = clamp_price(price);
        }
        if let Some(category) = self.category {
            v.category = category;
        }
        if let Some(ref description) = self.description {
            v.description = description.clone();
        }
        if let Some(ref image_ref) = self.image_ref {
            v.image_ref = image_ref.clone();
        }
        if let Some(ref features) = self.features {
            v.features = features.clone();
        }
        if let Some(available) = self.available {
            v.available = available;
        }
        if let Some(ref vehicle_type) = self.vehicle_type {
            v.vehicle_type = vehicle_type.clone();
        }
    }

    /// Category is not applied: residences stay rentals.
    pub fn apply_to_residence(&self, r: &mut Residence) {
        if let Some(ref title) = self.title {
            r.title = title.clone();
        }
        if let Some(price) = self.price {
            r.price = clamp_price(price);
        }
        if let Some(ref description) = self.description {
            r.description = description.clone();
        }
        if let Some(ref image_ref) = self.image_ref {
            r.image_ref = image_ref.clone();
        }
        if let Some(ref features) = self.features {
            r.features = features.clone();
        }
        if let Some(available) = self.available {
            r.available = available;
        }
        if let Some(ref location) = self.location {
            r.location = location.clone();
        }
    }
}

/// Prices are non-negative; anything else becomes 0
fn clamp_price(price: f64) -> f64 {
    if price.is_finite() && price >= 0.0 {
        price
    } else {
        0.0
    }
}

/// Parse a price typed by a user, 0 when the text is not a valid price
pub fn parse_price(text: &str) -> f64 {
    let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    cleaned
        .replace(',', ".")
        .parse::<f64>()
        .map(clamp_price)
        .unwrap_or(0.0)
}

/// Split a comma-separated feature list, trimming and dropping empties
pub fn parse_features(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_vehicle() -> Vehicle {
        VehicleDraft {
            title: "Toyota RAV4".to_string(),
            price: 32000.0,
            category: Category::Sale,
            features: vec!["4x4".to_string()],
            vehicle_type: "SUV".to_string(),
            ..Default::default()
        }
        .into_vehicle(7)
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("1000"), 1000.0);
        assert_eq!(parse_price(" 12 500,5 "), 12500.5);
        assert_eq!(parse_price("abc"), 0.0);
        assert_eq!(parse_price("-40"), 0.0);
        assert_eq!(parse_price(""), 0.0);
    }

    #[test]
    fn test_stored_price_is_clamped() {
        let v: Vehicle = serde_json::from_str(r#"{"id":1,"title":"A","price":-250}"#).unwrap();
        assert_eq!(v.price, 0.0);
        let v: Vehicle = serde_json::from_str(r#"{"id":1,"title":"A","price":"1 000"}"#).unwrap();
        assert_eq!(v.price, 1000.0);
        let r: Residence =
            serde_json::from_str(r#"{"id":2,"title":"B","price":null}"#).unwrap();
        assert_eq!(r.price, 0.0);
        let item: Item =
            serde_json::from_str(r#"{"kind":"residence","id":3,"title":"C","price":[1]}"#).unwrap();
        assert_eq!(item.price(), 0.0);
    }

    #[test]
    fn test_parse_features() {
        assert_eq!(
            parse_features("Diesel, Automatique, ,Toit ouvrant,"),
            vec!["Diesel", "Automatique", "Toit ouvrant"]
        );
        assert!(parse_features("  ").is_empty());
    }

    #[test]
    fn test_residence_draft_forces_rent() {
        let r = ResidenceDraft::new("Studio", -5.0, "Cocody").into_residence(3);
        assert_eq!(r.category, Category::Rent);
        assert!(r.available);
        assert_eq!(r.price, 0.0);
    }

    #[test]
    fn test_patch_keeps_untouched_fields() {
        let mut item = Item::from(sample_vehicle());
        let patch = ItemPatch {
            price: Some(30000.0),
            location: Some("ignored".to_string()),
            ..Default::default()
        };
        item.apply(&patch);

        let Item::Vehicle(v) = item else {
            panic!("kind changed");
        };
        assert_eq!(v.id, 7);
        assert_eq!(v.price, 30000.0);
        assert_eq!(v.title, "Toyota RAV4");
        assert_eq!(v.vehicle_type, "SUV");
    }

    #[test]
    fn test_patch_does_not_move_residence_to_sale() {
        let mut r = ResidenceDraft::new("Villa", 900.0, "Bouaké").into_residence(1);
        ItemPatch {
            category: Some(Category::Sale),
            ..Default::default()
        }
        .apply_to_residence(&mut r);
        assert_eq!(r.category, Category::Rent);
    }

    #[test]
    fn test_item_tagged_json() {
        let json = serde_json::to_value(Item::from(sample_vehicle())).unwrap();
        assert_eq!(json["kind"], "vehicle");
        assert_eq!(json["type"], "SUV");
        assert_eq!(json["imageRef"], "");
    }

    #[test]
    fn test_legacy_numeric_features() {
        let v: Vehicle = serde_json::from_str(
            r#"{"id":1,"title":"Peugeot 3008","category":"location","features":["SUV",5]}"#,
        )
        .unwrap();
        assert_eq!(v.features, vec!["SUV", "5"]);
        assert_eq!(v.category, Category::Rent);
        assert!(v.available);
    }
}
