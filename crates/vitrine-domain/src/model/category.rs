//! Listing category and item kind

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use vitrine_types::Error;

/// Whether an item is offered for sale or for rent
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    #[serde(alias = "vente")]
    Sale,
    #[serde(alias = "location")]
    Rent,
}

impl Category {
    /// Rentals are priced per month
    pub fn is_monthly(self) -> bool {
        self == Category::Rent
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Sale => "for sale",
            Category::Rent => "for rent",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Sale => f.pad("sale"),
            Category::Rent => f.pad("rent"),
        }
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sale" | "vente" => Ok(Category::Sale),
            "rent" | "location" => Ok(Category::Rent),
            other => Err(Error::InvalidInput(format!("unknown category: {other}"))),
        }
    }
}

/// Discriminant of an [`Item`](super::Item)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    #[serde(alias = "vehicule")]
    Vehicle,
    Residence,
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemKind::Vehicle => f.pad("vehicle"),
            ItemKind::Residence => f.pad("residence"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_spellings() {
        assert_eq!("vente".parse::<Category>().unwrap(), Category::Sale);
        assert_eq!("Location".parse::<Category>().unwrap(), Category::Rent);
        let rent: Category = serde_json::from_str("\"location\"").unwrap();
        assert_eq!(rent, Category::Rent);
        assert!("lease".parse::<Category>().is_err());
    }

    #[test]
    fn test_serializes_english() {
        assert_eq!(serde_json::to_string(&Category::Sale).unwrap(), "\"sale\"");
    }
}
