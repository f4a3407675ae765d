//! Catalog domain model.
//!
//! [`Product`] is the unit the whole service revolves around. It is a value
//! type: cloning a product clones its embedded [`Category`] too, so cached
//! entries and the copies handed to callers never alias each other.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub mod service;
pub mod source;

pub use service::{CatalogError, CatalogService};
pub use source::{CatalogSource, SampleCatalog, SourceError};

/// A product category, embedded (denormalized) in each product.
///
/// Categories are owned copies, not references into a shared table — two
/// products in "the same" category carry independent values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: u32,
    pub name: String,
    pub description: Option<String>,
}

/// A single catalog entry.
///
/// Serializes to the camelCase wire schema the frontends consume:
/// `id`, `name`, `price`, `stock`, `category{id,name,description}`,
/// `createdAt`, `updatedAt` (nullable), `isActive`.
///
/// `price` is a [`Decimal`] serialized with arbitrary precision — it crosses
/// the wire as a plain JSON number without ever passing through an `f64`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u32,
    pub name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,
    pub stock: u32,
    pub category: Category,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_product() -> Product {
        Product {
            id: 3,
            name: "Wireless Mouse".to_string(),
            price: Decimal::new(3599, 2),
            stock: 75,
            category: Category {
                id: 102,
                name: "Accessories".to_string(),
                description: Some("Computer and electronic accessories".to_string()),
            },
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap(),
            updated_at: None,
            is_active: true,
        }
    }

    #[test]
    fn serializes_to_camel_case_schema() {
        let value = serde_json::to_value(sample_product()).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["name"], "Wireless Mouse");
        assert_eq!(value["stock"], 75);
        assert_eq!(value["category"]["id"], 102);
        assert_eq!(value["category"]["name"], "Accessories");
        assert_eq!(value["createdAt"], "2024-01-15T09:30:00Z");
        assert!(value["updatedAt"].is_null());
        assert_eq!(value["isActive"], true);
    }

    #[test]
    fn price_survives_round_trip_exactly() {
        let json = serde_json::to_string(&sample_product()).unwrap();
        assert!(json.contains(r#""price":35.99"#));

        let back: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(back.price, Decimal::new(3599, 2));
    }

    #[test]
    fn cloned_product_owns_its_category() {
        let original = sample_product();
        let mut copy = original.clone();
        copy.category.name = "Renamed".to_string();
        assert_eq!(original.category.name, "Accessories");
    }
}
