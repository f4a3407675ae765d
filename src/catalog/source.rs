//! Catalog data source — the seam behind which a real persistence layer
//! would sit.
//!
//! [`CatalogSource`] is the only way product data enters the service. The
//! bundled [`SampleCatalog`] implementation returns a fixed in-memory data
//! set; a database-backed implementation would slot in behind the same trait.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use super::{Category, Product};

/// Errors a catalog source can surface.
///
/// Kept distinct from not-found: an absent product is a normal lookup result,
/// while a source error means the catalog could not be determined at all.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("catalog source unavailable: {0}")]
    Unavailable(String),
}

/// Supplier of the canonical, ordered product list.
///
/// Implementations must return products in a stable order; the cache layer
/// preserves whatever ordering the source produces.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Enumerate every catalog entry, in canonical order.
    async fn list_all(&self) -> Result<Vec<Product>, SourceError>;
}

/// In-memory sample data source: eight products across three categories.
///
/// Each call rebuilds the product list from scratch, the way a database query
/// would materialize fresh rows, and sleeps briefly to simulate the round
/// trip.
#[derive(Debug, Default)]
pub struct SampleCatalog;

impl SampleCatalog {
    /// Simulated database round-trip latency.
    const LOOKUP_DELAY_MS: u64 = 10;

    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CatalogSource for SampleCatalog {
    async fn list_all(&self) -> Result<Vec<Product>, SourceError> {
        tokio::time::sleep(std::time::Duration::from_millis(Self::LOOKUP_DELAY_MS)).await;
        debug!("sample catalog enumerated");
        Ok(sample_products())
    }
}

// Price helper: whole currency units + cents, without touching floats.
fn price(units: i64, cents: i64) -> Decimal {
    Decimal::new(units * 100 + cents, 2)
}

fn product(
    id: u32,
    name: &str,
    price: Decimal,
    stock: u32,
    category: &Category,
    created_days_ago: i64,
    updated_days_ago: Option<i64>,
) -> Product {
    let now = Utc::now();
    let days_ago = |d: i64| -> DateTime<Utc> { now - Duration::days(d) };

    Product {
        id,
        name: name.to_string(),
        price,
        stock,
        category: category.clone(),
        created_at: days_ago(created_days_ago),
        updated_at: updated_days_ago.map(days_ago),
        is_active: true,
    }
}

/// The fixed eight-product sample set.
pub fn sample_products() -> Vec<Product> {
    let electronics = Category {
        id: 101,
        name: "Electronics".to_string(),
        description: Some("Electronic devices and gadgets".to_string()),
    };
    let accessories = Category {
        id: 102,
        name: "Accessories".to_string(),
        description: Some("Computer and electronic accessories".to_string()),
    };
    let storage = Category {
        id: 103,
        name: "Storage".to_string(),
        description: Some("Data storage solutions".to_string()),
    };

    vec![
        product(1, "Laptop", price(1200, 50), 25, &electronics, 30, Some(5)),
        product(2, "Headphones", price(50, 0), 100, &accessories, 25, Some(3)),
        product(3, "Wireless Mouse", price(35, 99), 75, &accessories, 20, Some(2)),
        product(4, "4K Monitor", price(299, 99), 15, &electronics, 15, Some(1)),
        product(5, "Mechanical Keyboard", price(89, 99), 45, &accessories, 12, None),
        product(6, "Webcam HD", price(79, 99), 30, &electronics, 10, None),
        product(7, "USB-C Hub", price(49, 99), 60, &accessories, 8, None),
        product(8, "External SSD", price(149, 99), 20, &storage, 5, None),
    ]
}
