use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VendorId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: VendorId,
    pub name: String,
    pub verified: bool,
}

/// Aggregated customer rating for a listing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average star rating in `0.0..=5.0`.
    pub average: f64,
    pub count: u32,
}

/// A catalog listing as supplied by the catalog provider.
///
/// The engine treats every field as a read-only snapshot; ranking never
/// mutates a `Product`. `views`, `likes`, and `sales` are lifetime counters
/// owned upstream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub category: String,
    #[serde(default)]
    pub subcategory: Option<String>,
    /// Lowercase keyword tags used for brand and query matching.
    #[serde(default)]
    pub tags: Vec<String>,
    pub vendor: Vendor,
    pub rating: Rating,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub sales: u64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub on_sale: bool,
    /// Percentage off while `on_sale` is set.
    #[serde(default)]
    pub discount: Option<Decimal>,
}
