//! Candidate catalog snapshot handed to the engine for one ranking call.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::product::{Product, ProductId};
use crate::errors::DomainError;

/// An ordered, id-unique set of candidate products.
///
/// Catalog order is load-bearing: it is the tie-break baseline for every
/// stable sort in the engine, so `Catalog` preserves the order in which the
/// provider supplied the products.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Product>", into = "Vec<Product>")]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate product ids.
    pub fn new(products: Vec<Product>) -> Result<Self, DomainError> {
        let mut seen = BTreeSet::new();
        for product in &products {
            if !seen.insert(product.id.clone()) {
                return Err(DomainError::DuplicateProduct { id: product.id.clone() });
            }
        }
        Ok(Self { products })
    }

    pub fn empty() -> Self {
        Self { products: Vec::new() }
    }

    pub fn find(&self, product_id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == product_id)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Parse a catalog from a JSON array of products.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, DomainError> {
        let products: Vec<Product> = serde_json::from_slice(bytes)
            .map_err(|error| DomainError::InvariantViolation(format!("catalog JSON: {error}")))?;
        Self::new(products)
    }
}

impl TryFrom<Vec<Product>> for Catalog {
    type Error = DomainError;

    fn try_from(products: Vec<Product>) -> Result<Self, Self::Error> {
        Self::new(products)
    }
}

impl From<Catalog> for Vec<Product> {
    fn from(catalog: Catalog) -> Self {
        catalog.products
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    use super::*;
    use crate::domain::product::{Rating, Vendor, VendorId};

    fn product(id: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Decimal::from(1000),
            category: "Electronics".to_owned(),
            subcategory: None,
            tags: Vec::new(),
            vendor: Vendor {
                id: VendorId("vendor-1".to_owned()),
                name: "Lagos Gadgets".to_owned(),
                verified: true,
            },
            rating: Rating { average: 4.0, count: 10 },
            views: 0,
            likes: 0,
            sales: 0,
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
            on_sale: false,
            discount: None,
        }
    }

    #[test]
    fn rejects_duplicate_product_ids() {
        let result = Catalog::new(vec![product("p-1"), product("p-2"), product("p-1")]);

        assert_eq!(
            result,
            Err(DomainError::DuplicateProduct { id: ProductId::new("p-1") })
        );
    }

    #[test]
    fn preserves_provider_order() {
        let catalog = Catalog::new(vec![product("p-3"), product("p-1"), product("p-2")])
            .expect("unique ids");

        let ids: Vec<&str> =
            catalog.products().iter().map(|product| product.id.as_str()).collect();
        assert_eq!(ids, ["p-3", "p-1", "p-2"]);
    }

    #[test]
    fn finds_products_by_id() {
        let catalog = Catalog::new(vec![product("p-1"), product("p-2")]).expect("unique ids");

        assert!(catalog.find(&ProductId::new("p-2")).is_some());
        assert!(catalog.find(&ProductId::new("p-9")).is_none());
    }
}
