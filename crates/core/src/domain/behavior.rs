use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::product::ProductId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

/// Inclusive affordability window inferred upstream from a user's browsing
/// and purchase history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl PriceRange {
    pub fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, price: Decimal) -> bool {
        price >= self.min && price <= self.max
    }
}

/// One user's aggregated interaction signals, snapshotted at the start of a
/// ranking call. The engine never mutates a snapshot; behavior updates made
/// elsewhere do not affect an in-flight ranking.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserBehavior {
    /// Products the user has already seen. Used as an exclusion filter by
    /// every per-user strategy, never as a ranking feature.
    #[serde(default)]
    pub viewed_products: BTreeSet<ProductId>,
    /// Category -> interaction weight, accumulated upstream. Treated as an
    /// opaque affinity score here.
    #[serde(default)]
    pub viewed_categories: BTreeMap<String, u32>,
    /// Free-text queries in the order the user issued them.
    #[serde(default)]
    pub search_queries: Vec<String>,
    #[serde(default)]
    pub liked_products: BTreeSet<ProductId>,
    #[serde(default)]
    pub purchase_history: BTreeSet<ProductId>,
    /// Category -> seconds. Carried on the snapshot contract but consumed by
    /// no scorer.
    #[serde(default)]
    pub time_spent_on_categories: BTreeMap<String, u64>,
    pub price_range: PriceRange,
    /// Lowercase brand/keyword preferences.
    #[serde(default)]
    pub preferred_brands: Vec<String>,
}

impl UserBehavior {
    /// Cold-start snapshot: no history, an unbounded non-negative price
    /// window, no preferences. Every scoring term that reads a missing
    /// signal contributes zero.
    pub fn empty() -> Self {
        Self {
            viewed_products: BTreeSet::new(),
            viewed_categories: BTreeMap::new(),
            search_queries: Vec::new(),
            liked_products: BTreeSet::new(),
            purchase_history: BTreeSet::new(),
            time_spent_on_categories: BTreeMap::new(),
            price_range: PriceRange::new(Decimal::ZERO, Decimal::MAX),
            preferred_brands: Vec::new(),
        }
    }

    pub fn has_viewed(&self, product_id: &ProductId) -> bool {
        self.viewed_products.contains(product_id)
    }

    pub fn category_affinity(&self, category: &str) -> u32 {
        self.viewed_categories.get(category).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_range_bounds_are_inclusive() {
        let range = PriceRange::new(Decimal::from(100), Decimal::from(500));

        assert!(range.contains(Decimal::from(100)));
        assert!(range.contains(Decimal::from(500)));
        assert!(!range.contains(Decimal::from(99)));
        assert!(!range.contains(Decimal::from(501)));
    }

    #[test]
    fn empty_behavior_has_no_signal() {
        let behavior = UserBehavior::empty();

        assert!(behavior.viewed_products.is_empty());
        assert_eq!(behavior.category_affinity("Electronics"), 0);
        assert!(behavior.price_range.contains(Decimal::from(1_000_000)));
    }
}
