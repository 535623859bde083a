//! Strategy pipelines and hybrid rank fusion.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::scoring::{FusionWeights, ScoreCalculator};
use super::types::{ScoredProduct, Strategy};
use super::RecommendResult;
use crate::catalog::Catalog;
use crate::domain::behavior::UserBehavior;
use crate::domain::product::Product;
use crate::errors::DomainError;

/// The ranking engine.
///
/// Holds only policy (weights and a default cap): no request state and no
/// caches. Every ranking call is a pure function of its inputs, so
/// concurrent calls need no coordination.
#[derive(Clone, Debug)]
pub struct RecommendationEngine {
    calculator: ScoreCalculator,
    fusion: FusionWeights,
    default_limit: usize,
}

impl RecommendationEngine {
    pub fn new() -> Self {
        Self {
            calculator: ScoreCalculator::default(),
            fusion: FusionWeights::default(),
            default_limit: super::DEFAULT_LIMIT,
        }
    }

    /// Replace the hybrid blend, enforcing the sum-to-1.0 invariant.
    pub fn with_fusion_weights(mut self, weights: FusionWeights) -> RecommendResult<Self> {
        weights.validate()?;
        self.fusion = weights;
        Ok(self)
    }

    pub fn with_default_limit(mut self, limit: usize) -> RecommendResult<Self> {
        if limit == 0 {
            return Err(DomainError::InvalidLimit { limit });
        }
        self.default_limit = limit;
        Ok(self)
    }

    pub fn default_limit(&self) -> usize {
        self.default_limit
    }

    /// Rank `catalog` for one user with the given strategy.
    ///
    /// Captures the clock once so trending scores are consistent across the
    /// whole pass; use [`recommend_at`](Self::recommend_at) to pin the clock.
    pub fn recommend(
        &self,
        catalog: &Catalog,
        behavior: &UserBehavior,
        strategy: Strategy,
        limit: usize,
    ) -> RecommendResult<Vec<ScoredProduct>> {
        self.recommend_at(catalog, behavior, strategy, limit, Utc::now())
    }

    /// Deterministic variant of [`recommend`](Self::recommend): identical
    /// inputs and the same `now` always yield the identical ranking.
    pub fn recommend_at(
        &self,
        catalog: &Catalog,
        behavior: &UserBehavior,
        strategy: Strategy,
        limit: usize,
        now: DateTime<Utc>,
    ) -> RecommendResult<Vec<ScoredProduct>> {
        if limit == 0 {
            return Err(DomainError::InvalidLimit { limit });
        }

        let ranked = match strategy {
            Strategy::Personalized => self.personalized(catalog, behavior, limit),
            Strategy::Collaborative => self.collaborative(catalog, behavior, limit),
            Strategy::Content => self.content(catalog, behavior, limit),
            Strategy::Trending => self.trending(catalog, limit, now),
            Strategy::Hybrid => self.hybrid(catalog, behavior, limit, now),
        };

        tracing::debug!(
            strategy = strategy.as_str(),
            candidates = catalog.len(),
            returned = ranked.len(),
            "ranked catalog snapshot"
        );

        Ok(ranked)
    }

    fn personalized(
        &self,
        catalog: &Catalog,
        behavior: &UserBehavior,
        limit: usize,
    ) -> Vec<ScoredProduct> {
        let scored = catalog
            .products()
            .iter()
            .filter(|product| !behavior.has_viewed(&product.id))
            .map(|product| ScoredProduct {
                score: self.calculator.personalized_score(product, behavior),
                product: product.clone(),
            })
            .collect();
        rank(scored, limit)
    }

    /// Collaborative only operates within categories the user has already
    /// interacted with: a strict pre-filter, not a soft score. An emptied
    /// candidate set is a valid empty result.
    fn collaborative(
        &self,
        catalog: &Catalog,
        behavior: &UserBehavior,
        limit: usize,
    ) -> Vec<ScoredProduct> {
        let scored = catalog
            .products()
            .iter()
            .filter(|product| !behavior.has_viewed(&product.id))
            .filter(|product| behavior.viewed_categories.contains_key(&product.category))
            .map(|product| ScoredProduct {
                score: self.calculator.collaborative_score(product, behavior),
                product: product.clone(),
            })
            .collect();
        rank(scored, limit)
    }

    /// Content-based similarity against the viewed products that resolve in
    /// this catalog. With no resolvable seeds every candidate scores zero
    /// and the result degenerates to catalog order, truncated.
    fn content(
        &self,
        catalog: &Catalog,
        behavior: &UserBehavior,
        limit: usize,
    ) -> Vec<ScoredProduct> {
        let seeds: Vec<&Product> = behavior
            .viewed_products
            .iter()
            .filter_map(|product_id| catalog.find(product_id))
            .collect();

        let scored = catalog
            .products()
            .iter()
            .filter(|product| !behavior.has_viewed(&product.id))
            .map(|product| ScoredProduct {
                score: self.calculator.content_score(product, &seeds),
                product: product.clone(),
            })
            .collect();
        rank(scored, limit)
    }

    /// Global, user-independent ranking; no exclusion filter.
    fn trending(&self, catalog: &Catalog, limit: usize, now: DateTime<Utc>) -> Vec<ScoredProduct> {
        let scored = catalog
            .products()
            .iter()
            .map(|product| ScoredProduct {
                score: self.calculator.trending_score(product, now),
                product: product.clone(),
            })
            .collect();
        rank(scored, limit)
    }

    /// Borda-style positional fusion of the four base strategies. Each
    /// sub-strategy runs exactly once per call and a product appearing in
    /// several sub-results accumulates every contribution.
    fn hybrid(
        &self,
        catalog: &Catalog,
        behavior: &UserBehavior,
        limit: usize,
        now: DateTime<Utc>,
    ) -> Vec<ScoredProduct> {
        let personalized = self.personalized(catalog, behavior, limit);
        let collaborative = self.collaborative(catalog, behavior, limit);
        let content = self.content(catalog, behavior, limit);
        let trending = self.trending(catalog, limit, now);

        fuse_rankings(
            catalog,
            &[
                (self.fusion.personalized, personalized.as_slice()),
                (self.fusion.collaborative, collaborative.as_slice()),
                (self.fusion.content, content.as_slice()),
                (self.fusion.trending, trending.as_slice()),
            ],
            limit,
        )
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Stable descending sort plus cap. `Vec::sort_by` preserves the relative
/// order of equal scores, which keeps the catalog-order tie-break contract.
fn rank(mut scored: Vec<ScoredProduct>, limit: usize) -> Vec<ScoredProduct> {
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(limit);
    scored
}

/// Convert each weighted ranking into positional scores and accumulate them
/// per product: the item at 0-indexed position `i` of a list contributes
/// `weight * (limit - i) / limit`. Tied fused scores keep catalog order.
fn fuse_rankings(
    catalog: &Catalog,
    rankings: &[(f64, &[ScoredProduct])],
    limit: usize,
) -> Vec<ScoredProduct> {
    let mut fused: BTreeMap<&crate::domain::product::ProductId, f64> = BTreeMap::new();

    for (weight, ranking) in rankings {
        for (position, entry) in ranking.iter().enumerate() {
            let position_score = (limit - position) as f64 / limit as f64;
            *fused.entry(&entry.product.id).or_insert(0.0) += position_score * weight;
        }
    }

    let scored = catalog
        .products()
        .iter()
        .filter_map(|product| {
            fused
                .get(&product.id)
                .map(|score| ScoredProduct { score: *score, product: product.clone() })
        })
        .collect();
    rank(scored, limit)
}
