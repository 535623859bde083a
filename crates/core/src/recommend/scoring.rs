//! Scoring policy for the four base strategies and the hybrid blend.
//!
//! Every weight lives in a named struct here so the scoring policy is
//! auditable and testable in isolation from candidate filtering and fusion.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::behavior::UserBehavior;
use crate::domain::product::Product;
use crate::errors::DomainError;

/// Weights for the personalized strategy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PersonalizedWeights {
    /// Multiplier on the user's per-category interaction weight.
    pub category_affinity: f64,
    /// Bonus when the price sits inside the user's price window.
    pub price_in_range: f64,
    /// Penalty when the price falls outside the window.
    pub price_out_of_range: f64,
    /// Bonus when a preferred brand matches a tag.
    pub brand_match: f64,
    /// Bonus when a past search query matches the name or a tag.
    pub query_match: f64,
    /// Multiplier on the average star rating.
    pub rating_average: f64,
    /// Bonus for listings from verified vendors.
    pub verified_vendor: f64,
    /// Bonus for listings currently on sale.
    pub on_sale: f64,
}

impl Default for PersonalizedWeights {
    fn default() -> Self {
        Self {
            category_affinity: 0.3,
            price_in_range: 20.0,
            price_out_of_range: -10.0,
            brand_match: 15.0,
            query_match: 10.0,
            rating_average: 3.0,
            verified_vendor: 5.0,
            on_sale: 5.0,
        }
    }
}

/// Weights for the collaborative strategy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollaborativeWeights {
    pub likes: f64,
    pub views: f64,
    pub sales: f64,
    pub category_affinity: f64,
    /// Multiplier on `rating.average * rating.count`.
    pub rating_volume: f64,
}

impl Default for CollaborativeWeights {
    fn default() -> Self {
        Self { likes: 0.1, views: 0.05, sales: 0.2, category_affinity: 0.5, rating_volume: 0.01 }
    }
}

/// Per-seed similarity weights for the content-based strategy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContentWeights {
    pub same_category: f64,
    pub same_subcategory: f64,
    /// Applied once per tag shared with a seed.
    pub shared_tag: f64,
    pub similar_price: f64,
    pub same_vendor: f64,
    /// Upper bound on `|candidate - seed| / seed` for the price bonus.
    pub price_ratio_cutoff: Decimal,
}

impl Default for ContentWeights {
    fn default() -> Self {
        Self {
            same_category: 10.0,
            same_subcategory: 15.0,
            shared_tag: 5.0,
            similar_price: 8.0,
            same_vendor: 5.0,
            price_ratio_cutoff: Decimal::new(3, 1),
        }
    }
}

/// Engagement weights for the trending strategy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrendingWeights {
    pub views: f64,
    pub likes: f64,
    pub sales: f64,
}

impl Default for TrendingWeights {
    fn default() -> Self {
        Self { views: 1.0, likes: 2.0, sales: 5.0 }
    }
}

/// Positional rank-fusion weights for the hybrid strategy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FusionWeights {
    pub personalized: f64,
    pub collaborative: f64,
    pub content: f64,
    pub trending: f64,
}

impl FusionWeights {
    pub fn sum(&self) -> f64 {
        self.personalized + self.collaborative + self.content + self.trending
    }

    /// The four weights must sum to exactly 1.0 (within float tolerance).
    pub fn validate(&self) -> Result<(), DomainError> {
        let sum = self.sum();
        if (sum - 1.0).abs() > 1e-9 {
            return Err(DomainError::InvalidFusionWeights { sum: format!("{sum}") });
        }
        Ok(())
    }
}

impl Default for FusionWeights {
    fn default() -> Self {
        super::DEFAULT_FUSION_WEIGHTS
    }
}

/// Score calculator for all base strategies.
#[derive(Clone, Debug, Default)]
pub struct ScoreCalculator {
    pub personalized: PersonalizedWeights,
    pub collaborative: CollaborativeWeights,
    pub content: ContentWeights,
    pub trending: TrendingWeights,
}

impl ScoreCalculator {
    /// Personalized score: weighted sum of the user's own signals.
    ///
    /// Missing signals (no brands, no queries, unseen category) contribute
    /// zero; they are never an error.
    pub fn personalized_score(&self, product: &Product, behavior: &UserBehavior) -> f64 {
        let weights = &self.personalized;
        let mut score =
            weights.category_affinity * f64::from(behavior.category_affinity(&product.category));

        score += if behavior.price_range.contains(product.price) {
            weights.price_in_range
        } else {
            weights.price_out_of_range
        };

        if matches_any_keyword(&behavior.preferred_brands, &product.tags) {
            score += weights.brand_match;
        }

        if behavior
            .search_queries
            .iter()
            .any(|query| matches_name_or_tag(query, &product.name, &product.tags))
        {
            score += weights.query_match;
        }

        score += weights.rating_average * product.rating.average;

        if product.vendor.verified {
            score += weights.verified_vendor;
        }
        if product.on_sale {
            score += weights.on_sale;
        }

        score
    }

    /// Collaborative score: marketplace engagement scaled by the user's
    /// affinity for the product's category.
    pub fn collaborative_score(&self, product: &Product, behavior: &UserBehavior) -> f64 {
        let weights = &self.collaborative;
        weights.likes * product.likes as f64
            + weights.views * product.views as f64
            + weights.sales * product.sales as f64
            + weights.category_affinity * f64::from(behavior.category_affinity(&product.category))
            + weights.rating_volume * product.rating.average * f64::from(product.rating.count)
    }

    /// Content score: similarity accumulated against every viewed seed, so a
    /// candidate close to many seeds outranks one close to a single seed.
    pub fn content_score(&self, candidate: &Product, seeds: &[&Product]) -> f64 {
        seeds.iter().map(|&seed| self.seed_similarity(candidate, seed)).sum()
    }

    fn seed_similarity(&self, candidate: &Product, seed: &Product) -> f64 {
        let weights = &self.content;
        let mut score = 0.0;

        if candidate.category == seed.category {
            score += weights.same_category;
        }

        if let (Some(candidate_sub), Some(seed_sub)) = (&candidate.subcategory, &seed.subcategory)
        {
            if candidate_sub == seed_sub {
                score += weights.same_subcategory;
            }
        }

        let shared_tags = candidate
            .tags
            .iter()
            .filter(|tag| seed.tags.iter().any(|seed_tag| seed_tag == *tag))
            .count();
        score += weights.shared_tag * shared_tags as f64;

        if price_within_ratio(candidate.price, seed.price, weights.price_ratio_cutoff) {
            score += weights.similar_price;
        }

        if candidate.vendor.id == seed.vendor.id {
            score += weights.same_vendor;
        }

        score
    }

    /// Trending score: engagement velocity over the listing's age in days.
    ///
    /// Age is clamped to a minimum of one day so same-day listings do not
    /// blow up the division; `now` is captured once per ranking call.
    pub fn trending_score(&self, product: &Product, now: DateTime<Utc>) -> f64 {
        let weights = &self.trending;
        let age_seconds = now.signed_duration_since(product.created_at).num_seconds().max(0);
        let age_days = (age_seconds as f64 / 86_400.0).max(1.0);

        let engagement = weights.views * product.views as f64
            + weights.likes * product.likes as f64
            + weights.sales * product.sales as f64;
        engagement / age_days
    }
}

/// Case-insensitive substring match of any keyword against any tag.
fn matches_any_keyword(keywords: &[String], tags: &[String]) -> bool {
    keywords.iter().any(|keyword| {
        let keyword = keyword.to_lowercase();
        tags.iter().any(|tag| tag.to_lowercase().contains(&keyword))
    })
}

/// Case-insensitive substring match against the product name or any tag.
fn matches_name_or_tag(query: &str, name: &str, tags: &[String]) -> bool {
    let query = query.to_lowercase();
    name.to_lowercase().contains(&query)
        || tags.iter().any(|tag| tag.to_lowercase().contains(&query))
}

/// Relative price similarity gate. Zero-priced seeds never match: there is
/// no meaningful relative distance from a free listing.
fn price_within_ratio(candidate: Decimal, seed: Decimal, cutoff: Decimal) -> bool {
    if seed <= Decimal::ZERO {
        return false;
    }
    let difference = if candidate >= seed { candidate - seed } else { seed - candidate };
    difference / seed < cutoff
}
