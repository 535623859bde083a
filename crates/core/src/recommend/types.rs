//! Types for the recommendation engine.

use serde::{Deserialize, Serialize};

use crate::domain::behavior::UserId;
use crate::domain::product::Product;
use crate::errors::DomainError;

/// One of the five named ranking algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Personalized,
    Collaborative,
    Content,
    Trending,
    Hybrid,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::Personalized,
        Strategy::Collaborative,
        Strategy::Content,
        Strategy::Trending,
        Strategy::Hybrid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Personalized => "personalized",
            Strategy::Collaborative => "collaborative",
            Strategy::Content => "content",
            Strategy::Trending => "trending",
            Strategy::Hybrid => "hybrid",
        }
    }

    /// Human-readable description for command output.
    pub fn description(&self) -> &'static str {
        match self {
            Strategy::Personalized => "Weighted match against your own signals",
            Strategy::Collaborative => "Popular within categories you browse",
            Strategy::Content => "Similar to products you viewed",
            Strategy::Trending => "Hot across the whole marketplace",
            Strategy::Hybrid => "Blend of all four strategies",
        }
    }
}

impl std::str::FromStr for Strategy {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "personalized" => Ok(Self::Personalized),
            "collaborative" => Ok(Self::Collaborative),
            "content" => Ok(Self::Content),
            "trending" => Ok(Self::Trending),
            "hybrid" => Ok(Self::Hybrid),
            other => Err(DomainError::InvariantViolation(format!(
                "unknown strategy `{other}` (expected personalized|collaborative|content|trending|hybrid)"
            ))),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A ranked product with its computed score.
///
/// The score is a transient annotation for the caller's convenience; it is
/// never persisted and never written back to the catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredProduct {
    pub product: Product,
    pub score: f64,
}

/// Request for a ranked list, resolved against the provider seams.
#[derive(Clone, Debug, PartialEq)]
pub struct RecommendationRequest {
    pub user_id: UserId,
    pub strategy: Strategy,
    pub limit: usize,
}

impl RecommendationRequest {
    /// Create a request with the default strategy (hybrid) and limit.
    pub fn for_user(user_id: UserId) -> Self {
        Self { user_id, strategy: Strategy::Hybrid, limit: super::DEFAULT_LIMIT }
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}
