//! Multi-strategy product recommendation engine.
//!
//! Ranks a catalog snapshot against one user's behavior snapshot using four
//! interchangeable strategies (personalized, collaborative, content-based,
//! trending) plus a weighted rank-fusion blend of all four.

mod engine;
mod scoring;
mod types;

pub use engine::RecommendationEngine;
pub use scoring::{
    CollaborativeWeights, ContentWeights, FusionWeights, PersonalizedWeights, ScoreCalculator,
    TrendingWeights,
};
pub use types::*;

use crate::errors::DomainError;

/// Result type for ranking operations.
pub type RecommendResult<T> = Result<T, DomainError>;

/// Cap applied when a request does not specify one.
pub const DEFAULT_LIMIT: usize = 8;

/// Default hybrid blend. The four weights sum to 1.0 by construction; the
/// engine re-validates custom weights on the same invariant.
pub const DEFAULT_FUSION_WEIGHTS: FusionWeights = FusionWeights {
    personalized: 0.40,
    collaborative: 0.30,
    content: 0.20,
    trending: 0.10,
};
