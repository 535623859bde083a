//! Collaborator seams: where catalog and behavior snapshots come from.
//!
//! Production providers are remote services, so both traits are async; the
//! in-memory implementations back the CLI, the demo dataset, and tests.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::catalog::Catalog;
use crate::domain::behavior::{UserBehavior, UserId};
use crate::errors::{ApplicationError, ProviderError};
use crate::recommend::{RecommendationEngine, RecommendationRequest, ScoredProduct};

/// Supplies the full candidate product set for one ranking call.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn fetch_catalog(&self) -> Result<Catalog, ProviderError>;
}

/// Supplies one user's aggregated interaction snapshot.
#[async_trait]
pub trait BehaviorProvider: Send + Sync {
    async fn fetch_behavior(&self, user: &UserId) -> Result<UserBehavior, ProviderError>;
}

/// Deterministic catalog provider over an in-process snapshot.
#[derive(Clone, Debug, Default)]
pub struct InMemoryCatalogProvider {
    catalog: Catalog,
}

impl InMemoryCatalogProvider {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl CatalogProvider for InMemoryCatalogProvider {
    async fn fetch_catalog(&self) -> Result<Catalog, ProviderError> {
        Ok(self.catalog.clone())
    }
}

/// Deterministic behavior provider over an in-process snapshot map.
///
/// Unknown users resolve to a cold-start snapshot rather than an error:
/// missing signal is PartialSignal, not a failure.
#[derive(Clone, Debug, Default)]
pub struct InMemoryBehaviorProvider {
    snapshots: HashMap<UserId, UserBehavior>,
}

impl InMemoryBehaviorProvider {
    pub fn new(snapshots: HashMap<UserId, UserBehavior>) -> Self {
        Self { snapshots }
    }

    pub fn with_snapshot(mut self, user: UserId, behavior: UserBehavior) -> Self {
        self.snapshots.insert(user, behavior);
        self
    }
}

#[async_trait]
impl BehaviorProvider for InMemoryBehaviorProvider {
    async fn fetch_behavior(&self, user: &UserId) -> Result<UserBehavior, ProviderError> {
        Ok(self.snapshots.get(user).cloned().unwrap_or_else(UserBehavior::empty))
    }
}

/// Provider-backed front door: pulls the snapshots, then runs the pure
/// ranking engine over them.
pub struct Recommender<C, B> {
    catalog_provider: C,
    behavior_provider: B,
    engine: RecommendationEngine,
}

impl<C, B> Recommender<C, B>
where
    C: CatalogProvider,
    B: BehaviorProvider,
{
    pub fn new(catalog_provider: C, behavior_provider: B, engine: RecommendationEngine) -> Self {
        Self { catalog_provider, behavior_provider, engine }
    }

    pub fn engine(&self) -> &RecommendationEngine {
        &self.engine
    }

    pub async fn recommend(
        &self,
        request: RecommendationRequest,
    ) -> Result<Vec<ScoredProduct>, ApplicationError> {
        let catalog = self.catalog_provider.fetch_catalog().await?;
        let behavior = self.behavior_provider.fetch_behavior(&request.user_id).await?;

        let ranked =
            self.engine.recommend(&catalog, &behavior, request.strategy, request.limit)?;
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::fixtures::DemoDataset;
    use crate::recommend::Strategy;

    #[tokio::test]
    async fn unknown_user_degrades_to_cold_start() {
        let provider = InMemoryBehaviorProvider::default();

        let behavior = provider
            .fetch_behavior(&UserId(Uuid::nil()))
            .await
            .expect("cold start is not an error");

        assert_eq!(behavior, UserBehavior::empty());
    }

    #[tokio::test]
    async fn recommender_wires_providers_into_the_engine() {
        let user = UserId(Uuid::nil());
        let recommender = Recommender::new(
            InMemoryCatalogProvider::new(DemoDataset::catalog()),
            InMemoryBehaviorProvider::default().with_snapshot(user, DemoDataset::behavior()),
            RecommendationEngine::new(),
        );

        let ranked = recommender
            .recommend(RecommendationRequest::for_user(user).with_strategy(Strategy::Hybrid))
            .await
            .expect("demo dataset ranks");

        assert!(!ranked.is_empty());
        assert!(ranked.len() <= crate::recommend::DEFAULT_LIMIT);
    }

    #[tokio::test]
    async fn invalid_limit_propagates_as_domain_error() {
        let user = UserId(Uuid::nil());
        let recommender = Recommender::new(
            InMemoryCatalogProvider::new(DemoDataset::catalog()),
            InMemoryBehaviorProvider::default(),
            RecommendationEngine::new(),
        );

        let result = recommender
            .recommend(RecommendationRequest::for_user(user).with_limit(0))
            .await;

        assert!(matches!(
            result,
            Err(ApplicationError::Domain(crate::errors::DomainError::InvalidLimit { limit: 0 }))
        ));
    }
}
