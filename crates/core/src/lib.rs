pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod fixtures;
pub mod providers;
pub mod recommend;

pub use catalog::Catalog;
pub use domain::behavior::{PriceRange, UserBehavior, UserId};
pub use domain::product::{Product, ProductId, Rating, Vendor, VendorId};
pub use errors::{ApplicationError, DomainError, ProviderError};
pub use fixtures::DemoDataset;
pub use providers::{
    BehaviorProvider, CatalogProvider, InMemoryBehaviorProvider, InMemoryCatalogProvider,
    Recommender,
};
pub use recommend::{
    FusionWeights, RecommendationEngine, RecommendationRequest, ScoredProduct, Strategy,
    DEFAULT_FUSION_WEIGHTS, DEFAULT_LIMIT,
};
