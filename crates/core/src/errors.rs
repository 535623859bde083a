use thiserror::Error;

use crate::domain::product::ProductId;

/// Contract violations raised by the engine itself.
///
/// Domain degeneracies (no candidates survive a pre-filter, no behavior
/// signal) are never errors; they resolve to empty rankings.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("limit must be a positive integer, got {limit}")]
    InvalidLimit { limit: usize },
    #[error("duplicate product id in catalog snapshot: {id:?}")]
    DuplicateProduct { id: ProductId },
    #[error("fusion weights must sum to 1.0, got {sum}")]
    InvalidFusionWeights { sum: String },
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

/// Failures from the catalog/behavior provider seams.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ProviderError {
    #[error("catalog source unavailable: {0}")]
    CatalogUnavailable(String),
    #[error("behavior source unavailable: {0}")]
    BehaviorUnavailable(String),
    #[error("could not decode provider payload: {0}")]
    Decode(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("data load failure: {0}")]
    DataLoad(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Stable machine-readable class for structured command output.
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Domain(_) => "invalid_input",
            Self::Provider(_) => "provider",
            Self::DataLoad(_) => "data_load",
            Self::Configuration(_) => "config_validation",
        }
    }
}
