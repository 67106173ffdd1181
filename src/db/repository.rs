//! Repository traits for abstracting entity storage.
//!
//! These traits define the persistence interface consumed by the service
//! layer, allowing different backends (in-memory, SQL, ...) to be swapped
//! via dependency injection.

use std::sync::Arc;

use async_trait::async_trait;

use crate::models::{
    DayType, EntityId, FixedLine, FlexibleLine, JourneyPattern, Network, Provider,
    ServiceJourney,
};

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Data validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<String> for RepositoryError {
    fn from(s: String) -> Self {
        RepositoryError::InternalError(s)
    }
}

impl From<&str> for RepositoryError {
    fn from(s: &str) -> Self {
        RepositoryError::InternalError(s.to_string())
    }
}

/// Provider (tenant) lookups. Providers are read-only from the service
/// layer's point of view.
#[async_trait]
pub trait ProviderRepository: Send + Sync {
    /// Look up a provider by its unique code.
    async fn get_by_code(&self, code: &str) -> RepositoryResult<Provider>;
}

/// Network lookups. Networks are read-only inputs to migration.
#[async_trait]
pub trait NetworkRepository: Send + Sync {
    async fn get_one(&self, id: &EntityId) -> RepositoryResult<Network>;
}

/// Storage for fixed lines. `save` persists the whole aggregate: the line
/// together with every journey pattern, stop point, service journey and
/// passing time it owns.
#[async_trait]
pub trait FixedLineRepository: Send + Sync {
    async fn get_one(&self, id: &EntityId) -> RepositoryResult<FixedLine>;
    async fn save(&self, line: &FixedLine) -> RepositoryResult<()>;
    async fn delete(&self, id: &EntityId) -> RepositoryResult<()>;
    /// Name-uniqueness lookup used by conflict resolution.
    async fn find_by_provider_and_name(
        &self,
        provider: &str,
        name: &str,
    ) -> RepositoryResult<Option<FixedLine>>;
}

/// Storage for flexible lines; same aggregate-save semantics as
/// [`FixedLineRepository`].
#[async_trait]
pub trait FlexibleLineRepository: Send + Sync {
    async fn get_one(&self, id: &EntityId) -> RepositoryResult<FlexibleLine>;
    async fn save(&self, line: &FlexibleLine) -> RepositoryResult<()>;
    async fn delete(&self, id: &EntityId) -> RepositoryResult<()>;
    async fn find_by_provider_and_name(
        &self,
        provider: &str,
        name: &str,
    ) -> RepositoryResult<Option<FlexibleLine>>;
}

/// Name-uniqueness lookups over journey patterns. Patterns are persisted as
/// part of their line aggregate, so no `save` is exposed here.
#[async_trait]
pub trait JourneyPatternRepository: Send + Sync {
    async fn find_by_provider_and_name(
        &self,
        provider: &str,
        name: &str,
    ) -> RepositoryResult<Option<JourneyPattern>>;
}

/// Name-uniqueness lookups over service journeys.
#[async_trait]
pub trait ServiceJourneyRepository: Send + Sync {
    async fn find_by_provider_and_name(
        &self,
        provider: &str,
        name: &str,
    ) -> RepositoryResult<Option<ServiceJourney>>;
}

/// Storage for shared day types.
#[async_trait]
pub trait DayTypeRepository: Send + Sync {
    async fn get_one(&self, id: &EntityId) -> RepositoryResult<DayType>;
    async fn save(&self, day_type: &DayType) -> RepositoryResult<()>;
    /// All day types owned by a provider, used for structural
    /// deduplication scans.
    async fn find_by_provider(&self, provider: &str) -> RepositoryResult<Vec<DayType>>;
}

/// Bundle of repository trait objects handed to services.
#[derive(Clone)]
pub struct Repositories {
    pub providers: Arc<dyn ProviderRepository>,
    pub networks: Arc<dyn NetworkRepository>,
    pub fixed_lines: Arc<dyn FixedLineRepository>,
    pub flexible_lines: Arc<dyn FlexibleLineRepository>,
    pub journey_patterns: Arc<dyn JourneyPatternRepository>,
    pub service_journeys: Arc<dyn ServiceJourneyRepository>,
    pub day_types: Arc<dyn DayTypeRepository>,
}
