//! Persistence layer for tenant-scoped line data.
//!
//! Storage is abstracted behind per-entity repository traits so backends can
//! be swapped via dependency injection:
//!
//! - `repository`: trait definitions plus the [`Repositories`] bundle handed
//!   to services
//! - `repositories::local`: in-memory implementation for unit testing and
//!   local development
//! - `factory`: creates a configured [`Repositories`] bundle
//! - `repo_config`: TOML configuration (backend selection, migration
//!   defaults)

pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;

pub use factory::{RepositoryFactory, RepositoryType};
pub use repo_config::AppConfig;
pub use repositories::LocalRepository;
pub use repository::{
    DayTypeRepository, FixedLineRepository, FlexibleLineRepository, JourneyPatternRepository,
    NetworkRepository, ProviderRepository, Repositories, RepositoryError, RepositoryResult,
    ServiceJourneyRepository,
};
