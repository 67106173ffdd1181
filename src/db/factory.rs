//! Repository factory for dependency injection.

use std::sync::Arc;

use super::repositories::LocalRepository;
use super::repository::{Repositories, RepositoryError, RepositoryResult};

/// Repository backend type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// In-memory backend for local development and tests.
    Local,
}

impl std::str::FromStr for RepositoryType {
    type Err = RepositoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            other => Err(RepositoryError::ConfigurationError(format!(
                "Unknown repository type: {}",
                other
            ))),
        }
    }
}

/// Factory creating the [`Repositories`] bundle for a backend type.
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository bundle for the given backend type.
    pub fn create(repo_type: RepositoryType) -> RepositoryResult<Repositories> {
        match repo_type {
            RepositoryType::Local => Ok(Self::create_local().1),
        }
    }

    /// Create an in-memory bundle, returning the backing store as well so
    /// callers can seed and inspect it.
    pub fn create_local() -> (Arc<LocalRepository>, Repositories) {
        let store = Arc::new(LocalRepository::new());
        let repos = Repositories {
            providers: store.clone(),
            networks: store.clone(),
            fixed_lines: store.clone(),
            flexible_lines: store.clone(),
            journey_patterns: store.clone(),
            service_journeys: store.clone(),
            day_types: store.clone(),
        };
        (store, repos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::ProviderRepository;
    use std::str::FromStr;

    #[test]
    fn test_repository_type_from_str() {
        assert_eq!(
            RepositoryType::from_str("local").unwrap(),
            RepositoryType::Local
        );
        assert_eq!(
            RepositoryType::from_str("Local").unwrap(),
            RepositoryType::Local
        );
        assert!(RepositoryType::from_str("invalid").is_err());
    }

    #[tokio::test]
    async fn test_create_local_bundle() {
        let (store, repos) = RepositoryFactory::create_local();
        assert!(store.health_check());
        // Both handles see the same data.
        store.add_provider(crate::models::Provider {
            code: "TST".to_string(),
            name: "Test".to_string(),
            codespace: "TST".to_string(),
        });
        assert!(repos.providers.get_by_code("TST").await.is_ok());
    }
}
