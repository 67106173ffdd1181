//! In-memory local repository implementation.
//!
//! This module provides a local implementation of all repository traits
//! suitable for unit testing and local development. All data is stored in
//! memory using HashMap structures, providing fast, deterministic and
//! isolated execution.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::db::repository::*;
use crate::models::{
    DayType, EntityId, FixedLine, FlexibleLine, JourneyPattern, Line, Network, Provider,
    ServiceJourney,
};

/// In-memory local repository backing every repository trait.
///
/// Journey patterns and service journeys live inside their line aggregates;
/// the name lookups scan the stored aggregates rather than keeping separate
/// indexes.
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

#[derive(Default)]
struct LocalData {
    providers: HashMap<String, Provider>,
    networks: HashMap<EntityId, Network>,
    fixed_lines: HashMap<EntityId, FixedLine>,
    flexible_lines: HashMap<EntityId, FlexibleLine>,
    day_types: HashMap<EntityId, DayType>,

    is_healthy: bool,
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData {
                is_healthy: true,
                ..Default::default()
            })),
        }
    }

    /// Seed a provider.
    pub fn add_provider(&self, provider: Provider) {
        let mut data = self.data.write().unwrap();
        data.providers.insert(provider.code.clone(), provider);
    }

    /// Seed a network.
    pub fn add_network(&self, network: Network) {
        let mut data = self.data.write().unwrap();
        data.networks.insert(network.id.clone(), network);
    }

    /// Seed a day type.
    pub fn add_day_type(&self, day_type: DayType) {
        let mut data = self.data.write().unwrap();
        data.day_types.insert(day_type.id.clone(), day_type);
    }

    /// Seed a line of either variant.
    pub fn add_line(&self, line: Line) {
        let mut data = self.data.write().unwrap();
        match line {
            Line::Fixed(l) => {
                data.fixed_lines.insert(l.base.id.clone(), l);
            }
            Line::Flexible(l) => {
                data.flexible_lines.insert(l.base.id.clone(), l);
            }
        }
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        let mut data = self.data.write().unwrap();
        data.is_healthy = healthy;
    }

    /// Check if the backing store is healthy.
    pub fn health_check(&self) -> bool {
        self.data.read().unwrap().is_healthy
    }

    /// Clear all data.
    pub fn clear(&self) {
        let mut data = self.data.write().unwrap();
        *data = LocalData {
            is_healthy: data.is_healthy,
            ..Default::default()
        };
    }

    /// Number of lines stored for a provider, both variants.
    pub fn line_count(&self, provider: &str) -> usize {
        let data = self.data.read().unwrap();
        data.fixed_lines
            .values()
            .filter(|l| l.base.provider == provider)
            .count()
            + data
                .flexible_lines
                .values()
                .filter(|l| l.base.provider == provider)
                .count()
    }

    /// Number of day types stored for a provider.
    pub fn day_type_count(&self, provider: &str) -> usize {
        let data = self.data.read().unwrap();
        data.day_types
            .values()
            .filter(|d| d.provider == provider)
            .count()
    }

    fn check_health(&self) -> RepositoryResult<()> {
        if !self.data.read().unwrap().is_healthy {
            return Err(RepositoryError::ConnectionError(
                "Repository is not healthy".to_string(),
            ));
        }
        Ok(())
    }

    /// Iterate the journey patterns of every line owned by `provider`.
    fn patterns_for_provider(data: &LocalData, provider: &str) -> Vec<JourneyPattern> {
        let fixed = data
            .fixed_lines
            .values()
            .filter(|l| l.base.provider == provider)
            .flat_map(|l| l.base.journey_patterns.iter().cloned());
        let flexible = data
            .flexible_lines
            .values()
            .filter(|l| l.base.provider == provider)
            .flat_map(|l| l.base.journey_patterns.iter().cloned());
        fixed.chain(flexible).collect()
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderRepository for LocalRepository {
    async fn get_by_code(&self, code: &str) -> RepositoryResult<Provider> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        data.providers
            .get(code)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("Provider {} not found", code)))
    }
}

#[async_trait]
impl NetworkRepository for LocalRepository {
    async fn get_one(&self, id: &EntityId) -> RepositoryResult<Network> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        data.networks
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("Network {} not found", id)))
    }
}

#[async_trait]
impl FixedLineRepository for LocalRepository {
    async fn get_one(&self, id: &EntityId) -> RepositoryResult<FixedLine> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        data.fixed_lines
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("FixedLine {} not found", id)))
    }

    async fn save(&self, line: &FixedLine) -> RepositoryResult<()> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();
        data.fixed_lines.insert(line.base.id.clone(), line.clone());
        Ok(())
    }

    async fn delete(&self, id: &EntityId) -> RepositoryResult<()> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();
        data.fixed_lines
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::NotFound(format!("FixedLine {} not found", id)))
    }

    async fn find_by_provider_and_name(
        &self,
        provider: &str,
        name: &str,
    ) -> RepositoryResult<Option<FixedLine>> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        Ok(data
            .fixed_lines
            .values()
            .find(|l| l.base.provider == provider && l.base.name == name)
            .cloned())
    }
}

#[async_trait]
impl FlexibleLineRepository for LocalRepository {
    async fn get_one(&self, id: &EntityId) -> RepositoryResult<FlexibleLine> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        data.flexible_lines
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("FlexibleLine {} not found", id)))
    }

    async fn save(&self, line: &FlexibleLine) -> RepositoryResult<()> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();
        data.flexible_lines
            .insert(line.base.id.clone(), line.clone());
        Ok(())
    }

    async fn delete(&self, id: &EntityId) -> RepositoryResult<()> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();
        data.flexible_lines
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::NotFound(format!("FlexibleLine {} not found", id)))
    }

    async fn find_by_provider_and_name(
        &self,
        provider: &str,
        name: &str,
    ) -> RepositoryResult<Option<FlexibleLine>> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        Ok(data
            .flexible_lines
            .values()
            .find(|l| l.base.provider == provider && l.base.name == name)
            .cloned())
    }
}

#[async_trait]
impl JourneyPatternRepository for LocalRepository {
    async fn find_by_provider_and_name(
        &self,
        provider: &str,
        name: &str,
    ) -> RepositoryResult<Option<JourneyPattern>> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        Ok(Self::patterns_for_provider(&data, provider)
            .into_iter()
            .find(|p| p.name.as_deref() == Some(name)))
    }
}

#[async_trait]
impl ServiceJourneyRepository for LocalRepository {
    async fn find_by_provider_and_name(
        &self,
        provider: &str,
        name: &str,
    ) -> RepositoryResult<Option<ServiceJourney>> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        Ok(Self::patterns_for_provider(&data, provider)
            .into_iter()
            .flat_map(|p| p.service_journeys)
            .find(|j| j.name.as_deref() == Some(name)))
    }
}

#[async_trait]
impl DayTypeRepository for LocalRepository {
    async fn get_one(&self, id: &EntityId) -> RepositoryResult<DayType> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        data.day_types
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("DayType {} not found", id)))
    }

    async fn save(&self, day_type: &DayType) -> RepositoryResult<()> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();
        data.day_types.insert(day_type.id.clone(), day_type.clone());
        Ok(())
    }

    async fn find_by_provider(&self, provider: &str) -> RepositoryResult<Vec<DayType>> {
        self.check_health()?;
        let data = self.data.read().unwrap();
        Ok(data
            .day_types
            .values()
            .filter(|d| d.provider == provider)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(code: &str) -> Provider {
        Provider {
            code: code.to_string(),
            name: format!("{} provider", code),
            codespace: code.to_string(),
        }
    }

    #[tokio::test]
    async fn test_provider_lookup() {
        let repo = LocalRepository::new();
        repo.add_provider(provider("TST"));

        let found = repo.get_by_code("TST").await.unwrap();
        assert_eq!(found.code, "TST");

        let missing = repo.get_by_code("NOPE").await;
        assert!(matches!(missing, Err(RepositoryError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_unhealthy_repository_fails() {
        let repo = LocalRepository::new();
        repo.add_provider(provider("TST"));
        repo.set_healthy(false);

        let result = repo.get_by_code("TST").await;
        assert!(matches!(result, Err(RepositoryError::ConnectionError(_))));
    }

    #[tokio::test]
    async fn test_clear_preserves_health() {
        let repo = LocalRepository::new();
        repo.add_provider(provider("TST"));
        repo.clear();

        assert!(repo.health_check());
        assert!(repo.get_by_code("TST").await.is_err());
    }
}
