//! Identifier minting and name conflict resolution.

use chrono::Utc;
use uuid::Uuid;

use crate::db::{
    FixedLineRepository, FlexibleLineRepository, JourneyPatternRepository, Repositories,
    RepositoryResult, ServiceJourneyRepository,
};
use crate::models::{EntityId, EntityType, Provider};

use super::{ConflictStrategy, MigrationError};

/// Mint a fresh identifier scoped to the target provider's codespace.
/// Uniqueness comes from the random suffix; there is no collision check.
pub fn generate_id(entity_type: EntityType, target: &Provider) -> EntityId {
    EntityId::build(&target.codespace, entity_type, &Uuid::new_v4().to_string())
}

/// Resolve a name against the destination tenant under the run's conflict
/// strategy.
///
/// Returns the original name when no entity of the same type already uses
/// it. On a conflict, `Fail` raises [`MigrationError::NameConflict`], `Skip`
/// raises [`MigrationError::ConflictSkipped`] (an expected, non-error
/// outcome for the caller), and `Rename` appends `_migrated_<unix-seconds>`
/// plus an incrementing counter until the candidate is free.
pub async fn resolve_name(
    repos: &Repositories,
    entity_type: EntityType,
    original_name: &str,
    target: &Provider,
    strategy: ConflictStrategy,
) -> Result<String, MigrationError> {
    if !name_exists(repos, entity_type, &target.code, original_name).await? {
        return Ok(original_name.to_string());
    }

    match strategy {
        ConflictStrategy::Fail => Err(MigrationError::NameConflict {
            entity_type,
            name: original_name.to_string(),
            provider: target.code.clone(),
        }),
        ConflictStrategy::Skip => Err(MigrationError::ConflictSkipped(format!(
            "{} '{}' already exists in provider {}, skipping migration",
            entity_type, original_name, target.code
        ))),
        ConflictStrategy::Rename => {
            let base = format!("{}_migrated_{}", original_name, Utc::now().timestamp());
            let mut candidate = base.clone();
            let mut counter = 2;
            while name_exists(repos, entity_type, &target.code, &candidate).await? {
                candidate = format!("{}_{}", base, counter);
                counter += 1;
            }
            log::debug!(
                "renamed {} '{}' to '{}' in provider {}",
                entity_type,
                original_name,
                candidate,
                target.code
            );
            Ok(candidate)
        }
    }
}

/// Type-specific name-uniqueness lookup. Lines are checked across both
/// variants; entity types without a name index never conflict.
async fn name_exists(
    repos: &Repositories,
    entity_type: EntityType,
    provider: &str,
    name: &str,
) -> RepositoryResult<bool> {
    match entity_type {
        EntityType::Line => {
            let fixed = repos
                .fixed_lines
                .find_by_provider_and_name(provider, name)
                .await?
                .is_some();
            if fixed {
                return Ok(true);
            }
            Ok(repos
                .flexible_lines
                .find_by_provider_and_name(provider, name)
                .await?
                .is_some())
        }
        EntityType::JourneyPattern => Ok(repos
            .journey_patterns
            .find_by_provider_and_name(provider, name)
            .await?
            .is_some()),
        EntityType::ServiceJourney => Ok(repos
            .service_journeys
            .find_by_provider_and_name(provider, name)
            .await?
            .is_some()),
        _ => Ok(false),
    }
}
