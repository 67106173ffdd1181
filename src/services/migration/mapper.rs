//! Post-clone reference fix-up, day type deduplication and reference
//! validation.

use crate::db::{DayTypeRepository, NetworkRepository, Repositories, RepositoryError};
use crate::models::{
    DayType, EntityId, JourneyPattern, Line, Network, Provider, ServiceJourney,
};

use super::cloner;
use super::run::MigrationRun;
use super::{MigrationError, MigrationWarning, WarningType};

/// Rewrite every internal identifier field of the cloned aggregate that was
/// copied by value during cloning, using the run's old-id to new-id table.
///
/// Cloning is top-down, so a child may carry a reference recorded before the
/// referenced entity's own identifier was finalized; this second pass makes
/// the graph internally consistent.
pub fn update_line_references(run: &MigrationRun, line: &mut Line) {
    for pattern in &mut line.base_mut().journey_patterns {
        update_journey_pattern_references(run, pattern);
        for journey in &mut pattern.service_journeys {
            update_service_journey_references(run, journey);
        }
    }
}

/// Rewrite the pattern's line reference to the cloned line.
pub fn update_journey_pattern_references(run: &MigrationRun, pattern: &mut JourneyPattern) {
    if let Some(new_id) = run.mapped(&pattern.line_ref) {
        pattern.line_ref = new_id.clone();
    }
}

/// Rewrite the journey's pattern reference, and any day type reference that
/// still points at a source id.
pub fn update_service_journey_references(run: &MigrationRun, journey: &mut ServiceJourney) {
    if let Some(new_id) = run.mapped(&journey.journey_pattern_ref) {
        journey.journey_pattern_ref = new_id.clone();
    }
    for day_type_ref in &mut journey.day_type_refs {
        if let Some(new_id) = run.mapped(day_type_ref) {
            *day_type_ref = new_id.clone();
        }
    }
}

/// Resolve the day type a cloned service journey should reference in the
/// destination tenant.
///
/// Resolution order: the run's signature cache (two journeys in one run
/// sharing a source day type end up sharing the destination day type), then
/// a structural scan of the destination tenant's existing day types
/// (cross-run dedup, no new row), then a fresh clone registered as pending
/// persistence. Two different source day types with equal signatures
/// resolve to the same destination day type; the second one is treated as a
/// duplicate of the first.
pub async fn get_mapped_day_type(
    repos: &Repositories,
    run: &mut MigrationRun,
    source: &DayType,
) -> Result<DayType, MigrationError> {
    let signature = source.structural_signature();

    if let Some(cached) = run.cached_day_type(&signature) {
        let cached = cached.clone();
        log::debug!("day type {} resolved from run cache", source.id);
        run.record_alias(source.id.clone(), cached.id.clone());
        return Ok(cached);
    }

    let target_code = run.target_provider().code.clone();
    let existing = repos.day_types.find_by_provider(&target_code).await?;
    if let Some(found) = existing
        .into_iter()
        .find(|d| d.structural_signature() == signature)
    {
        log::debug!(
            "day type {} matches existing {} in provider {}, reusing",
            source.id,
            found.id,
            target_code
        );
        run.record_alias(source.id.clone(), found.id.clone());
        run.cache_day_type(signature, found.clone(), false);
        return Ok(found);
    }

    let clone = cloner::clone_day_type(run, source);
    run.cache_day_type(signature, clone.clone(), true);
    Ok(clone)
}

/// Check that a reference string is a tenant-qualified `codespace:type:id`
/// triple. Blank references fail.
pub fn validate_entity_ref(value: &str, description: &str) -> Result<(), MigrationError> {
    if EntityId::is_well_formed(value) {
        Ok(())
    } else {
        Err(MigrationError::ReferenceValidation(format!(
            "{} '{}' does not match the expected format codespace:type:id",
            description, value
        )))
    }
}

/// Check that a network exists and is owned by the target provider.
pub async fn validate_network_reference(
    networks: &dyn NetworkRepository,
    network_id: &EntityId,
    target: &Provider,
) -> Result<Network, MigrationError> {
    let network = match networks.get_one(network_id).await {
        Ok(network) => network,
        Err(RepositoryError::NotFound(_)) => {
            return Err(MigrationError::ReferenceValidation(format!(
                "Network {} not found in target provider {}",
                network_id, target.code
            )))
        }
        Err(e) => return Err(e.into()),
    };

    if network.provider != target.code {
        return Err(MigrationError::ReferenceValidation(format!(
            "Network {} not found in target provider {}",
            network_id, target.code
        )));
    }

    Ok(network)
}

/// Pre-flight validation of the references the migrated line will carry: the
/// destination network, the line's operator reference, and every stop
/// point's quay reference for fixed lines.
///
/// Failures are collected as warnings, never raised: these references point
/// at systems outside this service's control and may become resolvable
/// later.
pub async fn validate_line_references(
    networks: &dyn NetworkRepository,
    line: &Line,
    target_network_id: &EntityId,
    target: &Provider,
) -> Result<Vec<MigrationWarning>, MigrationError> {
    let mut warnings = Vec::new();

    match validate_network_reference(networks, target_network_id, target).await {
        Ok(_) => {}
        Err(MigrationError::ReferenceValidation(message)) => {
            warnings.push(MigrationWarning {
                warning_type: WarningType::NetworkReference,
                message,
                entity_id: target_network_id.to_string(),
            });
        }
        Err(e) => return Err(e),
    }

    if let Some(operator_ref) = &line.base().operator_ref {
        if let Err(MigrationError::ReferenceValidation(message)) =
            validate_entity_ref(operator_ref, "Operator reference")
        {
            warnings.push(MigrationWarning {
                warning_type: WarningType::OperatorReference,
                message,
                entity_id: line.id().to_string(),
            });
        }
    }

    if line.is_fixed() {
        for pattern in &line.base().journey_patterns {
            for stop_point in &pattern.points_in_sequence {
                let quay_ref = stop_point.quay_ref.as_deref().unwrap_or("");
                if let Err(MigrationError::ReferenceValidation(message)) =
                    validate_entity_ref(quay_ref, "Quay reference")
                {
                    warnings.push(MigrationWarning {
                        warning_type: WarningType::QuayReference,
                        message,
                        entity_id: stop_point.id.to_string(),
                    });
                }
            }
        }
    }

    Ok(warnings)
}
