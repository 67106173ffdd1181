//! Line migration engine.
//!
//! Takes a complete line aggregate owned by one provider and produces a
//! structurally equivalent, fully independent copy owned by another, with
//! fresh identifiers, internally consistent cross-references, deduplicated
//! shared day types and configurable name-conflict handling.
//!
//! One call to [`MigrationService::migrate_line`] runs the phases
//! `Validating -> Cloning -> ReferenceFixup -> (DryRunDiscard | Persisting)
//! -> Completed` inside a single request; any hard failure aborts before
//! anything is persisted, so the operation is all-or-nothing.

pub mod cloner;
pub mod idgen;
pub mod mapper;
pub mod run;

use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::auth::UserContext;
use crate::db::{
    DayTypeRepository, FixedLineRepository, FlexibleLineRepository, ProviderRepository,
    Repositories, RepositoryError,
};
use crate::models::{EntityId, EntityType, Line};

pub use run::MigrationRun;

/// Failure taxonomy of the migration engine.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Access denied to provider {0}")]
    Security(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{entity_type} with name '{name}' already exists in provider {provider}")]
    NameConflict {
        entity_type: EntityType,
        name: String,
        provider: String,
    },

    /// Naming collision under the `SKIP` strategy: an expected,
    /// unsuccessful-by-design outcome, not a system error.
    #[error("Migration skipped: {0}")]
    ConflictSkipped(String),

    #[error("Invalid reference: {0}")]
    ReferenceValidation(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Policy governing how a destination-tenant name collision is handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConflictStrategy {
    #[default]
    Fail,
    Rename,
    Skip,
}

impl FromStr for ConflictStrategy {
    type Err = MigrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FAIL" => Ok(Self::Fail),
            "RENAME" => Ok(Self::Rename),
            "SKIP" => Ok(Self::Skip),
            other => Err(MigrationError::InvalidArgument(format!(
                "Unknown conflict resolution strategy: {}",
                other
            ))),
        }
    }
}

/// Per-request migration options.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MigrationOptions {
    #[serde(default)]
    pub conflict_resolution: ConflictStrategy,
    #[serde(default = "default_include_day_types")]
    pub include_day_types: bool,
    #[serde(default)]
    pub dry_run: bool,
}

fn default_include_day_types() -> bool {
    true
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self {
            conflict_resolution: ConflictStrategy::Fail,
            include_day_types: true,
            dry_run: false,
        }
    }
}

/// Structured migration request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationInput {
    pub source_line_id: String,
    /// Destination provider code.
    pub target_provider_id: String,
    pub target_network_id: String,
    #[serde(default)]
    pub options: MigrationOptions,
}

/// Category of a non-fatal reference validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningType {
    NetworkReference,
    OperatorReference,
    QuayReference,
}

/// One non-fatal issue attached to a migration result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationWarning {
    pub warning_type: WarningType,
    pub message: String,
    pub entity_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MigrationSummary {
    pub entities_migrated: usize,
    pub warnings_count: usize,
    pub execution_time_ms: u64,
}

/// Structured migration outcome. Always returned, never a raw error:
/// callers distinguish success and failure via the `success` flag and
/// consult `warnings` even on success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationResult {
    pub success: bool,
    pub migrated_line_id: Option<String>,
    pub warnings: Vec<MigrationWarning>,
    pub summary: MigrationSummary,
    pub error_message: Option<String>,
}

/// Phases of one migration, used for log correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MigrationPhase {
    Validating,
    Cloning,
    ReferenceFixup,
    DryRunDiscard,
    Persisting,
    Completed,
    Aborted,
}

impl MigrationPhase {
    fn as_str(&self) -> &'static str {
        match self {
            MigrationPhase::Validating => "validating",
            MigrationPhase::Cloning => "cloning",
            MigrationPhase::ReferenceFixup => "reference_fixup",
            MigrationPhase::DryRunDiscard => "dry_run_discard",
            MigrationPhase::Persisting => "persisting",
            MigrationPhase::Completed => "completed",
            MigrationPhase::Aborted => "aborted",
        }
    }
}

struct MigrationOutcome {
    line_id: EntityId,
    warnings: Vec<MigrationWarning>,
    entities_migrated: usize,
}

/// Orchestrates one line migration end-to-end: authorization, precondition
/// validation, cloning, reference fix-up, and persistence (or discard in
/// dry-run mode).
pub struct MigrationService {
    repos: Repositories,
    user_context: Arc<dyn UserContext>,
}

impl MigrationService {
    pub fn new(repos: Repositories, user_context: Arc<dyn UserContext>) -> Self {
        Self {
            repos,
            user_context,
        }
    }

    /// Migrate one line aggregate into another provider.
    pub async fn migrate_line(&self, input: &MigrationInput) -> MigrationResult {
        let started = Instant::now();

        match self.run_migration(input).await {
            Ok(outcome) => {
                log::info!(
                    "migration of {} {}: {} entities, {} warnings",
                    input.source_line_id,
                    MigrationPhase::Completed.as_str(),
                    outcome.entities_migrated,
                    outcome.warnings.len()
                );
                MigrationResult {
                    success: true,
                    migrated_line_id: Some(outcome.line_id.to_string()),
                    summary: MigrationSummary {
                        entities_migrated: outcome.entities_migrated,
                        warnings_count: outcome.warnings.len(),
                        execution_time_ms: started.elapsed().as_millis() as u64,
                    },
                    warnings: outcome.warnings,
                    error_message: None,
                }
            }
            Err(err) => {
                match &err {
                    MigrationError::ConflictSkipped(msg) => {
                        log::info!(
                            "migration of {} {}: {}",
                            input.source_line_id,
                            MigrationPhase::Aborted.as_str(),
                            msg
                        );
                    }
                    other => {
                        log::warn!(
                            "migration of {} {}: {}",
                            input.source_line_id,
                            MigrationPhase::Aborted.as_str(),
                            other
                        );
                    }
                }
                MigrationResult {
                    success: false,
                    migrated_line_id: None,
                    warnings: Vec::new(),
                    summary: MigrationSummary {
                        entities_migrated: 0,
                        warnings_count: 0,
                        execution_time_ms: started.elapsed().as_millis() as u64,
                    },
                    error_message: Some(err.to_string()),
                }
            }
        }
    }

    async fn run_migration(
        &self,
        input: &MigrationInput,
    ) -> Result<MigrationOutcome, MigrationError> {
        log::debug!(
            "migration of {}: {}",
            input.source_line_id,
            MigrationPhase::Validating.as_str()
        );

        let source_line_id = EntityId::from(input.source_line_id.as_str());
        let source = self.find_line(&source_line_id).await?;
        let source_provider = source.provider().to_string();

        if !self.user_context.has_access_to_provider(&source_provider) {
            return Err(MigrationError::Security(source_provider));
        }
        if !self
            .user_context
            .has_access_to_provider(&input.target_provider_id)
        {
            return Err(MigrationError::Security(input.target_provider_id.clone()));
        }
        if source_provider == input.target_provider_id {
            return Err(MigrationError::InvalidArgument(
                "cannot migrate within the same provider".to_string(),
            ));
        }

        let target_provider = match self
            .repos
            .providers
            .get_by_code(&input.target_provider_id)
            .await
        {
            Ok(provider) => provider,
            Err(RepositoryError::NotFound(_)) => {
                return Err(MigrationError::NotFound(format!(
                    "Target provider {} not found",
                    input.target_provider_id
                )))
            }
            Err(e) => return Err(e.into()),
        };

        // The target network is a hard precondition, unlike the warning-only
        // reference validation below.
        let target_network_id = EntityId::from(input.target_network_id.as_str());
        let target_network = match mapper::validate_network_reference(
            self.repos.networks.as_ref(),
            &target_network_id,
            &target_provider,
        )
        .await
        {
            Ok(network) => network,
            Err(MigrationError::ReferenceValidation(msg)) => {
                return Err(MigrationError::InvalidArgument(msg))
            }
            Err(e) => return Err(e),
        };

        if source.base().journey_patterns.is_empty() {
            return Err(MigrationError::InvalidArgument(format!(
                "Line {} has no journey patterns",
                source_line_id
            )));
        }

        let mut run = MigrationRun::new(target_provider.clone(), input.options);

        let reference_warnings = mapper::validate_line_references(
            self.repos.networks.as_ref(),
            &source,
            &target_network_id,
            &target_provider,
        )
        .await?;
        run.extend_warnings(reference_warnings);

        log::debug!(
            "migration of {}: {}",
            input.source_line_id,
            MigrationPhase::Cloning.as_str()
        );
        let mut cloned = cloner::clone_line(&self.repos, &mut run, &source, &target_network).await?;

        log::debug!(
            "migration of {}: {}",
            input.source_line_id,
            MigrationPhase::ReferenceFixup.as_str()
        );
        mapper::update_line_references(&run, &mut cloned);

        if run.options().dry_run {
            log::debug!(
                "migration of {}: {}",
                input.source_line_id,
                MigrationPhase::DryRunDiscard.as_str()
            );
        } else {
            log::debug!(
                "migration of {}: {}",
                input.source_line_id,
                MigrationPhase::Persisting.as_str()
            );
            self.persist(&run, &cloned).await?;
        }

        Ok(MigrationOutcome {
            line_id: cloned.id().clone(),
            entities_migrated: run.entities_migrated(),
            warnings: run.into_warnings(),
        })
    }

    /// Load the source line, searching both variant stores.
    async fn find_line(&self, id: &EntityId) -> Result<Line, MigrationError> {
        match self.repos.fixed_lines.get_one(id).await {
            Ok(line) => return Ok(Line::Fixed(line)),
            Err(RepositoryError::NotFound(_)) => {}
            Err(e) => return Err(e.into()),
        }
        match self.repos.flexible_lines.get_one(id).await {
            Ok(line) => Ok(Line::Flexible(line)),
            Err(RepositoryError::NotFound(_)) => {
                Err(MigrationError::NotFound(format!("Line {} not found", id)))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Save the day types created in this run, then the line aggregate.
    async fn persist(&self, run: &MigrationRun, cloned: &Line) -> Result<(), MigrationError> {
        for day_type in run.created_day_types() {
            self.repos.day_types.save(&day_type).await?;
        }
        match cloned {
            Line::Fixed(line) => self.repos.fixed_lines.save(line).await?,
            Line::Flexible(line) => self.repos.flexible_lines.save(line).await?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_strategy_parsing() {
        assert_eq!(
            ConflictStrategy::from_str("FAIL").unwrap(),
            ConflictStrategy::Fail
        );
        assert_eq!(
            ConflictStrategy::from_str("RENAME").unwrap(),
            ConflictStrategy::Rename
        );
        assert_eq!(
            ConflictStrategy::from_str("SKIP").unwrap(),
            ConflictStrategy::Skip
        );
        assert!(matches!(
            ConflictStrategy::from_str("MERGE"),
            Err(MigrationError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_options_defaults() {
        let options = MigrationOptions::default();
        assert_eq!(options.conflict_resolution, ConflictStrategy::Fail);
        assert!(options.include_day_types);
        assert!(!options.dry_run);
    }

    #[test]
    fn test_input_deserializes_without_options() {
        let input: MigrationInput = serde_json::from_str(
            r#"{
                "source_line_id": "SRC:Line:1",
                "target_provider_id": "DST",
                "target_network_id": "DST:Network:1"
            }"#,
        )
        .unwrap();
        assert_eq!(
            input.options.conflict_resolution,
            ConflictStrategy::Fail
        );
        assert!(input.options.include_day_types);
        assert!(!input.options.dry_run);
    }

    #[test]
    fn test_strategy_deserializes_from_wire_names() {
        let options: MigrationOptions =
            serde_json::from_str(r#"{"conflict_resolution": "RENAME"}"#).unwrap();
        assert_eq!(options.conflict_resolution, ConflictStrategy::Rename);
    }
}
