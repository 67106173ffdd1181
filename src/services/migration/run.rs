//! Per-invocation migration context.
//!
//! All mutable bookkeeping for one migration lives in a [`MigrationRun`]
//! created at the start of `migrate_line` and dropped at the end. The
//! old-id to new-id mapping is the single authoritative table shared by the
//! cloner, the identifier generator and the reference mapper, so concurrent
//! migrations on one service instance cannot interfere with each other.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use crate::models::{DayType, EntityId, Provider};

use super::{MigrationOptions, MigrationWarning};

pub struct MigrationRun {
    target_provider: Provider,
    options: MigrationOptions,
    /// Old identifier to new identifier, one entry per cloned entity.
    id_map: HashMap<EntityId, EntityId>,
    /// Day types already resolved in this run, keyed by structural
    /// signature. Holds both reused destination rows and fresh clones.
    day_type_cache: HashMap<String, DayType>,
    /// Ids of day types created (not reused) in this run; these are the
    /// only day types the persisting step writes.
    created_day_types: HashSet<EntityId>,
    warnings: Vec<MigrationWarning>,
    entities_migrated: usize,
    started: Instant,
}

impl MigrationRun {
    pub fn new(target_provider: Provider, options: MigrationOptions) -> Self {
        Self {
            target_provider,
            options,
            id_map: HashMap::new(),
            day_type_cache: HashMap::new(),
            created_day_types: HashSet::new(),
            warnings: Vec::new(),
            entities_migrated: 0,
            started: Instant::now(),
        }
    }

    pub fn target_provider(&self) -> &Provider {
        &self.target_provider
    }

    pub fn options(&self) -> &MigrationOptions {
        &self.options
    }

    /// Register an old-id to new-id pair and count the cloned entity.
    pub fn record_mapping(&mut self, old_id: EntityId, new_id: EntityId) {
        self.id_map.insert(old_id, new_id);
        self.entities_migrated += 1;
    }

    /// Register a pair without counting, for a source id resolving to an
    /// already-existing destination entity (day type reuse).
    pub fn record_alias(&mut self, old_id: EntityId, new_id: EntityId) {
        self.id_map.insert(old_id, new_id);
    }

    pub fn mapped(&self, old_id: &EntityId) -> Option<&EntityId> {
        self.id_map.get(old_id)
    }

    pub fn has_mapping(&self, old_id: &EntityId) -> bool {
        self.id_map.contains_key(old_id)
    }

    pub fn cached_day_type(&self, signature: &str) -> Option<&DayType> {
        self.day_type_cache.get(signature)
    }

    /// Cache a resolved day type. `created` marks it as produced by this
    /// run, meaning it still has to be persisted.
    pub fn cache_day_type(&mut self, signature: String, day_type: DayType, created: bool) {
        if created {
            self.created_day_types.insert(day_type.id.clone());
        }
        self.day_type_cache.insert(signature, day_type);
    }

    /// Day types created in this run, to be saved before the line aggregate.
    pub fn created_day_types(&self) -> Vec<DayType> {
        self.day_type_cache
            .values()
            .filter(|d| self.created_day_types.contains(&d.id))
            .cloned()
            .collect()
    }

    pub fn add_warning(&mut self, warning: MigrationWarning) {
        self.warnings.push(warning);
    }

    pub fn extend_warnings(&mut self, warnings: Vec<MigrationWarning>) {
        self.warnings.extend(warnings);
    }

    pub fn warnings(&self) -> &[MigrationWarning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<MigrationWarning> {
        self.warnings
    }

    pub fn entities_migrated(&self) -> usize {
        self.entities_migrated
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayOfWeek, DayType};

    fn run() -> MigrationRun {
        MigrationRun::new(
            Provider {
                code: "DST".to_string(),
                name: "Destination".to_string(),
                codespace: "DST".to_string(),
            },
            MigrationOptions::default(),
        )
    }

    #[test]
    fn test_mapping_counts_entities() {
        let mut run = run();
        run.record_mapping(EntityId::from("SRC:Line:1"), EntityId::from("DST:Line:a"));
        run.record_alias(
            EntityId::from("SRC:DayType:1"),
            EntityId::from("DST:DayType:old"),
        );

        assert_eq!(run.entities_migrated(), 1);
        assert!(run.has_mapping(&EntityId::from("SRC:Line:1")));
        assert_eq!(
            run.mapped(&EntityId::from("SRC:DayType:1")),
            Some(&EntityId::from("DST:DayType:old"))
        );
    }

    #[test]
    fn test_created_day_types_excludes_reused() {
        let mut run = run();
        let created = DayType {
            id: EntityId::from("DST:DayType:new"),
            provider: "DST".to_string(),
            name: None,
            days_of_week: vec![DayOfWeek::Monday],
            day_type_assignments: vec![],
        };
        let reused = DayType {
            id: EntityId::from("DST:DayType:existing"),
            provider: "DST".to_string(),
            name: None,
            days_of_week: vec![DayOfWeek::Sunday],
            day_type_assignments: vec![],
        };

        run.cache_day_type("sig-a".to_string(), created.clone(), true);
        run.cache_day_type("sig-b".to_string(), reused, false);

        let pending = run.created_day_types();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, created.id);
    }
}
