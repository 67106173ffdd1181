//! Service layer for business logic and orchestration.
//!
//! Services sit between the repository layer and the request-handling
//! surface; they orchestrate repository calls and implement the domain
//! logic.

pub mod migration;

pub use migration::{
    ConflictStrategy, MigrationError, MigrationInput, MigrationOptions, MigrationResult,
    MigrationService, MigrationSummary, MigrationWarning, WarningType,
};
