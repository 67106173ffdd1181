//! flexline - multi-tenant public transport line store.
//!
//! Manages line definitions (fixed and flexible/on-demand) for independent
//! providers, each identified by a unique codespace. The core subsystem is
//! the line migration engine, which copies a complete line aggregate from
//! one provider to another with fresh identifiers, consistent internal
//! references, deduplicated shared day types and configurable conflict
//! handling.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Request-handling layer (out of scope)              │
//! └───────────────────┬─────────────────────────────────┘
//!                     │ MigrationInput / MigrationResult
//! ┌───────────────────▼─────────────────────────────────┐
//! │  services::migration - MigrationService             │
//! │  (cloner, idgen, mapper, per-run context)           │
//! └───────────────────┬─────────────────────────────────┘
//!                     │ repository traits
//! ┌───────────────────▼─────────────────────────────────┐
//! │  db - Repositories bundle                           │
//! │  (LocalRepository in-memory backend)                │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod db;
pub mod models;
pub mod services;

pub use auth::{FullAccess, StaticUserContext, UserContext};
pub use db::{Repositories, RepositoryError, RepositoryFactory, RepositoryType};
pub use services::{
    ConflictStrategy, MigrationError, MigrationInput, MigrationOptions, MigrationResult,
    MigrationService,
};
