//! Tenant ("provider") and network reference data.
//!
//! Providers and networks are read-only inputs to line migration: they are
//! looked up as targets but never mutated by it.

use serde::{Deserialize, Serialize};

use super::identifier::EntityId;

/// A tenant owning its own set of lines, networks and calendars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    /// Unique provider code, e.g. `"RUT"`.
    pub code: String,
    pub name: String,
    /// Namespace prefix used to construct public identifiers.
    pub codespace: String,
}

/// A route network owned by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    pub id: EntityId,
    /// Owning provider code.
    pub provider: String,
    pub name: String,
    /// External authority reference, e.g. `"NOG:Authority:1"`.
    pub authority_ref: Option<String>,
}
