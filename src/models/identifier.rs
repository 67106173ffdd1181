//! Tenant-scoped public identifiers.
//!
//! Every persisted entity carries an identifier of the form
//! `<codespace>:<EntityType>:<suffix>`, where the codespace is the owning
//! provider's namespace prefix.

use serde::{Deserialize, Serialize};

/// Entity type tag used as the middle segment of public identifiers and for
/// type-specific name-conflict lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    Line,
    JourneyPattern,
    ServiceJourney,
    StopPointInJourneyPattern,
    TimetabledPassingTime,
    DayType,
    Notice,
    BookingArrangement,
    DestinationDisplay,
    Network,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Line => "Line",
            EntityType::JourneyPattern => "JourneyPattern",
            EntityType::ServiceJourney => "ServiceJourney",
            EntityType::StopPointInJourneyPattern => "StopPointInJourneyPattern",
            EntityType::TimetabledPassingTime => "TimetabledPassingTime",
            EntityType::DayType => "DayType",
            EntityType::Notice => "Notice",
            EntityType::BookingArrangement => "BookingArrangement",
            EntityType::DestinationDisplay => "DestinationDisplay",
            EntityType::Network => "Network",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Public identifier of a tenant-scoped entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(String);

impl EntityId {
    /// Build an identifier from its three segments.
    pub fn build(codespace: &str, entity_type: EntityType, suffix: &str) -> Self {
        EntityId(format!("{}:{}:{}", codespace, entity_type.as_str(), suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The codespace prefix, if the identifier has the expected shape.
    pub fn codespace(&self) -> Option<&str> {
        let mut parts = self.0.split(':');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(cs), Some(_), Some(_), None) if !cs.is_empty() => Some(cs),
            _ => None,
        }
    }

    /// Check that a reference string has the `codespace:Type:suffix` shape
    /// with all three segments non-empty and limited to `[A-Za-z0-9_-]`.
    pub fn is_well_formed(value: &str) -> bool {
        let segments: Vec<&str> = value.split(':').collect();
        segments.len() == 3
            && segments.iter().all(|s| {
                !s.is_empty()
                    && s.chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            })
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(v: &str) -> Self {
        EntityId(v.to_string())
    }
}

impl From<String> for EntityId {
    fn from(v: String) -> Self {
        EntityId(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_and_segments() {
        let id = EntityId::build("TST", EntityType::Line, "abc-123");
        assert_eq!(id.as_str(), "TST:Line:abc-123");
        assert_eq!(id.codespace(), Some("TST"));
    }

    #[test]
    fn test_well_formed_references() {
        assert!(EntityId::is_well_formed("NSR:Quay:1234"));
        assert!(EntityId::is_well_formed("TST:Operator:some_op-1"));
        assert!(!EntityId::is_well_formed(""));
        assert!(!EntityId::is_well_formed("NSR:Quay"));
        assert!(!EntityId::is_well_formed("NSR::1234"));
        assert!(!EntityId::is_well_formed("NSR:Quay:12 34"));
        assert!(!EntityId::is_well_formed("NSR:Quay:1234:extra"));
    }
}
