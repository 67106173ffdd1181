//! Reusable calendar definitions ("day types").
//!
//! Day types are shared by reference across service journeys within a
//! tenant. Migration deduplicates them by structural signature rather than
//! by identity: two day types with the same name, days of week and
//! assignments are considered interchangeable.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::identifier::EntityId;

/// Day of week in a day type's weekly pattern.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// A contiguous date range during which a day type applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingPeriod {
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}

/// Assigns a single date or an operating period to a day type, with an
/// availability flag (`available = false` expresses an exclusion).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayTypeAssignment {
    pub available: bool,
    pub date: Option<NaiveDate>,
    pub operating_period: Option<OperatingPeriod>,
}

/// A reusable calendar rule determining when a service journey operates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayType {
    pub id: EntityId,
    /// Owning provider code.
    pub provider: String,
    pub name: Option<String>,
    pub days_of_week: Vec<DayOfWeek>,
    pub day_type_assignments: Vec<DayTypeAssignment>,
}

/// Canonical content used for structural comparison. Days of week are
/// sorted so that ordering differences in the source do not defeat
/// deduplication; the assignment list is compared in order.
#[derive(Serialize)]
struct SignatureContent<'a> {
    name: &'a Option<String>,
    days_of_week: Vec<DayOfWeek>,
    day_type_assignments: &'a [DayTypeAssignment],
}

impl DayType {
    /// Structural signature of this day type: SHA-256 over the canonical
    /// JSON of (name, sorted days of week, assignment list).
    ///
    /// Two day types with equal signatures are treated as interchangeable
    /// by migration, regardless of identifier or owning tenant.
    pub fn structural_signature(&self) -> String {
        let mut days = self.days_of_week.clone();
        days.sort();
        let content = SignatureContent {
            name: &self.name,
            days_of_week: days,
            day_type_assignments: &self.day_type_assignments,
        };
        // Serialization of these plain structs cannot fail.
        let json = serde_json::to_string(&content).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(json.as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weekday_day_type(id: &str, name: &str) -> DayType {
        DayType {
            id: EntityId::from(id),
            provider: "tst".to_string(),
            name: Some(name.to_string()),
            days_of_week: vec![DayOfWeek::Monday, DayOfWeek::Friday],
            day_type_assignments: vec![DayTypeAssignment {
                available: true,
                date: None,
                operating_period: Some(OperatingPeriod {
                    from_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                    to_date: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
                }),
            }],
        }
    }

    #[test]
    fn test_signature_ignores_identity_and_tenant() {
        let a = weekday_day_type("A:DayType:1", "Weekdays");
        let mut b = weekday_day_type("B:DayType:99", "Weekdays");
        b.provider = "other".to_string();
        assert_eq!(a.structural_signature(), b.structural_signature());
    }

    #[test]
    fn test_signature_ignores_day_order() {
        let a = weekday_day_type("A:DayType:1", "Weekdays");
        let mut b = weekday_day_type("A:DayType:2", "Weekdays");
        b.days_of_week = vec![DayOfWeek::Friday, DayOfWeek::Monday];
        assert_eq!(a.structural_signature(), b.structural_signature());
    }

    #[test]
    fn test_signature_differs_on_name() {
        let a = weekday_day_type("A:DayType:1", "Weekdays");
        let b = weekday_day_type("A:DayType:1", "Weekends");
        assert_ne!(a.structural_signature(), b.structural_signature());
    }

    #[test]
    fn test_signature_differs_on_availability() {
        let a = weekday_day_type("A:DayType:1", "Weekdays");
        let mut b = weekday_day_type("A:DayType:1", "Weekdays");
        b.day_type_assignments[0].available = false;
        assert_ne!(a.structural_signature(), b.structural_signature());
    }
}
