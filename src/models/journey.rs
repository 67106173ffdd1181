//! Journey patterns, service journeys and their ordered children.
//!
//! Ordering is semantic throughout this module: the position of a stop point
//! encodes the stop sequence and the position of a passing time encodes the
//! timetable row, so any transformation must preserve child order exactly.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::booking::BookingArrangement;
use super::identifier::EntityId;
use super::line::Notice;

/// Direction of travel for a journey pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DirectionType {
    Inbound,
    Outbound,
    Clockwise,
    Anticlockwise,
}

/// Head sign text shown for a stop point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationDisplay {
    pub id: EntityId,
    pub provider: String,
    pub front_text: String,
}

/// One stop in a journey pattern's ordered sequence.
///
/// References exactly one of a quay in the external stop registry or a
/// flexible stop place; the domain validation layer enforces the
/// exactly-one-of rule, migration copies the pair unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopPointInJourneyPattern {
    pub id: EntityId,
    pub provider: String,
    /// 1-based position in the pattern.
    pub order: u32,
    /// External stop registry reference, e.g. `"NSR:Quay:1234"`.
    pub quay_ref: Option<String>,
    pub flexible_stop_place_ref: Option<EntityId>,
    pub for_boarding: bool,
    pub for_alighting: bool,
    pub destination_display: Option<DestinationDisplay>,
    pub booking_arrangement: Option<BookingArrangement>,
    pub notices: Vec<Notice>,
}

/// One timetable row of a service journey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetabledPassingTime {
    pub id: EntityId,
    pub provider: String,
    /// 1-based position, matching the pattern's stop sequence.
    pub order: u32,
    pub arrival_time: Option<NaiveTime>,
    pub arrival_day_offset: i32,
    pub departure_time: Option<NaiveTime>,
    pub departure_day_offset: i32,
    /// Flexible-service time window bounds.
    pub earliest_departure_time: Option<NaiveTime>,
    pub earliest_departure_day_offset: i32,
    pub latest_arrival_time: Option<NaiveTime>,
    pub latest_arrival_day_offset: i32,
}

/// One scheduled run of a journey pattern.
///
/// Day types are referenced, not owned: several service journeys within a
/// tenant may point at the same `DayType` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceJourney {
    pub id: EntityId,
    pub provider: String,
    pub name: Option<String>,
    pub public_code: Option<String>,
    pub operator_ref: Option<String>,
    pub journey_pattern_ref: EntityId,
    pub day_type_refs: Vec<EntityId>,
    pub booking_arrangement: Option<BookingArrangement>,
    pub notices: Vec<Notice>,
    pub passing_times: Vec<TimetabledPassingTime>,
}

/// An ordered sequence of stop points defining a route shape for a line,
/// together with the service journeys operating over it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneyPattern {
    pub id: EntityId,
    pub provider: String,
    pub name: Option<String>,
    pub line_ref: EntityId,
    pub direction_type: Option<DirectionType>,
    pub notices: Vec<Notice>,
    pub points_in_sequence: Vec<StopPointInJourneyPattern>,
    pub service_journeys: Vec<ServiceJourney>,
}
