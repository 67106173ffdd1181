//! Line definitions: fixed-route and flexible (on-demand) variants.

use serde::{Deserialize, Serialize};

use super::booking::BookingArrangement;
use super::identifier::EntityId;
use super::journey::JourneyPattern;

/// Transport mode of a line. The submode is carried alongside as a free-form
/// value; mode/submode compatibility is enforced by the domain validation
/// layer, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransportMode {
    Bus,
    Coach,
    Tram,
    Rail,
    Metro,
    Water,
    Air,
    Taxi,
    Cableway,
    Funicular,
}

/// Kind of flexible service a flexible line provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FlexibleLineType {
    CorridorService,
    MainRouteWithFlexibleEnds,
    FixedStopAreaWide,
    FlexibleAreasOnly,
    HailAndRideSections,
}

/// Free-text notice attached to a line, pattern, journey or stop point.
/// Notices are owned by their tenant and cloned by value during migration,
/// never shared across tenants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub id: EntityId,
    pub provider: String,
    pub text: String,
}

/// Fields common to both line variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineBase {
    pub id: EntityId,
    /// Owning provider code.
    pub provider: String,
    pub name: String,
    pub public_code: Option<String>,
    pub transport_mode: TransportMode,
    pub transport_submode: Option<String>,
    /// External operator reference, e.g. `"NOG:Operator:1"`.
    pub operator_ref: Option<String>,
    pub network_ref: EntityId,
    pub notices: Vec<Notice>,
    pub journey_patterns: Vec<JourneyPattern>,
}

/// A line following a fixed stop sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedLine {
    pub base: LineBase,
}

/// An on-demand line serving flexible areas or hail-and-ride sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlexibleLine {
    pub base: LineBase,
    pub flexible_line_type: FlexibleLineType,
    pub booking_arrangement: Option<BookingArrangement>,
}

/// A public-transport service definition, in one of its two concrete
/// variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Line {
    Fixed(FixedLine),
    Flexible(FlexibleLine),
}

impl Line {
    pub fn base(&self) -> &LineBase {
        match self {
            Line::Fixed(l) => &l.base,
            Line::Flexible(l) => &l.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut LineBase {
        match self {
            Line::Fixed(l) => &mut l.base,
            Line::Flexible(l) => &mut l.base,
        }
    }

    pub fn id(&self) -> &EntityId {
        &self.base().id
    }

    pub fn name(&self) -> &str {
        &self.base().name
    }

    /// Owning provider code.
    pub fn provider(&self) -> &str {
        &self.base().provider
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, Line::Fixed(_))
    }
}
