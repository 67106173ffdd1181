//! Booking arrangements for flexible (on-demand) services.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::identifier::EntityId;

/// How a journey or stop may be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BookingMethod {
    CallDriver,
    CallOffice,
    Online,
    PhoneAtStop,
    Text,
}

/// Who may book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BookingAccess {
    Public,
    Authorised,
    Staff,
}

/// When a booking must be placed relative to travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PurchaseWhen {
    TimeOfTravelOnly,
    DayOfTravelOnly,
    UntilPreviousDay,
    AdvanceAndDayOfTravel,
}

/// Contact details for placing a booking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub url: Option<String>,
    pub further_details: Option<String>,
}

/// Booking policy attached to a flexible line, a service journey or a single
/// stop point. Owned by exactly one tenant and always cloned by value during
/// migration, never shared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingArrangement {
    pub id: EntityId,
    /// Owning provider code.
    pub provider: String,
    pub booking_contact: Option<Contact>,
    pub booking_note: Option<String>,
    pub booking_methods: Vec<BookingMethod>,
    pub booking_access: Option<BookingAccess>,
    pub book_when: Option<PurchaseWhen>,
    pub latest_booking_time: Option<NaiveTime>,
    /// ISO 8601 duration, e.g. `"PT2H"`.
    pub minimum_booking_period: Option<String>,
}
