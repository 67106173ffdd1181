//! Shared fixtures for migration integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};

use flexline::db::{LocalRepository, Repositories, RepositoryFactory};
use flexline::models::*;
use flexline::services::MigrationService;
use flexline::FullAccess;

pub const SOURCE_PROVIDER: &str = "SRC";
pub const TARGET_PROVIDER: &str = "DST";
pub const TARGET_NETWORK: &str = "DST:Network:1";

/// A local backend seeded with the SRC and DST providers and one network
/// each, plus a migration service with full access.
pub fn setup() -> (Arc<LocalRepository>, Repositories, MigrationService) {
    let (store, repos) = RepositoryFactory::create_local();

    store.add_provider(Provider {
        code: SOURCE_PROVIDER.to_string(),
        name: "Source provider".to_string(),
        codespace: SOURCE_PROVIDER.to_string(),
    });
    store.add_provider(Provider {
        code: TARGET_PROVIDER.to_string(),
        name: "Destination provider".to_string(),
        codespace: TARGET_PROVIDER.to_string(),
    });
    store.add_network(Network {
        id: EntityId::from("SRC:Network:1"),
        provider: SOURCE_PROVIDER.to_string(),
        name: "Source network".to_string(),
        authority_ref: Some("NOG:Authority:1".to_string()),
    });
    store.add_network(Network {
        id: EntityId::from(TARGET_NETWORK),
        provider: TARGET_PROVIDER.to_string(),
        name: "Destination network".to_string(),
        authority_ref: Some("NOG:Authority:2".to_string()),
    });

    let service = MigrationService::new(repos.clone(), Arc::new(FullAccess));
    (store, repos, service)
}

pub fn weekday_day_type(id: &str) -> DayType {
    DayType {
        id: EntityId::from(id),
        provider: SOURCE_PROVIDER.to_string(),
        name: Some("Weekdays".to_string()),
        days_of_week: vec![
            DayOfWeek::Monday,
            DayOfWeek::Tuesday,
            DayOfWeek::Wednesday,
            DayOfWeek::Thursday,
            DayOfWeek::Friday,
        ],
        day_type_assignments: vec![DayTypeAssignment {
            available: true,
            date: None,
            operating_period: Some(OperatingPeriod {
                from_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                to_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            }),
        }],
    }
}

pub fn stop_point(id: &str, order: u32, quay_ref: &str) -> StopPointInJourneyPattern {
    StopPointInJourneyPattern {
        id: EntityId::from(id),
        provider: SOURCE_PROVIDER.to_string(),
        order,
        quay_ref: Some(quay_ref.to_string()),
        flexible_stop_place_ref: None,
        for_boarding: order == 1,
        for_alighting: order != 1,
        destination_display: None,
        booking_arrangement: None,
        notices: vec![],
    }
}

pub fn passing_time(id: &str, order: u32, hour: u32) -> TimetabledPassingTime {
    TimetabledPassingTime {
        id: EntityId::from(id),
        provider: SOURCE_PROVIDER.to_string(),
        order,
        arrival_time: Some(NaiveTime::from_hms_opt(hour, 0, 0).unwrap()),
        arrival_day_offset: 0,
        departure_time: Some(NaiveTime::from_hms_opt(hour, 5, 0).unwrap()),
        departure_day_offset: 0,
        earliest_departure_time: None,
        earliest_departure_day_offset: 0,
        latest_arrival_time: None,
        latest_arrival_day_offset: 0,
    }
}

pub fn service_journey(id: &str, name: &str, day_type_refs: Vec<EntityId>) -> ServiceJourney {
    ServiceJourney {
        id: EntityId::from(id),
        provider: SOURCE_PROVIDER.to_string(),
        name: Some(name.to_string()),
        public_code: Some("1".to_string()),
        operator_ref: Some("NOG:Operator:1".to_string()),
        journey_pattern_ref: EntityId::from("SRC:JourneyPattern:1"),
        day_type_refs,
        booking_arrangement: None,
        notices: vec![],
        passing_times: vec![
            passing_time(&format!("{}-pt1", id), 1, 8),
            passing_time(&format!("{}-pt2", id), 2, 9),
        ],
    }
}

/// The sample scenario line: "Airport Shuttle", one journey pattern with
/// two stop points, one service journey with two passing times.
pub fn airport_shuttle(day_type_refs: Vec<EntityId>) -> Line {
    let journey = service_journey("SRC:ServiceJourney:1", "Morning run", day_type_refs);

    Line::Fixed(FixedLine {
        base: LineBase {
            id: EntityId::from("SRC:Line:1"),
            provider: SOURCE_PROVIDER.to_string(),
            name: "Airport Shuttle".to_string(),
            public_code: Some("AS1".to_string()),
            transport_mode: TransportMode::Bus,
            transport_submode: Some("airportLinkBus".to_string()),
            operator_ref: Some("NOG:Operator:1".to_string()),
            network_ref: EntityId::from("SRC:Network:1"),
            notices: vec![Notice {
                id: EntityId::from("SRC:Notice:1"),
                provider: SOURCE_PROVIDER.to_string(),
                text: "Runs only on weekdays".to_string(),
            }],
            journey_patterns: vec![JourneyPattern {
                id: EntityId::from("SRC:JourneyPattern:1"),
                provider: SOURCE_PROVIDER.to_string(),
                name: Some("Airport outbound".to_string()),
                line_ref: EntityId::from("SRC:Line:1"),
                direction_type: Some(DirectionType::Outbound),
                notices: vec![],
                points_in_sequence: vec![
                    stop_point("SRC:StopPointInJourneyPattern:1", 1, "NSR:Quay:1001"),
                    stop_point("SRC:StopPointInJourneyPattern:2", 2, "NSR:Quay:1002"),
                ],
                service_journeys: vec![journey],
            }],
        },
    })
}

pub fn booking_arrangement(id: &str) -> BookingArrangement {
    BookingArrangement {
        id: EntityId::from(id),
        provider: SOURCE_PROVIDER.to_string(),
        booking_contact: Some(Contact {
            contact_person: Some("Booking office".to_string()),
            phone: Some("+4712345678".to_string()),
            email: Some("booking@example.org".to_string()),
            url: None,
            further_details: None,
        }),
        booking_note: Some("Book at least two hours ahead".to_string()),
        booking_methods: vec![BookingMethod::CallOffice, BookingMethod::Online],
        booking_access: Some(BookingAccess::Public),
        book_when: Some(PurchaseWhen::UntilPreviousDay),
        latest_booking_time: Some(NaiveTime::from_hms_opt(18, 0, 0).unwrap()),
        minimum_booking_period: Some("PT2H".to_string()),
    }
}

/// A flexible line with a booking arrangement and one flexible-area stop.
pub fn flexible_line(id: &str, name: &str) -> Line {
    let mut stop = stop_point(&format!("{}-sp1", id), 1, "unused");
    stop.quay_ref = None;
    stop.flexible_stop_place_ref = Some(EntityId::from("SRC:FlexibleStopPlace:1"));
    stop.booking_arrangement = Some(booking_arrangement(&format!("{}-ba-sp", id)));

    Line::Flexible(FlexibleLine {
        flexible_line_type: FlexibleLineType::FlexibleAreasOnly,
        booking_arrangement: Some(booking_arrangement(&format!("{}-ba-line", id))),
        base: LineBase {
            id: EntityId::from(id),
            provider: SOURCE_PROVIDER.to_string(),
            name: name.to_string(),
            public_code: Some("F1".to_string()),
            transport_mode: TransportMode::Bus,
            transport_submode: Some("demandAndResponseBus".to_string()),
            operator_ref: Some("NOG:Operator:2".to_string()),
            network_ref: EntityId::from("SRC:Network:1"),
            notices: vec![],
            journey_patterns: vec![JourneyPattern {
                id: EntityId::from(format!("{}-jp1", id).as_str()),
                provider: SOURCE_PROVIDER.to_string(),
                name: None,
                line_ref: EntityId::from(id),
                direction_type: None,
                notices: vec![],
                points_in_sequence: vec![stop],
                service_journeys: vec![ServiceJourney {
                    id: EntityId::from(format!("{}-sj1", id).as_str()),
                    provider: SOURCE_PROVIDER.to_string(),
                    name: None,
                    public_code: None,
                    operator_ref: None,
                    journey_pattern_ref: EntityId::from(format!("{}-jp1", id).as_str()),
                    day_type_refs: vec![],
                    booking_arrangement: Some(booking_arrangement(&format!("{}-ba-sj", id))),
                    notices: vec![],
                    passing_times: vec![passing_time(&format!("{}-pt1", id), 1, 10)],
                }],
            }],
        },
    })
}
