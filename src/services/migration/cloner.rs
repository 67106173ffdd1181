//! Entity cloning: a depth-first, order-preserving walk of the line
//! aggregate producing new instances owned by the destination tenant.
//!
//! Every clone mints a fresh identifier in the destination codespace and
//! registers the old-id to new-id pair in the run context. Nothing here
//! persists anything; the migration service decides whether the cloned
//! graph is saved or discarded.

use crate::db::{DayTypeRepository, Repositories};
use crate::models::{
    BookingArrangement, DayType, DestinationDisplay, EntityId, EntityType, FixedLine,
    FlexibleLine, JourneyPattern, Line, LineBase, Network, Notice, ServiceJourney,
    StopPointInJourneyPattern, TimetabledPassingTime,
};

use super::idgen;
use super::mapper;
use super::run::MigrationRun;
use super::MigrationError;

/// Clone a line of either variant into the destination tenant, attached to
/// `target_network`, with a conflict-resolved name. Recursively clones the
/// whole aggregate.
pub async fn clone_line(
    repos: &Repositories,
    run: &mut MigrationRun,
    source: &Line,
    target_network: &Network,
) -> Result<Line, MigrationError> {
    let target = run.target_provider().clone();
    let new_id = idgen::generate_id(EntityType::Line, &target);
    log::debug!("cloning line {} as {}", source.id(), new_id);
    run.record_mapping(source.id().clone(), new_id.clone());

    let name = idgen::resolve_name(
        repos,
        EntityType::Line,
        source.name(),
        &target,
        run.options().conflict_resolution,
    )
    .await?;

    let source_base = source.base();
    let notices = source_base
        .notices
        .iter()
        .map(|n| clone_notice(run, n))
        .collect();

    let mut journey_patterns = Vec::with_capacity(source_base.journey_patterns.len());
    for pattern in &source_base.journey_patterns {
        journey_patterns.push(clone_journey_pattern(repos, run, pattern, &new_id).await?);
    }

    let base = LineBase {
        id: new_id,
        provider: target.code.clone(),
        name,
        public_code: source_base.public_code.clone(),
        transport_mode: source_base.transport_mode,
        transport_submode: source_base.transport_submode.clone(),
        operator_ref: source_base.operator_ref.clone(),
        network_ref: target_network.id.clone(),
        notices,
        journey_patterns,
    };

    Ok(match source {
        Line::Fixed(_) => Line::Fixed(FixedLine { base }),
        Line::Flexible(flexible) => Line::Flexible(FlexibleLine {
            base,
            flexible_line_type: flexible.flexible_line_type,
            booking_arrangement: flexible
                .booking_arrangement
                .as_ref()
                .map(|b| clone_booking_arrangement(run, b)),
        }),
    })
}

/// Clone a journey pattern and everything it owns, attached to the cloned
/// line. Stop point and service journey order is preserved.
pub async fn clone_journey_pattern(
    repos: &Repositories,
    run: &mut MigrationRun,
    source: &JourneyPattern,
    target_line_id: &EntityId,
) -> Result<JourneyPattern, MigrationError> {
    let target = run.target_provider().clone();
    let new_id = idgen::generate_id(EntityType::JourneyPattern, &target);
    run.record_mapping(source.id.clone(), new_id.clone());

    let name = match &source.name {
        Some(name) => Some(
            idgen::resolve_name(
                repos,
                EntityType::JourneyPattern,
                name,
                &target,
                run.options().conflict_resolution,
            )
            .await?,
        ),
        None => None,
    };

    let notices = source.notices.iter().map(|n| clone_notice(run, n)).collect();

    let points_in_sequence = source
        .points_in_sequence
        .iter()
        .map(|sp| clone_stop_point(run, sp))
        .collect();

    let mut service_journeys = Vec::with_capacity(source.service_journeys.len());
    for journey in &source.service_journeys {
        service_journeys.push(clone_service_journey(repos, run, journey, &new_id).await?);
    }

    Ok(JourneyPattern {
        id: new_id,
        provider: target.code,
        name,
        line_ref: target_line_id.clone(),
        direction_type: source.direction_type,
        notices,
        points_in_sequence,
        service_journeys,
    })
}

/// Clone a service journey, resolving its day type references through the
/// deduplication logic. With `include_day_types` disabled the clone carries
/// no day type references at all.
pub async fn clone_service_journey(
    repos: &Repositories,
    run: &mut MigrationRun,
    source: &ServiceJourney,
    target_pattern_id: &EntityId,
) -> Result<ServiceJourney, MigrationError> {
    let target = run.target_provider().clone();
    let new_id = idgen::generate_id(EntityType::ServiceJourney, &target);
    run.record_mapping(source.id.clone(), new_id.clone());

    let name = match &source.name {
        Some(name) => Some(
            idgen::resolve_name(
                repos,
                EntityType::ServiceJourney,
                name,
                &target,
                run.options().conflict_resolution,
            )
            .await?,
        ),
        None => None,
    };

    let mut day_type_refs = Vec::new();
    if run.options().include_day_types {
        for day_type_ref in &source.day_type_refs {
            let source_day_type = repos.day_types.get_one(day_type_ref).await?;
            let mapped = mapper::get_mapped_day_type(repos, run, &source_day_type).await?;
            day_type_refs.push(mapped.id);
        }
    }

    let notices = source.notices.iter().map(|n| clone_notice(run, n)).collect();

    let passing_times = source
        .passing_times
        .iter()
        .map(|pt| clone_passing_time(run, pt))
        .collect();

    Ok(ServiceJourney {
        id: new_id,
        provider: target.code,
        name,
        public_code: source.public_code.clone(),
        operator_ref: source.operator_ref.clone(),
        journey_pattern_ref: target_pattern_id.clone(),
        day_type_refs,
        booking_arrangement: source
            .booking_arrangement
            .as_ref()
            .map(|b| clone_booking_arrangement(run, b)),
        notices,
        passing_times,
    })
}

/// Clone a stop point, preserving its position and boarding flags. Quay and
/// flexible stop place references are external and copied unchanged.
pub fn clone_stop_point(
    run: &mut MigrationRun,
    source: &StopPointInJourneyPattern,
) -> StopPointInJourneyPattern {
    let target = run.target_provider().clone();
    let new_id = idgen::generate_id(EntityType::StopPointInJourneyPattern, &target);
    run.record_mapping(source.id.clone(), new_id.clone());

    StopPointInJourneyPattern {
        id: new_id,
        provider: target.code,
        order: source.order,
        quay_ref: source.quay_ref.clone(),
        flexible_stop_place_ref: source.flexible_stop_place_ref.clone(),
        for_boarding: source.for_boarding,
        for_alighting: source.for_alighting,
        destination_display: source
            .destination_display
            .as_ref()
            .map(|d| clone_destination_display(run, d)),
        booking_arrangement: source
            .booking_arrangement
            .as_ref()
            .map(|b| clone_booking_arrangement(run, b)),
        notices: source.notices.iter().map(|n| clone_notice(run, n)).collect(),
    }
}

/// Clone a passing time row, preserving order, times and day offsets.
pub fn clone_passing_time(
    run: &mut MigrationRun,
    source: &TimetabledPassingTime,
) -> TimetabledPassingTime {
    let target = run.target_provider().clone();
    let new_id = idgen::generate_id(EntityType::TimetabledPassingTime, &target);
    run.record_mapping(source.id.clone(), new_id.clone());

    TimetabledPassingTime {
        id: new_id,
        provider: target.code,
        order: source.order,
        arrival_time: source.arrival_time,
        arrival_day_offset: source.arrival_day_offset,
        departure_time: source.departure_time,
        departure_day_offset: source.departure_day_offset,
        earliest_departure_time: source.earliest_departure_time,
        earliest_departure_day_offset: source.earliest_departure_day_offset,
        latest_arrival_time: source.latest_arrival_time,
        latest_arrival_day_offset: source.latest_arrival_day_offset,
    }
}

/// Clone a notice by value. Notices are never shared across tenants, even
/// when a byte-identical one exists in the destination.
pub fn clone_notice(run: &mut MigrationRun, source: &Notice) -> Notice {
    let target = run.target_provider().clone();
    let new_id = idgen::generate_id(EntityType::Notice, &target);
    run.record_mapping(source.id.clone(), new_id.clone());

    Notice {
        id: new_id,
        provider: target.code,
        text: source.text.clone(),
    }
}

/// Clone a booking arrangement by value, preserving every policy field.
pub fn clone_booking_arrangement(
    run: &mut MigrationRun,
    source: &BookingArrangement,
) -> BookingArrangement {
    let target = run.target_provider().clone();
    let new_id = idgen::generate_id(EntityType::BookingArrangement, &target);
    run.record_mapping(source.id.clone(), new_id.clone());

    BookingArrangement {
        id: new_id,
        provider: target.code,
        booking_contact: source.booking_contact.clone(),
        booking_note: source.booking_note.clone(),
        booking_methods: source.booking_methods.clone(),
        booking_access: source.booking_access,
        book_when: source.book_when,
        latest_booking_time: source.latest_booking_time,
        minimum_booking_period: source.minimum_booking_period.clone(),
    }
}

/// Clone a destination display by value.
pub fn clone_destination_display(
    run: &mut MigrationRun,
    source: &DestinationDisplay,
) -> DestinationDisplay {
    let target = run.target_provider().clone();
    let new_id = idgen::generate_id(EntityType::DestinationDisplay, &target);
    run.record_mapping(source.id.clone(), new_id.clone());

    DestinationDisplay {
        id: new_id,
        provider: target.code,
        front_text: source.front_text.clone(),
    }
}

/// Clone a day type into the destination tenant. Called by the reference
/// mapper only after both dedup paths came up empty.
pub fn clone_day_type(run: &mut MigrationRun, source: &DayType) -> DayType {
    let target = run.target_provider().clone();
    let new_id = idgen::generate_id(EntityType::DayType, &target);
    run.record_mapping(source.id.clone(), new_id.clone());

    DayType {
        id: new_id,
        provider: target.code,
        name: source.name.clone(),
        days_of_week: source.days_of_week.clone(),
        day_type_assignments: source.day_type_assignments.clone(),
    }
}
