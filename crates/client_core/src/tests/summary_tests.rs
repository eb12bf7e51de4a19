use super::*;

use std::time::Duration;

use shared::fixtures;

use crate::transition::NoReflow;

fn state_with_flights(one_way: bool) -> AppState {
    let mut state = AppState::default();
    let mut departure = fixtures::departures().remove(1);
    departure.from.day = Some("Mar 5".into());
    departure.to.day = Some("Mar 5".into());
    state.departure_flight = Some(departure);
    state.return_flight = (!one_way).then(|| fixtures::returns().remove(1));
    state.booking_details.one_way = one_way;
    state.booking_details.passengers = 2;
    state
}

#[test]
fn hidden_without_a_departure() {
    assert!(summary_view(&AppState::default()).is_none());
}

#[test]
fn lists_selected_flights_with_per_booking_prices() {
    let view = summary_view(&state_with_flights(false)).expect("summary");
    assert_eq!(view.items.len(), 2);
    assert_eq!(view.items[0].price, "$1,150");
    assert_eq!(view.items[0].schedule, "Mar 5 13:40—Mar 5 12:30");
    assert_eq!(view.items[0].edit_route, "/booking/flights");
    assert_eq!(view.total, "$2,490");
    assert_eq!(view.description, "2 passengers, roundtrip");
    assert_eq!(view.from_airport, "SYD");
}

#[test]
fn one_way_lists_only_the_departure() {
    let view = summary_view(&state_with_flights(true)).expect("summary");
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.description, "2 passengers, one way");
    assert_eq!(view.total, "$1,150");
}

#[test]
fn expanded_height_follows_measurement_and_visibility() {
    let t0 = Instant::now();
    let mut card = SummaryCard::new(&Timings::default());
    assert_eq!(card.frame(t0).content, None);

    card.toggle(t0, &mut NoReflow);
    assert!(card.is_expanded());
    assert_eq!(card.measurement(), Measurement::Unmeasured);
    assert_eq!(card.frame(t0).content_height, 0.0);

    card.measure(120.0);
    assert_eq!(card.measurement(), Measurement::Measured { height: 120.0 });
    assert_eq!(card.frame(t0).measurement.offset(), None);
    assert!(card.position(48.0));
    assert_eq!(
        card.measurement(),
        Measurement::Positioned {
            height: 120.0,
            offset: 48.0
        }
    );
    let later = t0 + Duration::from_millis(400);
    card.poll(later);
    let frame = card.frame(later);
    assert!(frame.expanded);
    assert_eq!(frame.content_height, 120.0);

    card.toggle(later, &mut NoReflow);
    card.poll(later + Duration::from_millis(400));
    assert!(card.frame(later + Duration::from_millis(400)).content.is_none());
}

#[test]
fn positioning_waits_for_a_measurement() {
    let t0 = Instant::now();
    let mut card = SummaryCard::new(&Timings::default());
    assert!(!card.position(48.0));
    assert_eq!(card.measurement(), Measurement::Unmeasured);

    card.measure(80.0);
    card.position(48.0);
    card.measure(96.0);
    assert_eq!(card.measurement(), Measurement::Measured { height: 96.0 });

    card.position(12.0);
    card.toggle(t0, &mut NoReflow);
    card.toggle(t0, &mut NoReflow);
    assert_eq!(card.measurement(), Measurement::Unmeasured);
}
