use super::*;

use std::time::Duration;

use chrono::NaiveDate;

use crate::transition::{NoReflow, Phase};

fn booked_store(one_way: bool, passengers: u8) -> Store {
    let mut state = AppState::default();
    state.booking_details = BookingDetails {
        from: "Sydney".into(),
        to: "San Francisco".into(),
        one_way,
        departure_date: NaiveDate::from_ymd_opt(2026, 3, 5),
        return_date: (!one_way).then(|| NaiveDate::from_ymd_opt(2026, 3, 9)).flatten(),
        passengers,
    };
    Store::new(state)
}

fn ids(flights: &[Flight]) -> Vec<&str> {
    flights.iter().map(|flight| flight.id.as_str()).collect()
}

#[test]
fn departures_are_labelled_with_booking_cities_and_dates() {
    let store = booked_store(false, 1);
    let departures = listed_flights(&store.get().booking_details, FlightLeg::Departure);
    assert_eq!(departures.len(), 5);
    assert_eq!(departures[0].from.airport, "SYD");
    assert_eq!(departures[0].to.airport, "SFO");
    assert_eq!(departures[0].from.day.as_deref(), Some("Mar 5"));
    assert_eq!(departures[0].to.day.as_deref(), Some("Mar 5"));
}

#[test]
fn returns_swap_cities_and_arrive_two_days_later() {
    let store = booked_store(false, 1);
    let returns = listed_flights(&store.get().booking_details, FlightLeg::Return);
    assert_eq!(returns.len(), 4);
    assert_eq!(returns[0].from.city, "San Francisco");
    assert_eq!(returns[0].to.city, "Sydney");
    assert_eq!(returns[0].from.day.as_deref(), Some("Mar 9"));
    assert_eq!(returns[0].to.day.as_deref(), Some("Mar 11"));
}

#[test]
fn selecting_filters_and_selecting_again_clears() {
    let mut store = booked_store(false, 1);
    let f2 = listed_flights(&store.get().booking_details, FlightLeg::Departure).remove(1);

    assert!(visible_flights(store.get(), FlightLeg::Return).is_empty());
    select_flight(&mut store, FlightLeg::Departure, &f2);
    assert_eq!(ids(&visible_flights(store.get(), FlightLeg::Departure)), vec!["f2"]);
    assert_eq!(visible_flights(store.get(), FlightLeg::Return).len(), 4);
    assert!(!shows_departure_header(store.get()));
    assert!(shows_return_header(store.get()));

    select_flight(&mut store, FlightLeg::Departure, &f2);
    assert!(store.get().departure_flight.is_none());
    assert_eq!(visible_flights(store.get(), FlightLeg::Departure).len(), 5);
}

#[test]
fn one_way_never_lists_returns() {
    let mut store = booked_store(true, 1);
    select_flight_by_id(&mut store, FlightLeg::Departure, &FlightId::new("f1")).expect("listed");
    assert!(!shows_returns(store.get()));
    assert!(!shows_return_header(store.get()));
    assert!(can_continue(store.get()));
}

#[test]
fn continue_needs_return_on_round_trip_and_routes_by_passenger_count() {
    let mut store = booked_store(false, 3);
    select_flight_by_id(&mut store, FlightLeg::Departure, &FlightId::new("f1")).expect("listed");
    assert!(!can_continue(store.get()));
    select_flight_by_id(&mut store, FlightLeg::Return, &FlightId::new("r2")).expect("listed");
    assert!(can_continue(store.get()));

    let view = flights_view(store.get());
    assert_eq!(view.total_price, (477 + 670) * 3);
    assert_eq!(view.total_label, "Total price: $3,440");
    assert_eq!(view.next_route, "/booking/passengers");

    let single = booked_store(false, 1);
    assert_eq!(next_route(&single.get().booking_details), "/booking/payment");
}

#[test]
fn unknown_flight_id_is_not_selectable() {
    let mut store = booked_store(false, 1);
    assert!(select_flight_by_id(&mut store, FlightLeg::Departure, &FlightId::new("r1")).is_none());
}

#[test]
fn list_items_exit_when_the_selection_narrows_the_list() {
    let t0 = Instant::now();
    let mut store = booked_store(false, 1);
    let mut screen = FlightsScreen::new(&Timings::default());
    screen.sync(store.get(), t0, &mut NoReflow);
    let frame = screen.frame(t0);
    assert_eq!(frame.departures.len(), 5);
    assert!(frame.departure_header.is_some());
    assert!(frame.return_header.is_none());

    screen.poll(t0 + Duration::from_millis(400));
    select_flight_by_id(&mut store, FlightLeg::Departure, &FlightId::new("f3")).expect("listed");
    let now = t0 + Duration::from_millis(500);
    screen.sync(store.get(), now, &mut NoReflow);
    let frame = screen.frame(now);
    let exiting = frame
        .departures
        .iter()
        .filter(|item| item.context.phase == Phase::Exiting)
        .count();
    assert_eq!(exiting, 4);
    assert_eq!(frame.returns.len(), 4);
    assert_eq!(frame.departure_header.map(|h| h.context.phase), Some(Phase::Exiting));
    assert_eq!(frame.return_header.map(|h| h.context.phase), Some(Phase::Entering));

    screen.poll(now + Duration::from_millis(400));
    assert_eq!(screen.frame(now + Duration::from_millis(400)).departures.len(), 1);
}
