use super::*;

use shared::{domain::PassengerStub, fixtures};

fn stub(email: &str) -> PassengerStub {
    PassengerStub {
        email: email.to_string(),
        ..PassengerStub::blank()
    }
}

#[test]
fn no_departure_means_no_view() {
    assert!(boarding_pass_view(&AppState::default(), &fixtures::share_users()).is_none());
}

#[test]
fn first_two_passengers_are_checked_in_and_contacts_are_matched() {
    let mut state = AppState::default();
    let mut flight = fixtures::departures().remove(0);
    flight.from.day = Some("Mar 5".into());
    state.departure_flight = Some(flight);
    state.passenger_data = vec![
        stub("nicolina.lindholm@sickvfx.com"),
        stub("stranger@example.com"),
        stub("andy.mckenty@sickvfx.com"),
    ];

    let view = boarding_pass_view(&state, &fixtures::share_users()).expect("view");
    assert_eq!(view.gate, "127");
    assert_eq!(view.boarding_time, "10:00");
    assert_eq!(view.seat, "42B");
    assert_eq!(view.flight_number, "BL256");
    assert_eq!(view.from_label(), "Mar 5, 10:30");

    let statuses: Vec<_> = view
        .passengers
        .iter()
        .map(|passenger| passenger.check_in.label().to_string())
        .collect();
    assert_eq!(statuses, vec!["47C", "62A", "Pending"]);
    assert_eq!(view.passengers[0].name.as_deref(), Some("Nicolina Lindholm"));
    assert_eq!(view.passengers[1].name, None);
    assert_eq!(view.passengers[2].name.as_deref(), Some("Andy McKenty"));
}
