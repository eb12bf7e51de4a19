use super::*;

use shared::domain::{PassengerStub, Theme};

#[test]
fn initial_state_uses_fixture_user_and_defaults() {
    let state = AppState::initial(Theme::Dark);
    assert_eq!(state.user.first_name, "Charlie");
    assert_eq!(state.theme, Theme::Dark);
    assert!(!state.menu_open);
    assert!(!state.scrolled);
    assert!(state.departure_flight.is_none());
    assert!(state.passenger_data.is_empty());
    assert_eq!(state.booking_details.passengers, 1);
    assert_eq!(state.booking_details.from, "Sydney");
    assert_eq!(state.booking_details.to, "Anywhere");
}

#[test]
fn set_scrolled_with_same_value_keeps_the_snapshot() {
    let mut store = Store::default();
    let before = store.state();
    assert!(!store.dispatch(Action::SetScrolled(false)));
    assert!(Arc::ptr_eq(&before, &store.state()));
    assert_eq!(store.revision(), 0);

    assert!(store.dispatch(Action::SetScrolled(true)));
    assert!(store.get().scrolled);
    assert!(!Arc::ptr_eq(&before, &store.state()));
    assert_eq!(store.revision(), 1);
}

#[test]
fn set_scrolled_true_twice_keeps_the_second_snapshot() {
    let mut store = Store::default();
    assert!(store.dispatch(Action::SetScrolled(true)));
    let first = store.state();
    assert!(!store.dispatch(Action::SetScrolled(true)));
    assert!(Arc::ptr_eq(&first, &store.state()));
    assert_eq!(store.revision(), 1);
}

#[test]
fn set_passenger_data_recomputes_passenger_count() {
    let mut store = Store::default();
    for len in [0usize, 1, 3, 15] {
        let stubs = (0..len).map(|_| PassengerStub::blank()).collect::<Vec<_>>();
        store.dispatch(Action::SetPassengerData(stubs));
        assert_eq!(store.get().passenger_data.len(), len);
        assert_eq!(usize::from(store.get().booking_details.passengers), len + 1);
    }
}

#[test]
fn set_passenger_data_keeps_the_rest_of_the_details() {
    let mut store = Store::default();
    let mut details = store.get().booking_details.clone();
    details.one_way = true;
    details.to = "Tokyo".into();
    store.dispatch(Action::SetBookingDetails(details));
    store.dispatch(Action::SetPassengerData(vec![PassengerStub::blank()]));
    assert!(store.get().booking_details.one_way);
    assert_eq!(store.get().booking_details.to, "Tokyo");
    assert_eq!(store.get().booking_details.passengers, 2);
}

#[test]
fn toggle_theme_flips_or_sets() {
    let mut store = Store::default();
    store.dispatch(Action::ToggleTheme(None));
    assert_eq!(store.get().theme, Theme::Dark);
    store.dispatch(Action::ToggleTheme(None));
    assert_eq!(store.get().theme, Theme::Light);
    store.dispatch(Action::ToggleTheme(Some(Theme::Dark)));
    assert_eq!(store.get().theme, Theme::Dark);
}

#[test]
fn explicit_theme_is_idempotent() {
    let mut store = Store::default();
    assert_eq!(store.get().theme, Theme::Light);
    store.dispatch(Action::ToggleTheme(Some(Theme::Light)));
    assert_eq!(store.get().theme, Theme::Light);
    store.dispatch(Action::ToggleTheme(Some(Theme::Light)));
    assert_eq!(store.get().theme, Theme::Light);
}

#[test]
fn toggle_theme_without_a_value_flips() {
    let mut store = Store::default();
    assert!(store
        .dispatch_json(r#"{"type":"toggleTheme"}"#)
        .expect("known action"));
    assert_eq!(store.get().theme, Theme::Dark);
    assert!(store
        .dispatch_json(r#"{"type":"toggleTheme"}"#)
        .expect("known action"));
    assert_eq!(store.get().theme, Theme::Light);
}

#[test]
fn other_actions_replace_only_their_field() {
    let state = AppState::default();
    let flight = shared::fixtures::departures().remove(0);
    let next = reduce(&state, Action::SetDepartureFlight(Some(flight.clone()))).expect("changed");
    assert_eq!(next.departure_flight, Some(flight));
    assert_eq!(next.booking_details, state.booking_details);
    assert_eq!(next.menu_open, state.menu_open);

    let next = reduce(&next, Action::SetMenuOpen(true)).expect("changed");
    assert!(next.menu_open);
    assert!(next.departure_flight.is_some());
}

#[test]
fn total_price_counts_return_only_for_round_trips() {
    let mut state = AppState::default();
    state.departure_flight = Some(shared::fixtures::departures().remove(0));
    state.return_flight = Some(shared::fixtures::returns().remove(0));
    state.booking_details.passengers = 2;
    assert_eq!(state.total_price(), (477 + 564) * 2);

    state.booking_details.one_way = true;
    assert_eq!(state.total_price(), 477 * 2);

    state.departure_flight = None;
    assert_eq!(state.total_price(), 0);
}

#[test]
fn json_actions_round_through_the_closed_vocabulary() {
    let mut store = Store::default();
    assert!(store
        .dispatch_json(r#"{"type":"setMenuOpen","value":true}"#)
        .expect("known action"));
    assert!(store.get().menu_open);
    assert!(store
        .dispatch_json(r#"{"type":"toggleTheme","value":null}"#)
        .expect("known action"));
    assert_eq!(store.get().theme, Theme::Dark);
}

#[test]
fn unknown_action_kind_is_rejected_and_state_untouched() {
    let mut store = Store::default();
    let before = store.state();
    let err = store
        .dispatch_json(r#"{"type":"setSeat","value":"42B"}"#)
        .expect_err("unknown kind");
    assert!(matches!(err, CoreError::UnknownAction(ref kind) if kind == "setSeat"));
    assert!(Arc::ptr_eq(&before, &store.state()));

    let err = store.dispatch_json("not json").expect_err("malformed");
    assert!(matches!(err, CoreError::MalformedAction(_)));

    let err = store
        .dispatch_json(r#"{"type":"setScrolled","value":"yes"}"#)
        .expect_err("bad payload");
    assert!(matches!(err, CoreError::MalformedAction(_)));
}

#[test]
fn action_kind_matches_its_wire_tag() {
    let action = Action::SetScrolled(true);
    let encoded = serde_json::to_value(&action).expect("encode");
    assert_eq!(encoded["type"], action.kind());
    assert_eq!(encoded["value"], true);
}
