use super::*;

use std::{sync::Mutex, time::Duration};

use chrono::NaiveDate;
use shared::domain::BookingField;

use crate::{
    clock::ManualClock,
    screens::payment::{PaymentStatus, SimulatedPayment},
    transition::Phase,
};

fn app() -> (BookingApp<ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    (BookingApp::new(Settings::default(), clock.clone()), clock)
}

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, month, day).expect("valid date")
}

fn settle(app: &mut BookingApp<ManualClock>, clock: &ManualClock) -> Vec<PhaseChange> {
    let mut changes = app.tick();
    while !app.is_settled() {
        clock.advance_ms(100);
        changes.extend(app.tick());
    }
    changes
}

#[test]
fn reflow_host_sees_every_entry() {
    let seen = Arc::new(Mutex::new(Vec::<String>::new()));
    let sink = Arc::clone(&seen);
    let clock = ManualClock::new();
    let mut app = BookingApp::with_reflow(Settings::default(), clock.clone(), move |key: &str| {
        sink.lock().expect("reflow log").push(key.to_string());
    });
    app.navigate("/booking").expect("navigate");

    let seen = seen.lock().expect("reflow log");
    assert!(seen.contains(&"screen:".to_string()));
    assert!(seen.contains(&"screen:booking".to_string()));
    assert!(seen.contains(&"wizard:step:/booking".to_string()));
    assert!(seen.contains(&"chrome:header".to_string()));
}

#[test]
fn tick_drains_changes_queued_by_operations() {
    let (mut app, clock) = app();
    let initial = app.tick();
    assert!(initial.iter().any(|c| c.key == "screen:" && c.to == Phase::Entering));
    assert!(app.tick().is_empty());

    clock.advance_ms(600);
    let changes = app.tick();
    assert!(changes.iter().any(|c| c.key == "screen:" && c.to == Phase::Entered));
}

#[test]
fn submit_details_rejects_empty_origin() {
    let (mut app, _clock) = app();
    app.navigate("/booking").expect("navigate");
    app.edit_details(DetailsEdit::From(String::new()));

    let err = app.submit_details().expect_err("invalid");
    assert!(matches!(err, CoreError::Validation(ref errors) if errors.contains(BookingField::From)));
    assert_eq!(app.location().path(), "/booking");
}

#[test]
fn submit_details_navigates_then_resets_passenger_stubs() {
    let (mut app, clock) = app();
    app.navigate("/booking").expect("navigate");
    settle(&mut app, &clock);
    app.edit_details(DetailsEdit::Passengers(4));
    app.set_departure_date(date(3, 5));
    app.set_return_date(date(3, 9));

    let outcome = app.submit_details().expect("valid");
    assert_eq!(outcome.location().path(), "/booking/flights");
    let state = app.state();
    assert_eq!(state.passenger_data.len(), 3);
    assert_eq!(state.booking_details.passengers, 4);
    assert_eq!(app.current_step(), Some(BookingStep::Flights));
    assert_eq!(app.flights_frame().departures.len(), 5);
}

#[test]
fn continue_from_flights_needs_a_complete_selection() {
    let (mut app, _clock) = app();
    app.navigate("/booking/flights").expect("navigate");
    assert!(matches!(
        app.continue_from_flights(),
        Err(CoreError::SelectionIncomplete)
    ));
    app.dispatch(Action::SetBookingDetails(shared::domain::BookingDetails {
        one_way: true,
        ..app.state().booking_details.clone()
    }));
    app.select_flight(FlightLeg::Departure, &FlightId::new("f4"))
        .expect("listed");
    let outcome = app.continue_from_flights().expect("complete");
    assert_eq!(outcome.location().path(), "/booking/payment");
}

#[test]
fn menu_and_theme_toggle_through_the_store() {
    let (mut app, _clock) = app();
    assert!(app.toggle_menu());
    assert!(app.state().menu_open);
    assert_eq!(app.frame().menu.context.phase, Phase::Entering);
    assert!(app.toggle_theme());
    assert_eq!(app.frame().theme, shared::domain::Theme::Dark);
}

#[test]
fn scroll_uses_the_configured_threshold() {
    let clock = ManualClock::new();
    let settings = Settings {
        scroll_threshold_px: 50.0,
        ..Settings::default()
    };
    let mut app = BookingApp::new(settings, clock);
    assert!(!app.scroll(40.0));
    assert!(app.scroll(60.0));
    assert!(app.state().scrolled);
}

#[test]
fn entering_payment_again_starts_a_fresh_flow() {
    let (mut app, clock) = app();
    app.navigate("/booking/payment").expect("navigate");
    app.begin_payment().expect("idle");
    app.finish_payment(&PaymentReceipt {
        amount: 0,
        card_number: "4096".into(),
    });
    settle(&mut app, &clock);
    assert_eq!(app.payment().status(), PaymentStatus::Complete);

    app.navigate("/booking/flights").expect("navigate");
    app.navigate("/booking/payment").expect("navigate");
    assert_eq!(app.payment().status(), PaymentStatus::Idle);
}

#[tokio::test(start_paused = true)]
async fn pay_runs_the_processor_and_completes() {
    let (mut app, _clock) = app();
    app.navigate("/booking/payment").expect("navigate");
    let receipt = app
        .pay(&SimulatedPayment::new(Duration::from_secs(2)))
        .await
        .expect("payment");
    assert_eq!(receipt.card_number, "4096");
    assert_eq!(app.payment().status(), PaymentStatus::Complete);
    assert!(app.payment_frame().success.is_some());
}
