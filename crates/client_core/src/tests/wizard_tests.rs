use super::*;

use std::time::Duration;

use crate::transition::{NoReflow, Phase};

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn location(raw: &str) -> Location {
    Location::parse(raw).expect("valid path")
}

fn step_phases(frame: &WizardFrame) -> Vec<(BookingStep, Phase, Direction)> {
    frame
        .steps
        .iter()
        .map(|layer| (layer.step, layer.context.phase, layer.context.direction))
        .collect()
}

#[test]
fn chrome_visibility_depends_on_the_step_only() {
    assert!(!shows_search_details(BookingStep::Details));
    assert!(shows_search_details(BookingStep::Flights));
    assert!(!shows_search_details(BookingStep::Passengers));
    assert!(!shows_search_details(BookingStep::Payment));

    assert!(!shows_summary(BookingStep::Details));
    assert!(!shows_summary(BookingStep::Flights));
    assert!(shows_summary(BookingStep::Passengers));
    assert!(shows_summary(BookingStep::Payment));
}

#[test]
fn container_direction_is_forward_only_on_details() {
    assert_eq!(container_direction(&location("/booking")), Direction::Forward);
    assert_eq!(container_direction(&location("/booking/flights")), Direction::Backward);
    assert_eq!(container_direction(&location("/booking/payment")), Direction::Backward);
}

#[test]
fn unknown_step_leaves_the_wizard_untouched() {
    let t0 = Instant::now();
    let mut wizard = BookingWizard::new(&Timings::default());
    assert!(wizard.sync(&location("/booking/seats"), t0, &mut NoReflow).is_none());
    assert_eq!(wizard.current_step(), None);
    assert!(wizard.is_settled());
}

#[test]
fn forward_step_enters_forward_and_exits_backward() {
    let t0 = Instant::now();
    let mut store = Store::default();
    let mut wizard = BookingWizard::new(&Timings::default());
    wizard.sync(&location("/booking"), t0, &mut NoReflow);
    wizard.poll(t0 + ms(600), &mut store);

    let now = t0 + ms(1000);
    wizard.sync(&location("/booking/flights"), now, &mut NoReflow);
    let frame = wizard.frame(&location("/booking/flights"), now);
    assert_eq!(
        step_phases(&frame),
        vec![
            (BookingStep::Details, Phase::Exiting, Direction::Backward),
            (BookingStep::Flights, Phase::Entering, Direction::Forward),
        ]
    );
    assert_eq!(frame.search_details.len(), 1);
    assert_eq!(frame.search_details[0].context.phase, Phase::Entering);
    assert!(frame.summary.is_none());
}

#[test]
fn backward_step_flips_both_directions() {
    let t0 = Instant::now();
    let mut store = Store::default();
    let mut wizard = BookingWizard::new(&Timings::default());
    wizard.sync(&location("/booking/payment"), t0, &mut NoReflow);
    wizard.poll(t0 + ms(600), &mut store);

    let now = t0 + ms(700);
    wizard.sync(&location("/booking/flights"), now, &mut NoReflow);
    let frame = wizard.frame(&location("/booking/flights"), now);
    assert_eq!(
        step_phases(&frame),
        vec![
            (BookingStep::Payment, Phase::Exiting, Direction::Forward),
            (BookingStep::Flights, Phase::Entering, Direction::Backward),
        ]
    );
}

#[test]
fn summary_card_mounts_on_passengers_and_unmounts_after_leaving() {
    let t0 = Instant::now();
    let mut store = Store::default();
    let mut wizard = BookingWizard::new(&Timings::default());
    wizard.sync(&location("/booking/flights"), t0, &mut NoReflow);
    assert!(wizard.frame(&location("/booking/flights"), t0).summary.is_none());

    wizard.sync(&location("/booking/passengers"), t0 + ms(100), &mut NoReflow);
    let frame = wizard.frame(&location("/booking/passengers"), t0 + ms(100));
    let summary = frame.summary.expect("summary mounted");
    assert_eq!(summary.context.phase, Phase::Entering);
    assert_eq!(summary.context.direction, Direction::Forward);
    assert_eq!(frame.search_details[0].context.phase, Phase::Exiting);

    // Payment keeps the card without re-entering it.
    wizard.poll(t0 + ms(700), &mut store);
    let changes = wizard
        .sync(&location("/booking/payment"), t0 + ms(800), &mut NoReflow)
        .expect("known step");
    assert!(changes.iter().all(|change| change.key != SUMMARY_KEY));

    wizard.sync(&location("/booking"), t0 + ms(900), &mut NoReflow);
    wizard.poll(t0 + ms(1500), &mut store);
    let frame = wizard.frame(&location("/booking"), t0 + ms(1500));
    assert!(frame.summary.is_none());
    assert!(frame.search_details.is_empty());
    assert_eq!(frame.steps.len(), 1);
}

#[test]
fn entered_step_clears_the_scrolled_flag() {
    let t0 = Instant::now();
    let mut store = Store::default();
    let mut wizard = BookingWizard::new(&Timings::default());
    wizard.sync(&location("/booking"), t0, &mut NoReflow);
    store.dispatch(crate::store::Action::SetScrolled(true));

    wizard.poll(t0 + ms(100), &mut store);
    assert!(store.get().scrolled);
    wizard.poll(t0 + ms(600), &mut store);
    assert!(!store.get().scrolled);
}

#[test]
fn reset_forgets_steps_and_indices() {
    let t0 = Instant::now();
    let mut wizard = BookingWizard::new(&Timings::default());
    wizard.sync(&location("/booking/payment"), t0, &mut NoReflow);
    wizard.reset();
    assert_eq!(wizard.current_step(), None);
    assert_eq!(wizard.indices(), StepIndices::default());

    wizard.sync(&location("/booking"), t0, &mut NoReflow);
    let frame = wizard.frame(&location("/booking"), t0);
    assert_eq!(
        step_phases(&frame),
        vec![(BookingStep::Details, Phase::Entering, Direction::Forward)]
    );
    assert!(frame.summary.is_none());
}
