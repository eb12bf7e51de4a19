use super::*;

use shared::fixtures;

use crate::transition::NoReflow;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn priced_state() -> AppState {
    let mut state = AppState::default();
    state.departure_flight = Some(fixtures::departures().remove(0));
    state.return_flight = Some(fixtures::returns().remove(0));
    state.booking_details.passengers = 2;
    state
}

#[test]
fn labels_use_total_and_card() {
    let state = priced_state();
    assert_eq!(pay_label(&state), "Pay $2,080 AUD");
    assert_eq!(card_description(&state), "Pay with card ending in 4096");
    assert!(success_message(true).starts_with("Your flight is booked"));
    assert!(success_message(false).starts_with("Your flights are booked"));
    assert_eq!(success_route(), "/boarding-pass");
}

#[test]
fn begin_moves_to_processing_once() {
    let t0 = Instant::now();
    let state = priced_state();
    let mut flow = PaymentFlow::new(&Timings::default(), t0, &mut NoReflow);
    let request = flow.begin(&state).expect("idle");
    assert_eq!(request.amount, (477 + 564) * 2);
    assert_eq!(request.card.number, "4096");
    assert_eq!(flow.status(), PaymentStatus::Processing);
    assert!(flow.is_loading());

    assert!(matches!(flow.begin(&state), Err(CoreError::PaymentInProgress)));

    flow.cancel();
    assert_eq!(flow.status(), PaymentStatus::Idle);
    assert!(!flow.is_loading());
}

#[test]
fn completion_swaps_form_for_success() {
    let t0 = Instant::now();
    let state = priced_state();
    let mut flow = PaymentFlow::new(&Timings::default(), t0, &mut NoReflow);
    flow.poll(t0 + ms(400));
    let frame = flow.frame(t0 + ms(400));
    assert_eq!(frame.form.map(|layer| layer.context.phase), Some(Phase::Entered));
    assert!(frame.success.is_none());

    flow.begin(&state).expect("idle");
    let receipt = PaymentReceipt {
        amount: state.total_price(),
        card_number: "4096".into(),
    };
    let now = t0 + ms(2400);
    let changes = flow.complete(&receipt, now, &mut NoReflow);
    assert_eq!(changes.len(), 2);
    assert_eq!(flow.status(), PaymentStatus::Complete);
    // Still loading while the form slides away.
    assert!(flow.is_loading());

    let frame = flow.frame(now);
    assert_eq!(frame.form.map(|layer| layer.context.phase), Some(Phase::Exiting));
    assert_eq!(frame.success.map(|layer| layer.context.phase), Some(Phase::Entering));

    flow.poll(now + ms(400));
    assert!(!flow.is_loading());
    assert!(flow.is_settled());
    assert!(matches!(flow.begin(&state), Err(CoreError::PaymentInProgress)));
}

#[test]
fn receipts_without_a_pending_payment_are_ignored() {
    let t0 = Instant::now();
    let state = priced_state();
    let mut flow = PaymentFlow::new(&Timings::default(), t0, &mut NoReflow);
    flow.poll(t0 + ms(400));
    let receipt = PaymentReceipt {
        amount: state.total_price(),
        card_number: "4096".into(),
    };

    assert!(flow.complete(&receipt, t0 + ms(500), &mut NoReflow).is_empty());
    assert_eq!(flow.status(), PaymentStatus::Idle);
    let frame = flow.frame(t0 + ms(500));
    assert_eq!(frame.form.map(|layer| layer.context.phase), Some(Phase::Entered));
    assert!(frame.success.is_none());

    flow.begin(&state).expect("idle");
    assert_eq!(flow.complete(&receipt, t0 + ms(600), &mut NoReflow).len(), 2);
    assert!(flow.complete(&receipt, t0 + ms(700), &mut NoReflow).is_empty());
    assert_eq!(flow.status(), PaymentStatus::Complete);
}

#[tokio::test(start_paused = true)]
async fn simulated_payment_waits_for_the_delay() {
    let processor = SimulatedPayment::new(Duration::from_secs(2));
    let started = tokio::time::Instant::now();
    let receipt = processor
        .process(PaymentRequest {
            amount: 1430,
            card: fixtures::user().card,
        })
        .await
        .expect("simulated payment never fails");
    assert_eq!(receipt.amount, 1430);
    assert_eq!(receipt.card_number, "4096");
    assert!(started.elapsed() >= Duration::from_secs(2));
}
