use super::*;

use client_core::screens::payment::PaymentRequest;
use crossbeam_channel::bounded;
use shared::fixtures;

fn payment() -> BackendCommand {
    BackendCommand::ProcessPayment(PaymentRequest {
        amount: 954,
        card: fixtures::user().card,
    })
}

#[test]
fn queues_when_the_worker_has_room() {
    let (cmd_tx, cmd_rx) = bounded(1);
    let mut status = String::new();
    assert!(dispatch_backend_command(&cmd_tx, payment(), &mut status));
    assert!(status.is_empty());
    assert!(matches!(cmd_rx.try_recv(), Ok(BackendCommand::ProcessPayment(_))));
}

#[test]
fn full_queue_reports_retry() {
    let (cmd_tx, _cmd_rx) = bounded(1);
    let mut status = String::new();
    assert!(dispatch_backend_command(&cmd_tx, payment(), &mut status));
    assert!(!dispatch_backend_command(&cmd_tx, payment(), &mut status));
    assert!(status.contains("full"));
}

#[test]
fn disconnected_worker_is_reported() {
    let (cmd_tx, cmd_rx) = bounded(1);
    drop(cmd_rx);
    let mut status = String::new();
    assert!(!dispatch_backend_command(&cmd_tx, payment(), &mut status));
    assert!(status.contains("disconnected"));
}
