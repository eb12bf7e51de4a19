//! Runtime bridge between UI command queue and backend event intake.

use std::{thread, time::Duration};

use client_core::screens::payment::{PaymentProcessor, SimulatedPayment};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, payment_delay: Duration) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::Info(format!(
                    "backend worker startup failure: {err}"
                )));
                return;
            }
        };

        let processor = SimulatedPayment::new(payment_delay);
        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                tracing::debug!(command = cmd.name(), "backend command received");
                match cmd {
                    BackendCommand::ProcessPayment(request) => {
                        let event = match processor.process(request).await {
                            Ok(receipt) => UiEvent::PaymentCompleted(receipt),
                            Err(err) => UiEvent::PaymentFailed(err.to_string()),
                        };
                        if ui_tx.send(event).is_err() {
                            break;
                        }
                    }
                }
            }
            tracing::info!("backend worker stopped");
        });
    });
}
