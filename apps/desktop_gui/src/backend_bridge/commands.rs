//! Backend commands queued from UI to backend worker.

use client_core::screens::payment::PaymentRequest;

#[derive(Debug, Clone)]
pub enum BackendCommand {
    ProcessPayment(PaymentRequest),
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::ProcessPayment(_) => "process_payment",
        }
    }
}
