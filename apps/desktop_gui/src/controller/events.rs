//! Events flowing from the backend worker back to the UI thread.

use client_core::screens::payment::PaymentReceipt;

#[derive(Debug, Clone)]
pub enum UiEvent {
    Info(String),
    PaymentCompleted(PaymentReceipt),
    PaymentFailed(String),
}
