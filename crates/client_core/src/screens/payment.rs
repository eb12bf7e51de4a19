//! Payment step: a simulated processor plus the form/success swap.

use std::time::{Duration, Instant};

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::{domain::CardStub, format::format_money};
use tracing::{info, warn};

use crate::{
    config::Timings,
    direction::Direction,
    error::CoreError,
    frame::ChromeLayer,
    routes::BOARDING_PASS_PATH,
    store::AppState,
    transition::{Phase, PhaseChange, Reflow, Transition, TransitionConfig},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Whole AUD.
    pub amount: u64,
    pub card: CardStub,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub amount: u64,
    pub card_number: String,
}

#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    async fn process(&self, request: PaymentRequest) -> Result<PaymentReceipt>;
}

/// Waits out the configured delay and always succeeds.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedPayment {
    delay: Duration,
}

impl SimulatedPayment {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl PaymentProcessor for SimulatedPayment {
    async fn process(&self, request: PaymentRequest) -> Result<PaymentReceipt> {
        tokio::time::sleep(self.delay).await;
        Ok(PaymentReceipt {
            amount: request.amount,
            card_number: request.card.number,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Idle,
    Processing,
    Complete,
}

pub fn pay_label(state: &AppState) -> String {
    format!("Pay {} AUD", format_money(state.total_price()))
}

pub fn card_description(state: &AppState) -> String {
    format!("Pay with card ending in {}", state.user.card.number)
}

pub fn success_message(one_way: bool) -> String {
    format!(
        "Your {} booked and ready to go. View your boarding pass to manage seats and passengers.",
        if one_way { "flight is" } else { "flights are" }
    )
}

pub fn success_route() -> &'static str {
    BOARDING_PASS_PATH
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentFrame {
    pub status: PaymentStatus,
    pub loading: bool,
    pub form: Option<ChromeLayer>,
    pub success: Option<ChromeLayer>,
}

#[derive(Debug, Clone)]
pub struct PaymentFlow {
    status: PaymentStatus,
    form: Transition,
    success: Transition,
}

impl PaymentFlow {
    pub fn new(timings: &Timings, now: Instant, reflow: &mut dyn Reflow) -> Self {
        Self {
            status: PaymentStatus::Idle,
            form: Transition::with_initial(
                "payment:form",
                true,
                TransitionConfig::new(timings.item),
                now,
                reflow,
            ),
            success: Transition::new("payment:success", TransitionConfig::lazy(timings.item)),
        }
    }

    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    /// The pay button spins while processing and while the form slides away.
    pub fn is_loading(&self) -> bool {
        self.status == PaymentStatus::Processing || self.form.phase() == Phase::Exiting
    }

    /// Moves to processing and builds the request for the processor.
    pub fn begin(&mut self, state: &AppState) -> Result<PaymentRequest, CoreError> {
        if self.status != PaymentStatus::Idle {
            return Err(CoreError::PaymentInProgress);
        }
        self.status = PaymentStatus::Processing;
        let request = PaymentRequest {
            amount: state.total_price(),
            card: state.user.card.clone(),
        };
        info!(amount = request.amount, "payment started");
        Ok(request)
    }

    /// Returns to idle after a processor error so the user can retry.
    pub fn cancel(&mut self) {
        if self.status == PaymentStatus::Processing {
            self.status = PaymentStatus::Idle;
        }
    }

    /// Swaps the form out for the success panel. Receipts that arrive while
    /// no payment is processing are ignored.
    pub fn complete(
        &mut self,
        receipt: &PaymentReceipt,
        now: Instant,
        reflow: &mut dyn Reflow,
    ) -> Vec<PhaseChange> {
        if self.status != PaymentStatus::Processing {
            warn!(amount = receipt.amount, status = ?self.status, "ignoring stray payment receipt");
            return Vec::new();
        }
        info!(amount = receipt.amount, "payment complete");
        self.status = PaymentStatus::Complete;
        let mut changes = Vec::new();
        changes.extend(self.form.set_in(false, now, reflow));
        changes.extend(self.success.set_in(true, now, reflow));
        changes
    }

    pub fn poll(&mut self, now: Instant) -> Vec<PhaseChange> {
        self.form.poll(now).into_iter().chain(self.success.poll(now)).collect()
    }

    pub fn is_settled(&self) -> bool {
        self.form.is_settled() && self.success.is_settled()
    }

    pub fn frame(&self, now: Instant) -> PaymentFrame {
        let layer = |transition: &Transition| {
            transition
                .is_mounted()
                .then(|| ChromeLayer::from_transition(transition, Direction::Forward, now))
        };
        PaymentFrame {
            status: self.status,
            loading: self.is_loading(),
            form: layer(&self.form),
            success: layer(&self.success),
        }
    }
}

#[cfg(test)]
#[path = "../tests/payment_tests.rs"]
mod tests;
