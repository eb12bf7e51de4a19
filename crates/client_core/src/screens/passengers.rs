//! Passenger invitations. Every edit replaces the whole stub list through
//! `setPassengerData`, which keeps the passenger count at `len + 1`.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use shared::domain::{PassengerId, PassengerStub, ShareUser};

use crate::{
    config::Timings,
    direction::Direction,
    group::TransitionGroup,
    routes::BookingStep,
    screens::ItemLayer,
    store::{Action, AppState, Store},
    transition::{PhaseChange, Reflow, TransitionConfig},
};

pub const PRIMARY_USER_TAG: &str = "You";
pub const EMAIL_PLACEHOLDER: &str = "name@email.com";

pub fn submit_route() -> &'static str {
    BookingStep::Payment.path()
}

/// Stubs are numbered after the primary user, so the first stub is passenger 2.
pub fn passenger_label(index: usize) -> String {
    format!("Passenger {} email", index + 2)
}

/// Appends a blank stub unless the booking is already full.
pub fn add_passenger(store: &mut Store, max_passengers: u8) -> bool {
    let mut data = store.get().passenger_data.clone();
    if data.len() + 1 >= usize::from(max_passengers) {
        return false;
    }
    data.push(PassengerStub::blank());
    store.dispatch(Action::SetPassengerData(data))
}

pub fn remove_passenger(store: &mut Store, index: usize) -> bool {
    let mut data = store.get().passenger_data.clone();
    if index >= data.len() {
        return false;
    }
    data.remove(index);
    store.dispatch(Action::SetPassengerData(data))
}

pub fn set_passenger_email(store: &mut Store, index: usize, email: &str) -> bool {
    let mut data = store.get().passenger_data.clone();
    let Some(stub) = data.get_mut(index) else {
        return false;
    };
    stub.email = email.to_string();
    store.dispatch(Action::SetPassengerData(data))
}

/// Contacts not yet invited.
pub fn available_users(state: &AppState, contacts: &[ShareUser]) -> Vec<ShareUser> {
    contacts
        .iter()
        .filter(|user| {
            !state
                .passenger_data
                .iter()
                .any(|passenger| passenger.email == user.email)
        })
        .cloned()
        .collect()
}

/// Row primitives, keyed by stub id so removing a middle row animates that row only.
#[derive(Debug, Clone)]
pub struct PassengersScreen {
    rows: TransitionGroup<PassengerId>,
}

impl PassengersScreen {
    pub fn new(timings: &Timings) -> Self {
        Self {
            rows: TransitionGroup::new("passengers:row", TransitionConfig::new(timings.item)),
        }
    }

    pub fn sync(&mut self, state: &AppState, now: Instant, reflow: &mut dyn Reflow) -> Vec<PhaseChange> {
        let ids: Vec<PassengerId> = state
            .passenger_data
            .iter()
            .map(|stub| stub.id.clone())
            .collect();
        self.rows.sync_keys(&ids, now, reflow)
    }

    pub fn poll(&mut self, now: Instant) -> Vec<PhaseChange> {
        self.rows.poll(now)
    }

    pub fn is_settled(&self) -> bool {
        self.rows.is_settled()
    }

    pub fn frame(&self, now: Instant) -> Vec<ItemLayer> {
        self.rows
            .contexts(now, |_| Direction::Forward)
            .into_iter()
            .map(|(child, context)| ItemLayer {
                key: child.key.to_string(),
                context,
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../tests/passengers_tests.rs"]
mod tests;
