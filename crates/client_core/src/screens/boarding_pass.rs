use serde::{Deserialize, Serialize};
use shared::domain::{FlightEndpoint, ShareUser};

use crate::store::AppState;

pub const GATE: &str = "127";
pub const BOARDING_TIME: &str = "10:00";
pub const SEAT: &str = "42B";
pub const FLIGHT_NUMBER: &str = "BL256";
pub const DURATION_LABEL: &str = "12hrs";
pub const BAGGAGE: &str = "1 checked bag, 1 carry on";

/// Seats handed to the first invited passengers, in order.
const CHECKED_IN_SEATS: [&str; 2] = ["47C", "62A"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "seat", rename_all = "snake_case")]
pub enum CheckIn {
    CheckedIn(String),
    Pending,
}

impl CheckIn {
    pub fn label(&self) -> &str {
        match self {
            CheckIn::CheckedIn(seat) => seat,
            CheckIn::Pending => "Pending",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardedPassenger {
    pub email: String,
    /// Known only when the email matches a contact.
    pub name: Option<String>,
    pub check_in: CheckIn,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardingPassView {
    pub from: FlightEndpoint,
    pub to: FlightEndpoint,
    pub gate: String,
    pub boarding_time: String,
    pub seat: String,
    pub flight_number: String,
    pub passengers: Vec<BoardedPassenger>,
}

impl BoardingPassView {
    pub fn from_label(&self) -> String {
        endpoint_label(&self.from)
    }

    pub fn to_label(&self) -> String {
        endpoint_label(&self.to)
    }
}

fn endpoint_label(endpoint: &FlightEndpoint) -> String {
    format!("{}, {}", endpoint.day.as_deref().unwrap_or_default(), endpoint.time)
}

/// `None` without a departure flight; the route guard redirects in that case.
pub fn boarding_pass_view(state: &AppState, contacts: &[ShareUser]) -> Option<BoardingPassView> {
    let flight = state.departure_flight.as_ref()?;
    let passengers = state
        .passenger_data
        .iter()
        .enumerate()
        .map(|(index, passenger)| BoardedPassenger {
            email: passenger.email.clone(),
            name: contacts
                .iter()
                .find(|contact| contact.email == passenger.email)
                .map(ShareUser::full_name),
            check_in: CHECKED_IN_SEATS
                .get(index)
                .map_or(CheckIn::Pending, |seat| CheckIn::CheckedIn(seat.to_string())),
        })
        .collect();
    Some(BoardingPassView {
        from: flight.from.clone(),
        to: flight.to.clone(),
        gate: GATE.to_string(),
        boarding_time: BOARDING_TIME.to_string(),
        seat: SEAT.to_string(),
        flight_number: FLIGHT_NUMBER.to_string(),
        passengers,
    })
}

#[cfg(test)]
#[path = "../tests/boarding_pass_tests.rs"]
mod tests;
