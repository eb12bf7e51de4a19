//! Booking details form: the validation gate in front of the wizard.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::{
    domain::{BookingDetails, BookingField, Location, PassengerStub},
    error::ValidationErrors,
    fixtures,
    format::plural,
};
use tracing::debug;

use crate::{
    routes::BookingStep,
    store::{Action, Store},
};

/// A single committed edit of the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum DetailsEdit {
    From(String),
    To(String),
    OneWay(bool),
    Passengers(u8),
}

impl DetailsEdit {
    pub fn field(&self) -> BookingField {
        match self {
            DetailsEdit::From(_) => BookingField::From,
            DetailsEdit::To(_) => BookingField::To,
            DetailsEdit::OneWay(_) => BookingField::OneWay,
            DetailsEdit::Passengers(_) => BookingField::Passengers,
        }
    }
}

/// Result of a submit that passed the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsSubmission {
    pub route: &'static str,
    /// One blank stub per additional passenger.
    pub passenger_data: Vec<PassengerStub>,
}

pub fn validate(details: &BookingDetails) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if details.departure_date.is_none() {
        errors.push(BookingField::DepartureDate);
    }
    if details.return_date.is_none() && !details.one_way {
        errors.push(BookingField::ReturnDate);
    }
    if details.from.trim().is_empty() {
        errors.push(BookingField::From);
    }
    errors
}

/// `(value, label)` pairs for the passenger selector.
pub fn passenger_options(max_passengers: u8) -> Vec<(u8, String)> {
    (1..=max_passengers.max(1))
        .map(|count| (count, plural("passenger", usize::from(count))))
        .collect()
}

pub fn location_suggestions(query: &str) -> Vec<Location> {
    fixtures::suggest_locations(query)
}

#[derive(Debug, Clone, Default)]
pub struct DetailsForm {
    errors: ValidationErrors,
    max_passengers: u8,
}

impl DetailsForm {
    pub fn new(max_passengers: u8) -> Self {
        Self {
            errors: ValidationErrors::new(),
            max_passengers: max_passengers.max(1),
        }
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn max_passengers(&self) -> u8 {
        self.max_passengers
    }

    /// Clears the edited field's error and commits the change.
    pub fn edit(&mut self, store: &mut Store, edit: DetailsEdit) -> bool {
        self.errors.clear(edit.field());
        let mut details = store.get().booking_details.clone();
        match edit {
            DetailsEdit::From(value) => details.from = value,
            DetailsEdit::To(value) => details.to = value,
            DetailsEdit::OneWay(value) => details.one_way = value,
            DetailsEdit::Passengers(value) => {
                details.passengers = value.clamp(1, self.max_passengers);
            }
        }
        store.dispatch(Action::SetBookingDetails(details))
    }

    /// Sets the departure date. On a round trip a return date that would
    /// now precede it is dropped.
    pub fn set_departure_date(&mut self, store: &mut Store, date: NaiveDate) -> bool {
        self.clear_date_errors();
        let mut details = store.get().booking_details.clone();
        details.departure_date = Some(date);
        if !details.one_way && details.return_date.is_some_and(|ret| ret < date) {
            details.return_date = None;
        }
        store.dispatch(Action::SetBookingDetails(details))
    }

    /// Sets the return date. A date before the departure becomes the new
    /// departure and the old departure becomes the return.
    pub fn set_return_date(&mut self, store: &mut Store, date: NaiveDate) -> bool {
        self.clear_date_errors();
        let mut details = store.get().booking_details.clone();
        match details.departure_date {
            Some(departure) if date < departure => {
                details.departure_date = Some(date);
                details.return_date = Some(departure);
            }
            _ => details.return_date = Some(date),
        }
        store.dispatch(Action::SetBookingDetails(details))
    }

    /// Runs the gate. On failure the error set is replaced and returned; on
    /// success the caller navigates first and dispatches the stubs second.
    pub fn submit(&mut self, store: &Store) -> Result<DetailsSubmission, ValidationErrors> {
        let details = &store.get().booking_details;
        self.errors = validate(details);
        if !self.errors.is_empty() {
            debug!(errors = ?self.errors.fields, "details rejected");
            return Err(self.errors.clone());
        }
        let extra = usize::from(details.passengers.saturating_sub(1));
        Ok(DetailsSubmission {
            route: BookingStep::Flights.path(),
            passenger_data: (0..extra).map(|_| PassengerStub::blank()).collect(),
        })
    }

    fn clear_date_errors(&mut self) {
        self.errors.clear(BookingField::DepartureDate);
        self.errors.clear(BookingField::ReturnDate);
    }
}

#[cfg(test)]
#[path = "../tests/details_tests.rs"]
mod tests;
