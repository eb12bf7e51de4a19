//! Flight selection step.
//!
//! Fixture flights are re-labelled with the booking's cities and dates.
//! Selecting the selected flight again clears it, and while a flight is
//! selected its list collapses to that one entry, so list items enter and
//! leave through their own keyed groups.

use std::time::Instant;

use chrono::Duration as DateDelta;
use serde::{Deserialize, Serialize};
use shared::{
    domain::{BookingDetails, Flight, FlightEndpoint, FlightId},
    fixtures,
    format::{format_money, format_optional_date_short},
};

use crate::{
    config::Timings,
    direction::Direction,
    group::TransitionGroup,
    routes::BookingStep,
    screens::ItemLayer,
    store::{Action, AppState, Store},
    transition::{PhaseChange, Reflow, Transition, TransitionConfig},
};

pub const DEPARTURE_HEADER: &str = "Select a departure flight";
pub const RETURN_HEADER: &str = "Select a return flight";

/// Return flights land two days after they leave.
const RETURN_ARRIVAL_OFFSET_DAYS: i64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightLeg {
    Departure,
    Return,
}

impl FlightLeg {
    fn selected(self, state: &AppState) -> Option<&Flight> {
        match self {
            FlightLeg::Departure => state.departure_flight.as_ref(),
            FlightLeg::Return => state.return_flight.as_ref(),
        }
    }

    fn action(self, flight: Option<Flight>) -> Action {
        match self {
            FlightLeg::Departure => Action::SetDepartureFlight(flight),
            FlightLeg::Return => Action::SetReturnFlight(flight),
        }
    }
}

fn relabel(endpoint: &FlightEndpoint, city: &str, day: String) -> FlightEndpoint {
    let mut endpoint = endpoint.clone();
    if let Some(location) = fixtures::find_location(city) {
        endpoint.city = location.city;
        endpoint.airport = location.airport;
    }
    endpoint.day = Some(day);
    endpoint
}

/// Every fixture flight for a leg, labelled for this booking.
pub fn listed_flights(details: &BookingDetails, leg: FlightLeg) -> Vec<Flight> {
    let (data, from, to, leaves) = match leg {
        FlightLeg::Departure => (
            fixtures::departures(),
            &details.from,
            &details.to,
            details.departure_date,
        ),
        FlightLeg::Return => (
            fixtures::returns(),
            &details.to,
            &details.from,
            details.return_date,
        ),
    };
    let arrives = match leg {
        FlightLeg::Departure => leaves,
        FlightLeg::Return => leaves.map(|date| date + DateDelta::days(RETURN_ARRIVAL_OFFSET_DAYS)),
    };
    data.into_iter()
        .map(|flight| Flight {
            from: relabel(&flight.from, from, format_optional_date_short(leaves)),
            to: relabel(&flight.to, to, format_optional_date_short(arrives)),
            ..flight
        })
        .collect()
}

/// Listed flights narrowed to the selection, if there is one.
pub fn visible_flights(state: &AppState, leg: FlightLeg) -> Vec<Flight> {
    if leg == FlightLeg::Return && !shows_returns(state) {
        return Vec::new();
    }
    let selected = leg.selected(state).map(|flight| &flight.id);
    listed_flights(&state.booking_details, leg)
        .into_iter()
        .filter(|flight| selected.map_or(true, |id| &flight.id == id))
        .collect()
}

pub fn shows_returns(state: &AppState) -> bool {
    state.departure_flight.is_some() && !state.booking_details.one_way
}

pub fn shows_departure_header(state: &AppState) -> bool {
    state.departure_flight.is_none()
}

pub fn shows_return_header(state: &AppState) -> bool {
    shows_returns(state) && state.return_flight.is_none()
}

pub fn can_continue(state: &AppState) -> bool {
    state.departure_flight.is_some()
        && (state.booking_details.one_way || state.return_flight.is_some())
}

pub fn next_route(details: &BookingDetails) -> &'static str {
    if details.passengers > 1 {
        BookingStep::Passengers.path()
    } else {
        BookingStep::Payment.path()
    }
}

/// Choosing the selected flight again deselects it.
pub fn select_flight(store: &mut Store, leg: FlightLeg, flight: &Flight) -> bool {
    let already = leg
        .selected(store.get())
        .is_some_and(|selected| selected.id == flight.id);
    let next = (!already).then(|| flight.clone());
    store.dispatch(leg.action(next))
}

/// Looks a flight up among the listed flights for a leg and toggles it.
pub fn select_flight_by_id(store: &mut Store, leg: FlightLeg, id: &FlightId) -> Option<bool> {
    let flight = listed_flights(&store.get().booking_details, leg)
        .into_iter()
        .find(|flight| &flight.id == id)?;
    Some(select_flight(store, leg, &flight))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightsView {
    pub departures: Vec<Flight>,
    pub returns: Vec<Flight>,
    pub selected_departure: Option<FlightId>,
    pub selected_return: Option<FlightId>,
    pub can_continue: bool,
    pub total_price: u64,
    pub total_label: String,
    pub next_route: String,
}

pub fn flights_view(state: &AppState) -> FlightsView {
    let total_price = state.total_price();
    FlightsView {
        departures: visible_flights(state, FlightLeg::Departure),
        returns: visible_flights(state, FlightLeg::Return),
        selected_departure: state.departure_flight.as_ref().map(|f| f.id.clone()),
        selected_return: state.return_flight.as_ref().map(|f| f.id.clone()),
        can_continue: can_continue(state),
        total_price,
        total_label: format!("Total price: {}", format_money(total_price)),
        next_route: next_route(&state.booking_details).to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightsFrame {
    pub departure_header: Option<ItemLayer>,
    pub departures: Vec<ItemLayer>,
    pub return_header: Option<ItemLayer>,
    pub returns: Vec<ItemLayer>,
}

/// Item-level primitives for the flights list.
#[derive(Debug, Clone)]
pub struct FlightsScreen {
    departure_header: Transition,
    return_header: Transition,
    departures: TransitionGroup<FlightId>,
    returns: TransitionGroup<FlightId>,
}

impl FlightsScreen {
    pub fn new(timings: &Timings) -> Self {
        Self {
            departure_header: Transition::new(
                "flights:departure-header",
                TransitionConfig::lazy(timings.item),
            ),
            return_header: Transition::new(
                "flights:return-header",
                TransitionConfig::lazy(timings.item),
            ),
            departures: TransitionGroup::new("flights:departure", TransitionConfig::new(timings.item)),
            returns: TransitionGroup::new("flights:return", TransitionConfig::new(timings.item)),
        }
    }

    /// Re-targets every item against the current state.
    pub fn sync(&mut self, state: &AppState, now: Instant, reflow: &mut dyn Reflow) -> Vec<PhaseChange> {
        let ids = |leg| -> Vec<FlightId> {
            visible_flights(state, leg)
                .into_iter()
                .map(|flight| flight.id)
                .collect()
        };
        let mut changes = Vec::new();
        changes.extend(self.departure_header.set_in(shows_departure_header(state), now, reflow));
        changes.extend(self.departures.sync_keys(&ids(FlightLeg::Departure), now, reflow));
        changes.extend(self.return_header.set_in(shows_return_header(state), now, reflow));
        changes.extend(self.returns.sync_keys(&ids(FlightLeg::Return), now, reflow));
        changes
    }

    pub fn poll(&mut self, now: Instant) -> Vec<PhaseChange> {
        let mut changes = Vec::new();
        changes.extend(self.departure_header.poll(now));
        changes.extend(self.departures.poll(now));
        changes.extend(self.return_header.poll(now));
        changes.extend(self.returns.poll(now));
        changes
    }

    pub fn is_settled(&self) -> bool {
        self.departure_header.is_settled()
            && self.return_header.is_settled()
            && self.departures.is_settled()
            && self.returns.is_settled()
    }

    pub fn frame(&self, now: Instant) -> FlightsFrame {
        let header = |transition: &Transition| {
            transition.is_mounted().then(|| ItemLayer {
                key: transition.key().to_string(),
                context: transition.context(Direction::Forward, now),
            })
        };
        let items = |group: &TransitionGroup<FlightId>| -> Vec<ItemLayer> {
            group
                .contexts(now, |_| Direction::Forward)
                .into_iter()
                .map(|(child, context)| ItemLayer {
                    key: child.key.to_string(),
                    context,
                })
                .collect()
        };
        FlightsFrame {
            departure_header: header(&self.departure_header),
            departures: items(&self.departures),
            return_header: header(&self.return_header),
            returns: items(&self.returns),
        }
    }
}

#[cfg(test)]
#[path = "../tests/flights_tests.rs"]
mod tests;
