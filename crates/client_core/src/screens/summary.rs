//! Booking summary card shown on the passengers and payment steps.
//!
//! The expanded panel animates to the measured height of its item list,
//! so the height is taken after the first layout and only then applied.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use shared::format::{format_money, plural};

use crate::{
    config::Timings,
    direction::Direction,
    frame::ChromeLayer,
    layout::Measurement,
    routes::BookingStep,
    store::AppState,
    transition::{PhaseChange, Reflow, Transition, TransitionConfig},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryItem {
    pub from_airport: String,
    pub to_airport: String,
    /// `"<day> <time>—<day> <time>"`
    pub schedule: String,
    /// Price × passengers.
    pub price: String,
    pub edit_route: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryView {
    pub from_airport: String,
    pub to_airport: String,
    pub from_city: String,
    pub to_city: String,
    pub total: String,
    /// `"N passenger(s), one way|roundtrip"`
    pub description: String,
    pub items: Vec<SummaryItem>,
    pub raised: bool,
}

/// `None` while no departure flight is selected.
pub fn summary_view(state: &AppState) -> Option<SummaryView> {
    let departure = state.departure_flight.as_ref()?;
    let details = &state.booking_details;
    let passengers = u64::from(details.passengers);
    let items = [Some(departure), state.return_flight.as_ref()]
        .into_iter()
        .flatten()
        .map(|flight| SummaryItem {
            from_airport: flight.from.airport.clone(),
            to_airport: flight.to.airport.clone(),
            schedule: format!(
                "{} {}—{} {}",
                flight.from.day.as_deref().unwrap_or_default(),
                flight.from.time,
                flight.to.day.as_deref().unwrap_or_default(),
                flight.to.time
            ),
            price: format_money(u64::from(flight.price) * passengers),
            edit_route: BookingStep::Flights.path().to_string(),
        })
        .collect();
    Some(SummaryView {
        from_airport: departure.from.airport.clone(),
        to_airport: departure.to.airport.clone(),
        from_city: departure.from.city.clone(),
        to_city: departure.to.city.clone(),
        total: format_money(state.total_price()),
        description: format!(
            "{}, {}",
            plural("passenger", usize::from(details.passengers)),
            if details.one_way { "one way" } else { "roundtrip" }
        ),
        items,
        raised: state.scrolled,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryFrame {
    pub expanded: bool,
    pub content: Option<ChromeLayer>,
    /// Height the expanded panel animates towards; zero until measured.
    pub content_height: f32,
    pub measurement: Measurement,
}

#[derive(Debug, Clone)]
pub struct SummaryCard {
    expanded: bool,
    content: Transition,
    measurement: Measurement,
}

impl SummaryCard {
    pub fn new(timings: &Timings) -> Self {
        Self {
            expanded: false,
            content: Transition::new("summary:content", TransitionConfig::lazy(timings.item)),
            measurement: Measurement::default(),
        }
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn set_expanded(&mut self, expanded: bool, now: Instant, reflow: &mut dyn Reflow) -> Option<PhaseChange> {
        self.expanded = expanded;
        if expanded {
            self.measurement.reset();
        }
        self.content.set_in(expanded, now, reflow)
    }

    pub fn toggle(&mut self, now: Instant, reflow: &mut dyn Reflow) -> Option<PhaseChange> {
        self.set_expanded(!self.expanded, now, reflow)
    }

    /// Layout pass callback with the item list's natural height. Leaves the
    /// card measured but unpositioned until the next [`Self::position`].
    pub fn measure(&mut self, height: f32) {
        self.measurement.measure(height);
    }

    /// Second layout pass: the content's top offset inside the card.
    /// `false` while nothing has been measured.
    pub fn position(&mut self, offset: f32) -> bool {
        self.measurement.position(offset)
    }

    pub fn measurement(&self) -> Measurement {
        self.measurement
    }

    pub fn poll(&mut self, now: Instant) -> Option<PhaseChange> {
        self.content.poll(now)
    }

    pub fn is_settled(&self) -> bool {
        self.content.is_settled()
    }

    pub fn frame(&self, now: Instant) -> SummaryFrame {
        let content = self
            .content
            .is_mounted()
            .then(|| ChromeLayer::from_transition(&self.content, Direction::Forward, now));
        let visibility = content.as_ref().map_or(0.0, |layer| layer.context.visibility);
        SummaryFrame {
            expanded: self.expanded,
            content,
            content_height: self.measurement.height().unwrap_or_default() * visibility,
            measurement: self.measurement,
        }
    }
}

#[cfg(test)]
#[path = "../tests/summary_tests.rs"]
mod tests;
