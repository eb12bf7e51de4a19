//! Nested coordinator for the four booking steps.
//!
//! Uses the same phase/direction contract as the top-level orchestrator,
//! scoped to `/booking/*`. The search-details banner and the summary card
//! have their own primitives, and their visibility depends on the current
//! step only, never on the phase of the step content.

use std::time::Instant;

use crate::{
    config::Timings,
    direction::{Direction, StepIndices},
    frame::{ChromeLayer, StepLayer, WizardFrame},
    group::TransitionGroup,
    routes::{BookingStep, Location},
    scroll::ScrollRestore,
    store::Store,
    transition::{PhaseChange, Reflow, Transition, TransitionConfig},
};

pub const SEARCH_DETAILS_KEY: &str = "search-details";
pub const SUMMARY_KEY: &str = "wizard:summary";

#[derive(Debug, Clone)]
pub struct StepSlot {
    pub step: BookingStep,
    pub location: Location,
    scroll: ScrollRestore,
}

pub fn shows_search_details(step: BookingStep) -> bool {
    step == BookingStep::Flights
}

pub fn shows_summary(step: BookingStep) -> bool {
    matches!(step, BookingStep::Passengers | BookingStep::Payment)
}

/// `+1` while sitting on the details step, `-1` deeper in the wizard.
pub fn container_direction(location: &Location) -> Direction {
    if location.path() == BookingStep::Details.path() {
        Direction::Forward
    } else {
        Direction::Backward
    }
}

#[derive(Debug, Clone)]
pub struct BookingWizard {
    timings: Timings,
    indices: StepIndices,
    current: Option<BookingStep>,
    steps: TransitionGroup<String, StepSlot>,
    search_details: TransitionGroup<&'static str>,
    summary: Transition,
}

impl BookingWizard {
    pub fn new(timings: &Timings) -> Self {
        Self {
            timings: *timings,
            indices: StepIndices::default(),
            current: None,
            steps: TransitionGroup::new("wizard:step", TransitionConfig::new(timings.screen)),
            search_details: TransitionGroup::new(
                "wizard",
                TransitionConfig::new(timings.screen),
            ),
            summary: Transition::new(SUMMARY_KEY, TransitionConfig::lazy(timings.screen)),
        }
    }

    /// Drops all step state, as when the booking section mounts afresh.
    pub fn reset(&mut self) {
        self.indices.reset();
        self.current = None;
        self.steps.clear();
        self.search_details.clear();
        self.summary = Transition::new(SUMMARY_KEY, TransitionConfig::lazy(self.timings.screen));
    }

    pub fn current_step(&self) -> Option<BookingStep> {
        self.current
    }

    pub fn indices(&self) -> StepIndices {
        self.indices
    }

    /// Applies a navigation inside `/booking`. Returns `None` when the path
    /// names no wizard step; nothing is touched in that case.
    pub fn sync(
        &mut self,
        location: &Location,
        now: Instant,
        reflow: &mut dyn Reflow,
    ) -> Option<Vec<PhaseChange>> {
        let matched = location.booking_step()?;
        let step = matched.target;
        self.indices.advance(matched.index);
        self.current = Some(step);

        let key = location.path().to_string();
        let mut changes = self.steps.sync(
            std::slice::from_ref(&key),
            now,
            reflow,
            |_| StepSlot {
                step,
                location: location.clone(),
                scroll: ScrollRestore::new(),
            },
        );

        let banner: &[&'static str] = if shows_search_details(step) {
            &[SEARCH_DETAILS_KEY]
        } else {
            &[]
        };
        changes.extend(self.search_details.sync_keys(banner, now, reflow));
        changes.extend(self.summary.set_in(shows_summary(step), now, reflow));
        Some(changes)
    }

    /// Fires due deadlines and runs scroll restoration for the step screens.
    pub fn poll(&mut self, now: Instant, store: &mut Store) -> Vec<PhaseChange> {
        let mut changes = self.steps.poll(now);
        changes.extend(self.search_details.poll(now));
        changes.extend(self.summary.poll(now));
        for child in self.steps.children_mut() {
            let phase = child.transition.phase();
            child.payload.scroll.observe(phase, store);
        }
        changes
    }

    pub fn is_settled(&self) -> bool {
        self.steps.is_settled() && self.search_details.is_settled() && self.summary.is_settled()
    }

    pub fn frame(&self, location: &Location, now: Instant) -> WizardFrame {
        let steps = self
            .steps
            .contexts(now, |child| self.indices.resolve(child.is_entering_side()))
            .into_iter()
            .map(|(child, context)| StepLayer {
                key: child.key.clone(),
                step: child.payload.step,
                location: child.payload.location.clone(),
                context,
            })
            .collect();
        let search_details = self
            .search_details
            .contexts(now, |child| self.indices.resolve(child.is_entering_side()))
            .into_iter()
            .map(|(child, context)| ChromeLayer {
                key: child.transition.key().to_string(),
                mounted: child.transition.is_mounted(),
                context,
            })
            .collect();
        let summary = self
            .summary
            .is_mounted()
            .then(|| ChromeLayer::from_transition(&self.summary, Direction::Forward, now));
        WizardFrame {
            container_direction: container_direction(location),
            steps,
            search_details,
            summary,
        }
    }
}

#[cfg(test)]
#[path = "tests/wizard_tests.rs"]
mod tests;
