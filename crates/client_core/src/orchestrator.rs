//! Top-level screen transition coordinator.
//!
//! On every navigation the orchestrator:
//! 1. resolves the requested path against [`TOP_LEVEL_ROUTES`] and redirects
//!    to `/` when the route is unknown or its upstream state is missing;
//! 2. captures the (index, previous index) pair so direction is fixed
//!    before anything mounts;
//! 3. syncs one primitive per top-level key (`""`, `booking`,
//!    `boarding-pass`), so the booking steps share one screen instance;
//! 4. drives the chrome primitives (globe, header, menu) from coarse
//!    predicates on the path and the store rather than the exact step.
//!
//! The guard is re-run on every store change as well, so a screen whose
//! upstream state disappears is replaced by `/` instead of rendering empty.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    config::Timings,
    direction::{Direction, StepIndices},
    error::CoreError,
    frame::{ChromeLayer, Frame, ScreenLayer},
    group::TransitionGroup,
    routes::{Location, Screen},
    scroll::ScrollRestore,
    store::{AppState, Store},
    transition::{PhaseChange, Reflow, Transition, TransitionConfig},
    wizard::BookingWizard,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectReason {
    UnknownRoute,
    MissingDepartureFlight,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum NavigationOutcome {
    Shown {
        location: Location,
        screen: Screen,
    },
    Redirected {
        requested: Location,
        location: Location,
        reason: RedirectReason,
    },
}

impl NavigationOutcome {
    pub fn location(&self) -> &Location {
        match self {
            NavigationOutcome::Shown { location, .. }
            | NavigationOutcome::Redirected { location, .. } => location,
        }
    }

    /// The location that was asked for, before any redirect.
    pub fn requested(&self) -> &Location {
        match self {
            NavigationOutcome::Shown { location, .. } => location,
            NavigationOutcome::Redirected { requested, .. } => requested,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, NavigationOutcome::Redirected { .. })
    }
}

#[derive(Debug, Clone)]
pub struct ScreenSlot {
    pub screen: Screen,
    pub location: Location,
    /// The booking container delegates scroll restoration to its steps.
    scroll: Option<ScrollRestore>,
}

/// Checks a requested location against the route table and the upstream
/// state it needs.
pub fn guard(requested: &Location, state: &AppState) -> Result<Screen, RedirectReason> {
    let screen = requested
        .screen()
        .ok_or(RedirectReason::UnknownRoute)?
        .target;
    match screen {
        Screen::Booking if requested.booking_step().is_none() => Err(RedirectReason::UnknownRoute),
        Screen::BoardingPass if state.departure_flight.is_none() => {
            Err(RedirectReason::MissingDepartureFlight)
        }
        _ => Ok(screen),
    }
}

#[derive(Debug, Clone)]
pub struct ScreenOrchestrator {
    location: Location,
    history: Vec<Location>,
    indices: StepIndices,
    screens: TransitionGroup<String, ScreenSlot>,
    globe: Transition,
    header: Transition,
    menu: Transition,
    wizard: BookingWizard,
    pending: Vec<PhaseChange>,
    redirect: Option<NavigationOutcome>,
}

impl ScreenOrchestrator {
    /// Builds an idle orchestrator; nothing is shown until [`Self::mount`].
    pub fn new(timings: &Timings) -> Self {
        Self {
            location: Location::root(),
            history: Vec::new(),
            indices: StepIndices::default(),
            screens: TransitionGroup::new("screen", TransitionConfig::new(timings.screen)),
            globe: Transition::new("chrome:globe", TransitionConfig::lazy(timings.chrome)),
            header: Transition::new("chrome:header", TransitionConfig::new(timings.chrome)),
            menu: Transition::new("chrome:menu", TransitionConfig::new(timings.menu)),
            wizard: BookingWizard::new(timings),
            pending: Vec::new(),
            redirect: None,
        }
    }

    /// Shows the landing screen and applies the initial store flags.
    pub fn mount(&mut self, state: &AppState, now: Instant, reflow: &mut dyn Reflow) -> Vec<PhaseChange> {
        let mut changes = self.show(Location::root(), now, reflow);
        changes.extend(self.sync_state(state, now, reflow));
        changes
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn wizard(&self) -> &BookingWizard {
        &self.wizard
    }

    pub fn indices(&self) -> StepIndices {
        self.indices
    }

    pub fn is_settled(&self) -> bool {
        self.screens.is_settled()
            && self.globe.is_settled()
            && self.header.is_settled()
            && self.menu.is_settled()
            && self.wizard.is_settled()
    }

    pub fn navigate(
        &mut self,
        raw: &str,
        state: &AppState,
        now: Instant,
        reflow: &mut dyn Reflow,
    ) -> Result<NavigationOutcome, CoreError> {
        let requested = Location::parse(raw)?;
        self.history.push(self.location.clone());
        Ok(self.go(requested, state, now, reflow))
    }

    /// Pops the history stack. `None` when there is nowhere to go back to.
    pub fn back(
        &mut self,
        state: &AppState,
        now: Instant,
        reflow: &mut dyn Reflow,
    ) -> Option<NavigationOutcome> {
        let previous = self.history.pop()?;
        Some(self.go(previous, state, now, reflow))
    }

    fn go(
        &mut self,
        requested: Location,
        state: &AppState,
        now: Instant,
        reflow: &mut dyn Reflow,
    ) -> NavigationOutcome {
        match guard(&requested, state) {
            Ok(screen) => {
                info!(path = %requested, screen = screen.as_str(), "navigate");
                let changes = self.show(requested.clone(), now, reflow);
                self.pending.extend(changes);
                NavigationOutcome::Shown {
                    location: requested,
                    screen,
                }
            }
            Err(reason) => {
                info!(path = %requested, ?reason, "redirecting to root");
                let location = Location::root();
                let changes = self.show(location.clone(), now, reflow);
                self.pending.extend(changes);
                NavigationOutcome::Redirected {
                    requested,
                    location,
                    reason,
                }
            }
        }
    }

    fn show(&mut self, location: Location, now: Instant, reflow: &mut dyn Reflow) -> Vec<PhaseChange> {
        let Some(matched) = location.screen() else {
            return Vec::new();
        };
        let screen = matched.target;
        self.indices.advance(matched.index);
        let key = location.top_level_key().to_string();
        debug!(
            key = %key,
            direction = self.indices.resolve(true).sign(),
            "screen direction resolved"
        );

        let mut changes = Vec::new();
        if screen == Screen::Booking {
            if !self.screens.contains(&key) {
                self.wizard.reset();
            }
            changes.extend(self.wizard.sync(&location, now, reflow).unwrap_or_default());
        }

        changes.extend(self.screens.sync(
            std::slice::from_ref(&key),
            now,
            reflow,
            |_| ScreenSlot {
                screen,
                location: location.clone(),
                scroll: (screen != Screen::Booking).then(ScrollRestore::new),
            },
        ));
        if let Some(child) = self.screens.get_mut(&key) {
            child.payload.location = location.clone();
        }

        changes.extend(self.globe.set_in(location.shows_globe(), now, reflow));
        changes.extend(self.header.set_in(location.mentions_booking(), now, reflow));
        self.location = location;
        changes
    }

    /// Re-evaluates the chrome that follows store flags, and re-checks the
    /// current location against the new state. A failed check replaces the
    /// location with `/` without touching history; the outcome is kept for
    /// [`Self::take_redirect`].
    pub fn sync_state(
        &mut self,
        state: &AppState,
        now: Instant,
        reflow: &mut dyn Reflow,
    ) -> Vec<PhaseChange> {
        let mut changes: Vec<PhaseChange> =
            self.menu.set_in(state.menu_open, now, reflow).into_iter().collect();
        if let Err(reason) = guard(&self.location, state) {
            let requested = self.location.clone();
            info!(path = %requested, ?reason, "location lost its upstream state");
            let location = Location::root();
            changes.extend(self.show(location.clone(), now, reflow));
            self.redirect = Some(NavigationOutcome::Redirected {
                requested,
                location,
                reason,
            });
        }
        changes
    }

    /// The redirect forced by the last [`Self::sync_state`], if any.
    pub fn take_redirect(&mut self) -> Option<NavigationOutcome> {
        self.redirect.take()
    }

    /// Advances every primitive whose deadline has passed, then runs the
    /// per-screen scroll restoration effects.
    pub fn tick(&mut self, store: &mut Store, now: Instant) -> Vec<PhaseChange> {
        let mut changes = std::mem::take(&mut self.pending);
        changes.extend(self.screens.poll(now));
        changes.extend(self.globe.poll(now));
        changes.extend(self.header.poll(now));
        changes.extend(self.menu.poll(now));
        changes.extend(self.wizard.poll(now, store));
        for child in self.screens.children_mut() {
            let phase = child.transition.phase();
            if let Some(scroll) = child.payload.scroll.as_mut() {
                scroll.observe(phase, store);
            }
        }
        changes
    }

    pub fn frame(&self, state: &AppState, now: Instant) -> Frame {
        let screens = self
            .screens
            .contexts(now, |child| self.indices.resolve(child.is_entering_side()))
            .into_iter()
            .map(|(child, context)| ScreenLayer {
                key: child.key.clone(),
                screen: child.payload.screen,
                location: child.payload.location.clone(),
                context,
            })
            .collect();

        let wizard = self
            .screens
            .children()
            .iter()
            .find(|child| child.payload.screen == Screen::Booking)
            .map(|child| self.wizard.frame(&child.payload.location, now));

        Frame {
            location: self.location.clone(),
            theme: state.theme,
            scrolled: state.scrolled,
            screens,
            globe: self
                .globe
                .is_mounted()
                .then(|| ChromeLayer::from_transition(&self.globe, Direction::Forward, now)),
            globe_collapsed: self.location.inside_booking(),
            scrim_visible: self.location.inside_booking(),
            header: ChromeLayer::from_transition(&self.header, Direction::Forward, now),
            menu: ChromeLayer::from_transition(&self.menu, Direction::Forward, now),
            wizard,
        }
    }
}

#[cfg(test)]
#[path = "tests/orchestrator_tests.rs"]
mod tests;
