//! Shared `scrolled` flag bookkeeping.
//!
//! The scroll container is reused across routes, so each routed screen
//! clears the flag the moment it finishes entering. Scroll events from any
//! screen set it whenever the offset passes the threshold.

use crate::{
    store::{Action, Store},
    transition::Phase,
};

pub const DEFAULT_SCROLL_THRESHOLD_PX: f32 = 20.0;

pub fn handle_scroll(store: &mut Store, scroll_top: f32, threshold: f32) -> bool {
    store.dispatch(Action::SetScrolled(scroll_top > threshold))
}

/// Per-screen effect keyed on the screen's phase: runs once each time the
/// observed phase changes to `entered`.
#[derive(Debug, Clone, Default)]
pub struct ScrollRestore {
    last_phase: Option<Phase>,
}

impl ScrollRestore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the reset fired on this observation.
    pub fn observe(&mut self, phase: Phase, store: &mut Store) -> bool {
        if self.last_phase == Some(phase) {
            return false;
        }
        self.last_phase = Some(phase);
        if phase == Phase::Entered {
            store.dispatch(Action::SetScrolled(false));
            return true;
        }
        false
    }
}

#[cfg(test)]
#[path = "tests/scroll_tests.rs"]
mod tests;
