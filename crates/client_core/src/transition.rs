//! Four-phase mount/animate lifecycle driven by a boolean "present" flag.
//!
//! ```text
//!   exited ──show──► entering ──timeout──► entered
//!     ▲                 │  ▲                  │
//!     │               hide show              hide
//!     │                 ▼  │                  │
//!     └────timeout──── exiting ◄──────────────┘
//! ```
//!
//! A primitive owns at most one pending deadline. Any flip of the target
//! replaces it, so a re-trigger inside one timeout window never leaves two
//! advances queued for the same element.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::direction::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Entering,
    Entered,
    Exiting,
    Exited,
}

impl Phase {
    pub fn is_visible(self) -> bool {
        matches!(self, Phase::Entering | Phase::Entered)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Entering => "entering",
            Phase::Entered => "entered",
            Phase::Exiting => "exiting",
            Phase::Exited => "exited",
        }
    }
}

/// Forces the renderer to lay out pre-transition styles before entering styles apply.
pub trait Reflow {
    fn reflow(&mut self, key: &str);
}

impl<F> Reflow for F
where
    F: FnMut(&str),
{
    fn reflow(&mut self, key: &str) {
        self(key)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoReflow;

impl Reflow for NoReflow {
    fn reflow(&mut self, _key: &str) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionConfig {
    pub timeout: Duration,
    /// Stay unmounted until the first entry.
    pub mount_on_enter: bool,
    /// Unmount once `exited` is reached.
    pub unmount_on_exit: bool,
}

impl TransitionConfig {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            mount_on_enter: false,
            unmount_on_exit: false,
        }
    }

    pub fn lazy(timeout: Duration) -> Self {
        Self {
            timeout,
            mount_on_enter: true,
            unmount_on_exit: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseChange {
    pub key: String,
    pub from: Phase,
    pub to: Phase,
}

/// What a consumer needs to pick its visual state for the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionContext {
    pub phase: Phase,
    pub direction: Direction,
    /// 0.0 fully out, 1.0 fully in.
    pub visibility: f32,
}

impl TransitionContext {
    /// Horizontal slide offset as a fraction of the container width.
    pub fn slide_fraction(&self) -> f32 {
        (1.0 - self.visibility) * f32::from(self.direction.sign())
    }

    pub fn is_interactive(&self) -> bool {
        self.phase == Phase::Entered
    }
}

#[derive(Debug, Clone)]
pub struct Transition {
    key: String,
    config: TransitionConfig,
    target: bool,
    phase: Phase,
    mounted: bool,
    phase_started: Option<Instant>,
    start_visibility: f32,
    deadline: Option<Instant>,
}

impl Transition {
    /// Starts `exited`; the first `set_in(true)` moves it to `entering`.
    pub fn new(key: impl Into<String>, config: TransitionConfig) -> Self {
        Self {
            key: key.into(),
            config,
            target: false,
            phase: Phase::Exited,
            mounted: !config.mount_on_enter,
            phase_started: None,
            start_visibility: 0.0,
            deadline: None,
        }
    }

    /// Builds a primitive and applies the initial target in one step.
    pub fn with_initial(
        key: impl Into<String>,
        present: bool,
        config: TransitionConfig,
        now: Instant,
        reflow: &mut dyn Reflow,
    ) -> Self {
        let mut transition = Self::new(key, config);
        transition.set_in(present, now, reflow);
        transition
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn target(&self) -> bool {
        self.target
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_settled(&self) -> bool {
        self.deadline.is_none()
    }

    pub fn set_in(
        &mut self,
        present: bool,
        now: Instant,
        reflow: &mut dyn Reflow,
    ) -> Option<PhaseChange> {
        self.target = present;
        match (present, self.phase) {
            (true, Phase::Exited | Phase::Exiting) => Some(self.enter(now, reflow)),
            (false, Phase::Entering | Phase::Entered) => Some(self.exit(now)),
            _ => None,
        }
    }

    /// Fires the pending deadline if it has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<PhaseChange> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        self.deadline = None;
        let next = match self.phase {
            Phase::Entering => Phase::Entered,
            Phase::Exiting => Phase::Exited,
            Phase::Entered | Phase::Exited => return None,
        };
        if next == Phase::Exited && self.config.unmount_on_exit {
            self.mounted = false;
        }
        Some(self.advance_to(next, now))
    }

    pub fn visibility(&self, now: Instant) -> f32 {
        let t = self.progress(now);
        match self.phase {
            Phase::Entering => self.start_visibility + (1.0 - self.start_visibility) * t,
            Phase::Entered => 1.0,
            Phase::Exiting => self.start_visibility * (1.0 - t),
            Phase::Exited => 0.0,
        }
    }

    pub fn context(&self, direction: Direction, now: Instant) -> TransitionContext {
        TransitionContext {
            phase: self.phase,
            direction,
            visibility: self.visibility(now),
        }
    }

    fn progress(&self, now: Instant) -> f32 {
        let Some(started) = self.phase_started else {
            return 1.0;
        };
        if self.config.timeout.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(started).as_secs_f32();
        (elapsed / self.config.timeout.as_secs_f32()).clamp(0.0, 1.0)
    }

    fn enter(&mut self, now: Instant, reflow: &mut dyn Reflow) -> PhaseChange {
        self.start_visibility = self.visibility(now);
        self.mounted = true;
        reflow.reflow(&self.key);
        self.deadline = Some(now + self.config.timeout);
        self.advance_to(Phase::Entering, now)
    }

    fn exit(&mut self, now: Instant) -> PhaseChange {
        self.start_visibility = self.visibility(now);
        self.deadline = Some(now + self.config.timeout);
        self.advance_to(Phase::Exiting, now)
    }

    fn advance_to(&mut self, next: Phase, now: Instant) -> PhaseChange {
        let from = self.phase;
        self.phase = next;
        self.phase_started = Some(now);
        debug!(key = %self.key, from = from.as_str(), to = next.as_str(), "phase change");
        PhaseChange {
            key: self.key.clone(),
            from,
            to: next,
        }
    }
}

#[cfg(test)]
#[path = "tests/transition_tests.rs"]
mod tests;
