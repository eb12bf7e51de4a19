//! Serializable snapshot of everything a renderer needs for one paint.

use serde::{Deserialize, Serialize};
use shared::domain::Theme;

use crate::{
    direction::Direction,
    routes::{BookingStep, Location, Screen},
    transition::{Transition, TransitionContext},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenLayer {
    pub key: String,
    pub screen: Screen,
    /// The location this layer renders; an exiting layer keeps its old one.
    pub location: Location,
    pub context: TransitionContext,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepLayer {
    pub key: String,
    pub step: BookingStep,
    pub location: Location,
    pub context: TransitionContext,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChromeLayer {
    pub key: String,
    pub mounted: bool,
    pub context: TransitionContext,
}

impl ChromeLayer {
    pub fn from_transition(
        transition: &Transition,
        direction: Direction,
        now: std::time::Instant,
    ) -> Self {
        Self {
            key: transition.key().to_string(),
            mounted: transition.is_mounted(),
            context: transition.context(direction, now),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardFrame {
    /// Slide direction of the whole booking container when it leaves or enters.
    pub container_direction: Direction,
    pub steps: Vec<StepLayer>,
    pub search_details: Vec<ChromeLayer>,
    pub summary: Option<ChromeLayer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub location: Location,
    pub theme: Theme,
    pub scrolled: bool,
    pub screens: Vec<ScreenLayer>,
    pub globe: Option<ChromeLayer>,
    pub globe_collapsed: bool,
    pub scrim_visible: bool,
    pub header: ChromeLayer,
    pub menu: ChromeLayer,
    pub wizard: Option<WizardFrame>,
}

impl Frame {
    pub fn screen_layer(&self, screen: Screen) -> Option<&ScreenLayer> {
        self.screens.iter().find(|layer| layer.screen == screen)
    }
}
