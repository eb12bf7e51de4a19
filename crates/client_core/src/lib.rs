//! Headless transition choreography for the flight booking front-end: the
//! store, route tables, phase primitives, orchestrators and screen
//! view-models. Renderers only read [`frame::Frame`] snapshots and call
//! [`app::BookingApp`] operations.

pub mod app;
pub mod clock;
pub mod config;
pub mod direction;
pub mod error;
pub mod frame;
pub mod group;
pub mod layout;
pub mod orchestrator;
pub mod routes;
pub mod screens;
pub mod scroll;
pub mod store;
pub mod transition;
pub mod wizard;

pub use app::BookingApp;
pub use clock::{Clock, ManualClock, WallClock};
pub use config::{load_settings, Settings, Timings};
pub use direction::Direction;
pub use error::CoreError;
pub use frame::Frame;
pub use orchestrator::{NavigationOutcome, RedirectReason};
pub use routes::{BookingStep, Location, Screen};
pub use store::{Action, AppState, Store};
pub use transition::{Phase, PhaseChange, Reflow, Transition, TransitionConfig};
