//! UI layer for the booking app: window shell, screens, motion and theme.

pub mod app;
pub mod motion;
pub mod screens;
pub mod theme;

pub use app::{FlightpathApp, PersistedGuiSettings, SETTINGS_STORAGE_KEY};
