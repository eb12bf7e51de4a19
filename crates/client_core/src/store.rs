//! Single application store with a closed action vocabulary.
//!
//! State is replaced wholesale on every effective dispatch and handed out as
//! an `Arc`, so readers can compare snapshots by pointer. A dispatch that
//! would not change anything keeps the same `Arc`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared::{
    domain::{BookingDetails, Flight, PassengerStub, Theme, User},
    fixtures,
};
use tracing::debug;

use crate::error::CoreError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub user: User,
    pub theme: Theme,
    pub menu_open: bool,
    pub scrolled: bool,
    pub departure_flight: Option<Flight>,
    pub return_flight: Option<Flight>,
    pub passenger_data: Vec<PassengerStub>,
    pub booking_details: BookingDetails,
}

impl AppState {
    pub fn initial(theme: Theme) -> Self {
        Self {
            user: fixtures::user(),
            theme,
            menu_open: false,
            scrolled: false,
            departure_flight: None,
            return_flight: None,
            passenger_data: Vec::new(),
            booking_details: BookingDetails::default(),
        }
    }

    /// (departure + return unless one-way) × passengers, in whole AUD.
    /// Unselected flights count as zero.
    pub fn total_price(&self) -> u64 {
        let departure = self.departure_flight.as_ref().map_or(0, |f| f.price);
        let ret = if self.booking_details.one_way {
            0
        } else {
            self.return_flight.as_ref().map_or(0, |f| f.price)
        };
        u64::from(departure + ret) * u64::from(self.booking_details.passengers)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::initial(Theme::default())
    }
}

const ACTION_KINDS: &[&str] = &[
    "setMenuOpen",
    "setBookingDetails",
    "setDepartureFlight",
    "setReturnFlight",
    "setScrolled",
    "setPassengerData",
    "toggleTheme",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Action {
    SetMenuOpen(bool),
    SetBookingDetails(BookingDetails),
    SetDepartureFlight(Option<Flight>),
    SetReturnFlight(Option<Flight>),
    SetScrolled(bool),
    SetPassengerData(Vec<PassengerStub>),
    /// `None` flips the theme; `Some` sets it.
    ToggleTheme(Option<Theme>),
}

impl Action {
    pub fn kind(&self) -> &'static str {
        match self {
            Action::SetMenuOpen(_) => "setMenuOpen",
            Action::SetBookingDetails(_) => "setBookingDetails",
            Action::SetDepartureFlight(_) => "setDepartureFlight",
            Action::SetReturnFlight(_) => "setReturnFlight",
            Action::SetScrolled(_) => "setScrolled",
            Action::SetPassengerData(_) => "setPassengerData",
            Action::ToggleTheme(_) => "toggleTheme",
        }
    }

    /// Parses a raw `{"type": ..., "value": ...}` action. Kinds outside the
    /// vocabulary are rejected before payload decoding.
    pub fn from_json(raw: &str) -> Result<Self, CoreError> {
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(CoreError::MalformedAction)?;
        let kind = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default();
        if !ACTION_KINDS.contains(&kind) {
            return Err(CoreError::UnknownAction(kind.to_string()));
        }
        serde_json::from_value(value).map_err(CoreError::MalformedAction)
    }
}

/// Returns `None` when the action leaves the state untouched.
pub fn reduce(state: &AppState, action: Action) -> Option<AppState> {
    match action {
        Action::SetMenuOpen(value) => Some(AppState {
            menu_open: value,
            ..state.clone()
        }),
        Action::SetBookingDetails(value) => Some(AppState {
            booking_details: value,
            ..state.clone()
        }),
        Action::SetDepartureFlight(value) => Some(AppState {
            departure_flight: value,
            ..state.clone()
        }),
        Action::SetReturnFlight(value) => Some(AppState {
            return_flight: value,
            ..state.clone()
        }),
        Action::SetScrolled(value) => (value != state.scrolled).then(|| AppState {
            scrolled: value,
            ..state.clone()
        }),
        Action::SetPassengerData(value) => {
            let passengers = u8::try_from(value.len() + 1).unwrap_or(u8::MAX);
            Some(AppState {
                booking_details: BookingDetails {
                    passengers,
                    ..state.booking_details.clone()
                },
                passenger_data: value,
                ..state.clone()
            })
        }
        Action::ToggleTheme(value) => Some(AppState {
            theme: value.unwrap_or_else(|| state.theme.toggled()),
            ..state.clone()
        }),
    }
}

#[derive(Debug, Clone)]
pub struct Store {
    state: Arc<AppState>,
    revision: u64,
}

impl Store {
    pub fn new(initial: AppState) -> Self {
        Self {
            state: Arc::new(initial),
            revision: 0,
        }
    }

    pub fn state(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    pub fn get(&self) -> &AppState {
        &self.state
    }

    /// Bumped on every effective dispatch.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Applies the action atomically. Returns whether the state changed.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let kind = action.kind();
        match reduce(&self.state, action) {
            Some(next) => {
                self.state = Arc::new(next);
                self.revision += 1;
                debug!(action = kind, revision = self.revision, "dispatch applied");
                true
            }
            None => {
                debug!(action = kind, "dispatch suppressed; state unchanged");
                false
            }
        }
    }

    pub fn dispatch_json(&mut self, raw: &str) -> Result<bool, CoreError> {
        Ok(self.dispatch(Action::from_json(raw)?))
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
