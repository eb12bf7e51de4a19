//! Ordered route tables. Lookup is first-match-wins, and the position of the
//! matching entry doubles as the step index fed to direction resolution, so
//! reordering a table changes slide directions as well as rendering.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::CoreError;

const LOCATION_BASE: &str = "app://flightpath/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Landing,
    Booking,
    BoardingPass,
}

impl Screen {
    pub fn as_str(self) -> &'static str {
        match self {
            Screen::Landing => "landing",
            Screen::Booking => "booking",
            Screen::BoardingPass => "boarding_pass",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStep {
    Details,
    Flights,
    Passengers,
    Payment,
}

impl BookingStep {
    pub const ALL: [BookingStep; 4] = [
        BookingStep::Details,
        BookingStep::Flights,
        BookingStep::Passengers,
        BookingStep::Payment,
    ];

    pub fn path(self) -> &'static str {
        match self {
            BookingStep::Details => "/booking",
            BookingStep::Flights => "/booking/flights",
            BookingStep::Passengers => "/booking/passengers",
            BookingStep::Payment => "/booking/payment",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            BookingStep::Details => "Details",
            BookingStep::Flights => "Flights",
            BookingStep::Passengers => "Passengers",
            BookingStep::Payment => "Payment",
        }
    }
}

pub const ROOT_PATH: &str = "/";
pub const BOARDING_PASS_PATH: &str = "/boarding-pass";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPattern {
    Exact(&'static str),
    /// `prefix` followed by exactly one non-empty segment, e.g. `/booking/:step`.
    Param(&'static str),
    /// The path itself or anything nested below it.
    Prefix(&'static str),
}

impl PathPattern {
    pub fn matches(&self, path: &str) -> bool {
        match *self {
            PathPattern::Exact(exact) => path == exact,
            PathPattern::Param(prefix) => path
                .strip_prefix(prefix)
                .is_some_and(|segment| !segment.is_empty() && !segment.contains('/')),
            PathPattern::Prefix(prefix) => {
                path == prefix
                    || path
                        .strip_prefix(prefix)
                        .is_some_and(|rest| rest.starts_with('/'))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEntry<T> {
    pub pattern: PathPattern,
    pub target: T,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteMatch<T> {
    pub index: usize,
    pub target: T,
}

#[derive(Debug, Clone, Copy)]
pub struct RouteTable<T: 'static> {
    entries: &'static [RouteEntry<T>],
}

impl<T: Copy> RouteTable<T> {
    pub const fn new(entries: &'static [RouteEntry<T>]) -> Self {
        Self { entries }
    }

    pub fn resolve(&self, path: &str) -> Option<RouteMatch<T>> {
        self.entries
            .iter()
            .position(|entry| entry.pattern.matches(path))
            .map(|index| RouteMatch {
                index,
                target: self.entries[index].target,
            })
    }

    pub fn entries(&self) -> &'static [RouteEntry<T>] {
        self.entries
    }
}

/// Top-level screens. `/booking` must precede `/booking/:step`.
pub const TOP_LEVEL_ROUTES: RouteTable<Screen> = RouteTable::new(&[
    RouteEntry {
        pattern: PathPattern::Exact(ROOT_PATH),
        target: Screen::Landing,
    },
    RouteEntry {
        pattern: PathPattern::Exact("/booking"),
        target: Screen::Booking,
    },
    RouteEntry {
        pattern: PathPattern::Param("/booking/"),
        target: Screen::Booking,
    },
    RouteEntry {
        pattern: PathPattern::Prefix(BOARDING_PASS_PATH),
        target: Screen::BoardingPass,
    },
]);

/// Booking wizard steps in wizard order.
pub const BOOKING_ROUTES: RouteTable<BookingStep> = RouteTable::new(&[
    RouteEntry {
        pattern: PathPattern::Exact("/booking"),
        target: BookingStep::Details,
    },
    RouteEntry {
        pattern: PathPattern::Exact("/booking/flights"),
        target: BookingStep::Flights,
    },
    RouteEntry {
        pattern: PathPattern::Exact("/booking/passengers"),
        target: BookingStep::Passengers,
    },
    RouteEntry {
        pattern: PathPattern::Exact("/booking/payment"),
        target: BookingStep::Payment,
    },
]);

/// A normalised in-app path: no query, no fragment, no trailing slash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Location {
    path: String,
}

impl Location {
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let invalid = |source| CoreError::InvalidPath {
            path: raw.to_string(),
            source,
        };
        let base = Url::parse(LOCATION_BASE).map_err(invalid)?;
        let url = base.join(raw.trim()).map_err(invalid)?;
        let trimmed = url.path().trim_end_matches('/');
        let path = if trimmed.is_empty() {
            ROOT_PATH.to_string()
        } else {
            trimmed.to_string()
        };
        Ok(Self { path })
    }

    pub fn root() -> Self {
        Self {
            path: ROOT_PATH.to_string(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_root(&self) -> bool {
        self.path == ROOT_PATH
    }

    /// First path segment; every booking step shares the key `booking`.
    pub fn top_level_key(&self) -> &str {
        self.path.trim_start_matches('/').split('/').next().unwrap_or_default()
    }

    pub fn mentions_booking(&self) -> bool {
        self.path.contains("booking")
    }

    /// Globe background is present on the landing screen and anywhere in booking.
    pub fn shows_globe(&self) -> bool {
        self.mentions_booking() || self.is_root()
    }

    pub fn inside_booking(&self) -> bool {
        self.path.contains("/booking")
    }

    pub fn screen(&self) -> Option<RouteMatch<Screen>> {
        TOP_LEVEL_ROUTES.resolve(&self.path)
    }

    pub fn booking_step(&self) -> Option<RouteMatch<BookingStep>> {
        BOOKING_ROUTES.resolve(&self.path)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path)
    }
}

#[cfg(test)]
#[path = "tests/routes_tests.rs"]
mod tests;
