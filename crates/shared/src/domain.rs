use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(FlightId);
id_newtype!(PassengerId);

impl PassengerId {
    pub fn generate() -> Self {
        Self(format!("passenger-{}", Uuid::new_v4()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardStub {
    /// Last four digits only.
    pub number: String,
    pub expiry: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub card: CardStub,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A contact the primary user can invite onto the booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seat: Option<String>,
}

impl ShareUser {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub airport: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightEndpoint {
    pub city: String,
    pub airport: String,
    pub time: String,
    /// Short display date, filled in once the flight is matched to a booking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    pub id: FlightId,
    /// Whole AUD per passenger.
    pub price: u32,
    pub stops: u8,
    pub from: FlightEndpoint,
    pub to: FlightEndpoint,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerStub {
    pub id: PassengerId,
    pub email: String,
}

impl PassengerStub {
    pub fn blank() -> Self {
        Self {
            id: PassengerId::generate(),
            email: String::new(),
        }
    }
}

pub const DEFAULT_ORIGIN: &str = "Sydney";
pub const ANYWHERE: &str = "Anywhere";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetails {
    pub from: String,
    pub to: String,
    pub one_way: bool,
    pub departure_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub passengers: u8,
}

impl Default for BookingDetails {
    fn default() -> Self {
        Self {
            from: DEFAULT_ORIGIN.to_string(),
            to: ANYWHERE.to_string(),
            one_way: false,
            departure_date: None,
            return_date: None,
            passengers: 1,
        }
    }
}

/// Fields of the booking details form that carry their own inline error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BookingField {
    From,
    To,
    OneWay,
    DepartureDate,
    ReturnDate,
    Passengers,
}

impl BookingField {
    pub fn error_message(self) -> &'static str {
        match self {
            BookingField::From => "Please enter a location",
            BookingField::DepartureDate | BookingField::ReturnDate => "Select a date",
            BookingField::To | BookingField::OneWay | BookingField::Passengers => "Invalid value",
        }
    }
}
