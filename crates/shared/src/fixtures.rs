//! Static fixture data. Always complete, always synchronous.

use crate::domain::{
    CardStub, Flight, FlightEndpoint, FlightId, Location, ShareUser, User,
};

pub fn user() -> User {
    User {
        first_name: "Charlie".into(),
        last_name: "Irwin".into(),
        email: "charlie.irwin@sickvfx.com".into(),
        card: CardStub {
            number: "4096".into(),
            expiry: "07/21".into(),
        },
    }
}

pub fn share_users() -> Vec<ShareUser> {
    [
        ("nicolina.lindholm@sickvfx.com", "Nicolina", "Lindholm", "32C"),
        ("jimmy.mcjimson@sickvfx.com", "Jimmy", "McJimson", ""),
        ("john.davidson@sickvfx.com", "John", "Davidson", "61E"),
        ("serana.jones@sickvfx.com", "Serana", "Jones", "68A"),
        ("andy.mckenty@sickvfx.com", "Andy", "McKenty", ""),
    ]
    .into_iter()
    .map(|(email, first_name, last_name, seat)| ShareUser {
        email: email.into(),
        first_name: first_name.into(),
        last_name: last_name.into(),
        seat: (!seat.is_empty()).then(|| seat.to_string()),
    })
    .collect()
}

pub fn locations() -> Vec<Location> {
    [
        ("Sydney", "SYD", "Australia"),
        ("Melbourne", "MEL", "Australia"),
        ("Brisbane", "BNE", "Australia"),
        ("Auckland", "AKL", "New Zealand"),
        ("San Francisco", "SFO", "United States"),
        ("Los Angeles", "LAX", "United States"),
        ("New York", "JFK", "United States"),
        ("Tokyo", "HND", "Japan"),
        ("Singapore", "SIN", "Singapore"),
        ("London", "LHR", "United Kingdom"),
    ]
    .into_iter()
    .map(|(city, airport, country)| Location {
        city: city.into(),
        airport: airport.into(),
        country: country.into(),
    })
    .collect()
}

pub fn find_location(city: &str) -> Option<Location> {
    locations()
        .into_iter()
        .find(|location| location.city.eq_ignore_ascii_case(city))
}

/// Case-insensitive prefix match on city names, used for autocomplete suggestions.
pub fn suggest_locations(query: &str) -> Vec<Location> {
    let query = query.trim().to_ascii_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    locations()
        .into_iter()
        .filter(|location| location.city.to_ascii_lowercase().starts_with(&query))
        .collect()
}

fn flight(id: &str, price: u32, stops: u8, from: (&str, &str, &str), to: (&str, &str, &str)) -> Flight {
    let endpoint = |(city, airport, time): (&str, &str, &str)| FlightEndpoint {
        city: city.into(),
        airport: airport.into(),
        time: time.into(),
        day: None,
    };
    Flight {
        id: FlightId::new(id),
        price,
        stops,
        from: endpoint(from),
        to: endpoint(to),
    }
}

pub fn departures() -> Vec<Flight> {
    const SYD: &str = "Sydney";
    const SFO: &str = "San Francisco";
    vec![
        flight("f1", 477, 0, (SYD, "SYD", "10:30"), (SFO, "SFO", "23:40")),
        flight("f2", 576, 1, (SYD, "SYD", "13:40"), (SFO, "SFO", "12:30")),
        flight("f3", 774, 2, (SYD, "SYD", "15:45"), (SFO, "SFO", "18:27")),
        flight("f4", 891, 0, (SYD, "SYD", "11:50"), (SFO, "SFO", "15:27")),
        flight("f5", 987, 3, (SYD, "SYD", "9:55"), (SFO, "SFO", "15:27")),
    ]
}

pub fn returns() -> Vec<Flight> {
    const SYD: &str = "Sydney";
    const SFO: &str = "San Francisco";
    vec![
        flight("r1", 564, 1, (SFO, "SFO", "23:40"), (SYD, "SYD", "8:27")),
        flight("r2", 670, 0, (SFO, "SFO", "17:00"), (SYD, "SYD", "10:30")),
        flight("r3", 887, 2, (SFO, "SFO", "19:40"), (SYD, "SYD", "8:40")),
        flight("r4", 1024, 0, (SFO, "SFO", "23:40"), (SYD, "SYD", "10:30")),
    ]
}

pub fn find_flight(id: &FlightId) -> Option<Flight> {
    departures()
        .into_iter()
        .chain(returns())
        .find(|flight| &flight.id == id)
}
