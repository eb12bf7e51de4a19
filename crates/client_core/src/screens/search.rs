use serde::{Deserialize, Serialize};
use shared::format::{format_optional_date_short, plural};

use crate::store::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchDetailsView {
    /// `"<from>—<to>"`
    pub destination: String,
    /// `"<dep>[—<ret>], N passenger(s)"`
    pub options: String,
    /// Slides up to sit under the collapsed header while the page is scrolled.
    pub raised: bool,
}

pub fn search_details_view(state: &AppState) -> SearchDetailsView {
    let details = &state.booking_details;
    let dates = if details.one_way {
        format_optional_date_short(details.departure_date)
    } else {
        format!(
            "{}—{}",
            format_optional_date_short(details.departure_date),
            format_optional_date_short(details.return_date)
        )
    };
    SearchDetailsView {
        destination: format!("{}—{}", details.from, details.to),
        options: format!(
            "{dates}, {}",
            plural("passenger", usize::from(details.passengers))
        ),
        raised: state.scrolled,
    }
}
