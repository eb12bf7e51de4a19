use serde::{Deserialize, Serialize};

use crate::{routes::BookingStep, store::AppState};

pub const CALL_TO_ACTION: &str = "Book a flight";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandingView {
    /// Heading words, staggered in order.
    pub greeting: Vec<String>,
    pub call_to_action: String,
    pub call_to_action_route: String,
}

pub fn landing_view(state: &AppState) -> LandingView {
    LandingView {
        greeting: vec![
            "Welcome".to_string(),
            "back,".to_string(),
            state.user.first_name.clone(),
        ],
        call_to_action: CALL_TO_ACTION.to_string(),
        call_to_action_route: BookingStep::Details.path().to_string(),
    }
}
