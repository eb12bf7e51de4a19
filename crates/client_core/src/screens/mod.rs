//! Per-screen view-models. Each reads the store snapshot and, where the
//! screen animates its own content, owns the primitives for it.

pub mod boarding_pass;
pub mod details;
pub mod flights;
pub mod landing;
pub mod passengers;
pub mod payment;
pub mod search;
pub mod summary;

use serde::{Deserialize, Serialize};

use crate::transition::TransitionContext;

/// One keyed list item or header animating inside a screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemLayer {
    pub key: String,
    pub context: TransitionContext,
}
