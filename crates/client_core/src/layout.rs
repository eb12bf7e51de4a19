//! Two-phase "measure after layout, then reposition" state.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Measurement {
    #[default]
    Unmeasured,
    Measured {
        height: f32,
    },
    Positioned {
        height: f32,
        offset: f32,
    },
}

impl Measurement {
    /// Records the laid-out height. Any previous position is discarded.
    pub fn measure(&mut self, height: f32) {
        *self = Measurement::Measured {
            height: height.max(0.0),
        };
    }

    /// Ignored until a height is known.
    pub fn position(&mut self, offset: f32) -> bool {
        match *self {
            Measurement::Unmeasured => false,
            Measurement::Measured { height } | Measurement::Positioned { height, .. } => {
                *self = Measurement::Positioned { height, offset };
                true
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Measurement::Unmeasured;
    }

    pub fn height(&self) -> Option<f32> {
        match *self {
            Measurement::Unmeasured => None,
            Measurement::Measured { height } | Measurement::Positioned { height, .. } => {
                Some(height)
            }
        }
    }

    pub fn offset(&self) -> Option<f32> {
        match *self {
            Measurement::Positioned { offset, .. } => Some(offset),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "tests/layout_tests.rs"]
mod tests;
