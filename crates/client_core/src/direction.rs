use serde::{Deserialize, Serialize};

/// Slide direction of a step change: forward (+1) or backward (-1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    pub fn sign(self) -> i8 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }

    pub fn inverted(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

impl From<Direction> for i8 {
    fn from(value: Direction) -> Self {
        value.sign()
    }
}

impl TryFrom<i8> for Direction {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Direction::Forward),
            -1 => Ok(Direction::Backward),
            other => Err(format!("direction must be 1 or -1, got {other}")),
        }
    }
}

/// Direction for a child of a keyed transition set.
///
/// An entering child follows the index delta; a leaving child takes the
/// opposite sign so the outgoing screen slides away from the incoming one.
/// A missing previous index or an unchanged index counts as a forward move.
pub fn resolve(current: usize, previous: Option<usize>, entering: bool) -> Direction {
    let delta = match previous {
        Some(previous) if current < previous => Direction::Backward,
        _ => Direction::Forward,
    };
    if entering {
        delta
    } else {
        delta.inverted()
    }
}

/// Index pair captured when a navigation happens and held until the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StepIndices {
    pub current: Option<usize>,
    pub previous: Option<usize>,
}

impl StepIndices {
    pub fn advance(&mut self, next: usize) {
        self.previous = self.current;
        self.current = Some(next);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn resolve(&self, entering: bool) -> Direction {
        resolve(self.current.unwrap_or_default(), self.previous, entering)
    }
}

#[cfg(test)]
#[path = "tests/direction_tests.rs"]
mod tests;
