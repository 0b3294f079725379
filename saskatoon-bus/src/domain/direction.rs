//! Trip direction type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned for a direction flag other than 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid direction {0}: must be 0 or 1")]
pub struct InvalidDirection(pub u8);

/// GTFS `direction_id`: which of the two directions of a route a trip runs.
///
/// The flag carries no geographic meaning on its own; it only separates the
/// two buckets of a route.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Direction {
    #[default]
    Zero,
    One,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Zero, Direction::One];

    pub fn from_u8(value: u8) -> Result<Self, InvalidDirection> {
        match value {
            0 => Ok(Direction::Zero),
            1 => Ok(Direction::One),
            other => Err(InvalidDirection(other)),
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            Direction::Zero => 0,
            Direction::One => 1,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

impl TryFrom<u8> for Direction {
    type Error = InvalidDirection;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Direction::from_u8(value)
    }
}

impl From<Direction> for u8 {
    fn from(direction: Direction) -> Self {
        direction.as_u8()
    }
}
