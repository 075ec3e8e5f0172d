//! First-class move intents for 2048.
//!
//! A direction is the only input a turn takes. It is validated before
//! the grid is touched, so a rejected request never leaves a partial
//! board behind.

use super::position::Vector;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};
use tracing::instrument;

/// A direction to slide every tile on the board.
///
/// Discriminants match the canonical wire values (UP=0, RIGHT=1, DOWN=2,
/// LEFT=3) so input collaborators can hand over a raw `u8`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[strum(serialize_all = "UPPERCASE")]
#[repr(u8)]
pub enum Direction {
    /// Toward row 0.
    Up = 0,
    /// Toward the last column.
    Right = 1,
    /// Toward the last row.
    Down = 2,
    /// Toward column 0.
    Left = 3,
}

impl Direction {
    /// All four directions in canonical order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Returns the unit vector a tile travels along for this direction.
    pub fn vector(self) -> Vector {
        match self {
            Direction::Up => Vector::new(0, -1),
            Direction::Right => Vector::new(1, 0),
            Direction::Down => Vector::new(0, 1),
            Direction::Left => Vector::new(-1, 0),
        }
    }

    /// Returns the canonical wire value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Direction {
    type Error = MoveError;

    #[instrument]
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Direction::Up),
            1 => Ok(Direction::Right),
            2 => Ok(Direction::Down),
            3 => Ok(Direction::Left),
            other => Err(MoveError::InvalidDirection(other)),
        }
    }
}

/// Error that can occur when validating or applying a move.
///
/// A direction that changes nothing is not an error; it comes back as a
/// [`Turn`](crate::Turn) with `moved == false`.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The raw direction value is outside the four canonical values.
    #[display("Invalid direction value {}", _0)]
    InvalidDirection(u8),

    /// No game has been started yet.
    #[display("Game has not started")]
    NotStarted,

    /// No legal move remains.
    #[display("Game is already over")]
    GameOver,

    /// The winning tile was reached and the caller has not chosen to keep playing.
    #[display("Game is won; call keep_playing to continue")]
    AwaitingContinue,

    /// A random spawn was requested with no empty cell left.
    #[display("No empty cell available for a new tile")]
    GridExhausted,

    /// An invariant was violated (pre- or postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}
