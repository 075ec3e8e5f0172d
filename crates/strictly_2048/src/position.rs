//! Cell coordinates and unit step vectors.

use derive_new::new;
use serde::{Deserialize, Serialize};

/// A cell coordinate on the grid.
///
/// `x` grows to the right, `y` grows downward. Row-major order visits
/// `(0, 0), (1, 0), ...` before moving to the next row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Position {
    /// Column index.
    pub x: usize,
    /// Row index.
    pub y: usize,
}

impl Position {
    /// Steps one cell along `vector`.
    ///
    /// Returns `None` when the step would leave the low edge of the grid.
    /// The high edge depends on the grid size, so callers check it with
    /// [`Grid::within_bounds`](crate::Grid::within_bounds).
    pub fn step(self, vector: Vector) -> Option<Position> {
        Some(Position {
            x: self.x.checked_add_signed(vector.x)?,
            y: self.y.checked_add_signed(vector.y)?,
        })
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Unit offset applied once per step while a tile slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, new)]
pub struct Vector {
    /// Horizontal component (-1, 0 or 1).
    pub x: isize,
    /// Vertical component (-1, 0 or 1).
    pub y: isize,
}
