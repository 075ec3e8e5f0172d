//! Direction-dependent cell visiting order.
//!
//! Tiles nearest the edge they travel toward must settle first, otherwise
//! a tile could slide past a neighbour that has not moved yet.

use super::action::Direction;
use super::position::{Position, Vector};
use tracing::instrument;

/// Axis orders and step vector for one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Traversal {
    /// Column visiting order.
    pub xs: Vec<usize>,
    /// Row visiting order.
    pub ys: Vec<usize>,
    /// Step applied while sliding.
    pub vector: Vector,
}

impl Traversal {
    /// Builds the traversal for `direction` on a `size × size` grid.
    ///
    /// RIGHT visits columns from the last one back, DOWN visits rows from
    /// the last one back; UP and LEFT use natural order.
    #[instrument]
    pub fn new(direction: Direction, size: usize) -> Self {
        let vector = direction.vector();
        let mut xs: Vec<usize> = (0..size).collect();
        let mut ys: Vec<usize> = (0..size).collect();

        if vector.x == 1 {
            xs.reverse();
        }
        if vector.y == 1 {
            ys.reverse();
        }

        Self { xs, ys, vector }
    }

    /// Cells in visiting order, column-major over `xs` then `ys`.
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.xs
            .iter()
            .flat_map(move |&x| self.ys.iter().map(move |&y| Position::new(x, y)))
    }
}
