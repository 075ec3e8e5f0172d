//! Tile position invariant: a tile's coordinates match its cell.

use super::super::Grid;
use super::Invariant;

/// Invariant: every tile's `x, y` equals the coordinates of the cell holding it.
pub struct TilePositionInvariant;

impl Invariant<Grid> for TilePositionInvariant {
    fn holds(grid: &Grid) -> bool {
        let mut consistent = true;
        grid.each_cell(|position, tile| {
            if let Some(tile) = tile
                && tile.position() != position
            {
                consistent = false;
            }
        });
        consistent
    }

    fn description() -> &'static str {
        "Each tile's coordinates match the cell that holds it"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Position, Tile, TileId};

    #[test]
    fn test_spawned_tiles_hold() {
        let grid = Grid::from_values(3, &[2, 0, 4, 0, 8]);
        assert!(TilePositionInvariant::holds(&grid));
    }

    #[test]
    fn test_misplaced_tile_violates() {
        let mut grid = Grid::new(3);
        grid.force_cell(
            Position::new(0, 0),
            Some(Tile::new(TileId(0), Position::new(1, 0), Some(2))),
        );
        assert!(!TilePositionInvariant::holds(&grid));
    }
}
