//! Unique id invariant: no two tiles share an id.

use super::super::Grid;
use super::Invariant;
use std::collections::HashSet;

/// Invariant: tile ids are unique within the grid.
pub struct UniqueIdInvariant;

impl Invariant<Grid> for UniqueIdInvariant {
    fn holds(grid: &Grid) -> bool {
        let mut seen = HashSet::new();
        grid.tiles().all(|tile| seen.insert(tile.id()))
    }

    fn description() -> &'static str {
        "Tile ids are unique within the grid"
    }
}
