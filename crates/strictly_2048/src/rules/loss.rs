//! Loss detection logic for 2048.

use super::super::{Direction, Grid, Position, can_move};
use tracing::instrument;

/// Checks whether any two orthogonal neighbours could merge.
#[instrument(skip(grid))]
pub fn tile_matches_available(grid: &Grid) -> bool {
    grid.tiles().any(|tile| {
        [Direction::Right, Direction::Down].into_iter().any(|direction| {
            tile.position()
                .step(direction.vector())
                .and_then(|next: Position| grid.cell_content(next))
                .is_some_and(|other| other.can_merge_with(tile))
        })
    })
}

/// True if at least one direction would change the grid.
#[instrument(skip(grid))]
pub fn moves_available(grid: &Grid) -> bool {
    grid.cells_available() || tile_matches_available(grid)
}

/// Checks if the board is locked: full, with no equal neighbours.
///
/// An empty board is not over; it simply has nothing to move yet.
#[instrument(skip(grid))]
pub fn is_game_over(grid: &Grid) -> bool {
    !moves_available(grid)
}

/// Checks `moves_available` against the resolver's own probe.
///
/// Used by the postcondition in debug builds.
#[cfg_attr(not(debug_assertions), allow(dead_code))]
pub(crate) fn probe_agrees(grid: &Grid) -> bool {
    let probed = Direction::ALL
        .into_iter()
        .any(|direction| can_move(grid, direction));
    grid.tile_count() == 0 || probed == moves_available(grid)
}
