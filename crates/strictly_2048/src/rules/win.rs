//! Win detection logic for 2048.

use super::super::Grid;
use tracing::instrument;

/// Checks whether any tile has reached `winning_value`.
///
/// The resolver flags the turn a winning merge happens; this check is for
/// boards handed over from outside, such as a session built with
/// [`Game::with_grid`](crate::Game::with_grid).
#[instrument(skip(grid))]
pub fn reached_target(grid: &Grid, winning_value: u32) -> bool {
    grid.tiles().any(|tile| tile.value() >= winning_value)
}
