//! Random tile spawning.
//!
//! All randomness in a session flows through the generator handed in
//! here, so a seeded generator replays a session exactly.

use super::action::MoveError;
use super::grid::Grid;
use super::tile::TileId;
use rand::Rng;
use tracing::{debug, instrument};

/// Draws a spawn value: 2 with probability `two_probability`, else 4.
///
/// `two_probability` is expected to have passed
/// [`GameConfig::validate`](crate::GameConfig::validate). A sample is drawn
/// from `[0, 1)` and compared against it, so no input can panic.
pub fn random_tile_value<R: Rng + ?Sized>(rng: &mut R, two_probability: f64) -> u32 {
    if rng.gen_range(0.0..1.0) < two_probability {
        2
    } else {
        4
    }
}

/// Places one random tile in a uniformly chosen empty cell.
///
/// # Errors
///
/// Returns [`MoveError::GridExhausted`] if the grid has no empty cell.
#[instrument(skip(grid, rng))]
pub fn add_random_tile<R: Rng + ?Sized>(
    grid: &mut Grid,
    rng: &mut R,
    two_probability: f64,
) -> Result<TileId, MoveError> {
    let position = grid
        .random_available_cell(rng)
        .ok_or(MoveError::GridExhausted)?;
    let value = random_tile_value(rng, two_probability);
    let id = grid
        .spawn_tile(position, value)
        .ok_or(MoveError::GridExhausted)?;
    debug!(%id, %position, value, "Spawned tile");
    Ok(id)
}
