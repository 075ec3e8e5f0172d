//! Plain-data view of a session for presentation and persistence.

use super::game::{Game, Phase};
use super::tile::Tile;
use serde::{Deserialize, Serialize};

/// Everything a renderer or a save file needs, with no behavior attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Side length of the grid.
    pub grid_size: usize,
    /// Tile values by row, `0` for empty cells.
    pub rows: Vec<Vec<u32>>,
    /// Tiles with their previous positions and merge lineage.
    pub tiles: Vec<Tile>,
    /// Current score.
    pub score: u64,
    /// Turns that changed the grid.
    pub turns: u64,
    /// Highest tile value on the board.
    pub highest_tile: u32,
    /// True once the winning value has been reached.
    pub won: bool,
    /// True once no move remains.
    pub over: bool,
    /// True if play continues past a win.
    pub keep_playing: bool,
    /// Phase at the time of the snapshot.
    pub phase: Phase,
}

impl<R> From<&Game<R>> for GameSnapshot {
    fn from(game: &Game<R>) -> Self {
        let grid = game.grid();
        Self {
            grid_size: grid.size(),
            rows: grid.rows(),
            tiles: grid.tiles().cloned().collect(),
            score: game.score(),
            turns: game.turns(),
            highest_tile: grid.highest_tile(),
            won: game.won(),
            over: game.over(),
            keep_playing: game.keep_playing_enabled(),
            phase: game.phase(),
        }
    }
}

impl GameSnapshot {
    /// One-line summary, e.g. `Score: 4 | Turns: 1 | Best: 4 | Playing`.
    pub fn status_string(&self) -> String {
        format!(
            "Score: {} | Turns: {} | Best: {} | {}",
            self.score, self.turns, self.highest_tile, self.phase
        )
    }
}
