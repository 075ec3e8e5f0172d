//! Game rules for 2048.
//!
//! Pure functions over a [`Grid`](crate::Grid) that decide whether a
//! session is won or lost. They never mutate the board.

pub mod loss;
pub mod win;

pub use loss::{is_game_over, moves_available, tile_matches_available};
pub use win::reached_target;
