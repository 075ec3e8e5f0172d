//! Strictly 2048 - a contract-checked 2048 engine
//!
//! The library models one game session: a square grid of numbered tiles,
//! a move resolver that slides and merges them, and a state machine that
//! spawns tiles, keeps score and detects wins and losses.
//!
//! # Architecture
//!
//! - **Grid**: owned tiles in a fixed square, with a session-unique id counter
//! - **Resolver**: one parameterized slide-and-merge pass for all four directions
//! - **Game**: the `Ready → Playing → {Won, Over}` state machine
//! - **Contracts**: preconditions always, postconditions in debug builds
//!
//! # Example
//!
//! ```
//! use strictly_2048::{Direction, Game, GameConfig, Phase};
//!
//! # fn example() -> anyhow::Result<()> {
//! let mut game = Game::seeded(GameConfig::default(), 7)?;
//! game.new_game()?;
//! let turn = game.make_move(Direction::Left)?;
//! if turn.moved {
//!     assert!(turn.spawned.is_some());
//! }
//! assert_eq!(game.phase(), Phase::Playing);
//! println!("{}", game.grid());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod config;
mod contracts;
mod game;
mod grid;
mod position;
mod resolver;
mod snapshot;
mod spawn;
mod tile;
mod traversal;

pub mod invariants;
pub mod rules;

// Crate-level exports - Moves and errors
pub use action::{Direction, MoveError};

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Contracts
pub use contracts::{AcceptsMoves, Contract, ScoreMonotonic, SlideContract, TileSumConserved};

// Crate-level exports - Session
pub use game::{Game, Phase, Turn};
pub use snapshot::GameSnapshot;

// Crate-level exports - Board
pub use grid::Grid;
pub use position::{Position, Vector};
pub use tile::{DEFAULT_TILE_VALUE, MergeSource, Tile, TileId};

// Crate-level exports - Algorithms
pub use resolver::{MoveOutcome, Slide, can_move, resolve};
pub use spawn::{add_random_tile, random_tile_value};
pub use traversal::Traversal;
