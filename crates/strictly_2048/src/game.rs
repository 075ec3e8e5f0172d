//! Session state machine for 2048.
//!
//! A [`Game`] owns one grid, the score, and the random generator that
//! drives spawns. Phases move `Ready → Playing → {Won, Over}`; a won
//! session returns to `Playing` once the caller opts to keep playing.

use super::action::{Direction, MoveError};
use super::config::{ConfigError, GameConfig};
use super::contracts::AcceptsMoves;
#[cfg(debug_assertions)]
use super::contracts::{Contract, ScoreMonotonic, SlideContract};
use super::grid::Grid;
use super::resolver::{Slide, resolve};
use super::rules::{is_game_over, moves_available, reached_target};
use super::snapshot::GameSnapshot;
use super::spawn::add_random_tile;
use super::tile::TileId;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::{debug, info, instrument, warn};

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
pub enum Phase {
    /// Created but no game started yet.
    #[default]
    Ready,
    /// Accepting moves.
    Playing,
    /// The winning tile exists and the caller has not chosen to continue.
    Won,
    /// No legal move remains.
    Over,
}

/// Report of one accepted move request.
///
/// A turn with `moved == false` is a successful no-op: nothing spawned,
/// the score and turn counter are unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Direction that was applied.
    pub direction: Direction,
    /// True if any tile slid or merged.
    pub moved: bool,
    /// Points gained this turn.
    pub score_delta: u64,
    /// Tiles that slid without merging.
    pub slides: Vec<Slide>,
    /// Tiles created by merges.
    pub merged: Vec<TileId>,
    /// Tile spawned after the move, if the move changed the grid.
    pub spawned: Option<TileId>,
    /// True if this turn created the winning tile.
    pub reached_target: bool,
    /// Phase after the turn.
    pub phase: Phase,
}

/// A 2048 session.
///
/// `R` is the source of all randomness. Seed a [`StdRng`] through
/// [`Game::seeded`] for reproducible sessions.
#[derive(Debug, Clone)]
pub struct Game<R = StdRng> {
    config: GameConfig,
    grid: Grid,
    score: u64,
    won: bool,
    over: bool,
    keep_playing: bool,
    turns: u64,
    phase: Phase,
    rng: R,
}

// ─────────────────────────────────────────────────────────────
//  Constructors
// ─────────────────────────────────────────────────────────────

impl Game<StdRng> {
    /// Creates a session seeded from OS entropy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails [`GameConfig::validate`].
    #[instrument(skip(config))]
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a session with a deterministic generator.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails [`GameConfig::validate`].
    #[instrument(skip(config))]
    pub fn seeded(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Game<R> {
    /// Creates a session in the `Ready` phase with an empty grid.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails [`GameConfig::validate`].
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config
            .validate()
            .inspect_err(|e| warn!(%e, "Rejected game config"))?;
        let grid = Grid::new(*config.grid_size());
        Ok(Self {
            config,
            grid,
            score: 0,
            won: false,
            over: false,
            keep_playing: false,
            turns: 0,
            phase: Phase::Ready,
            rng,
        })
    }

    /// Starts a session from an existing layout.
    ///
    /// The grid is taken as is; its size overrides the configured one.
    /// The phase is derived from the board, so a locked layout starts
    /// `Over` and one already holding the winning tile starts `Won`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration, with the grid's size
    /// substituted, fails [`GameConfig::validate`].
    #[instrument(skip(config, grid, rng), fields(size = grid.size()))]
    pub fn with_grid(config: GameConfig, grid: Grid, rng: R) -> Result<Self, ConfigError> {
        let config = config.with_grid_size(grid.size());
        let mut game = Self::with_rng(config, rng)?;
        game.won = reached_target(&grid, *game.config.winning_value());
        game.over = is_game_over(&grid);
        game.grid = grid;
        game.phase = game.current_phase();
        info!(phase = %game.phase, "Session resumed from grid");
        Ok(game)
    }

    // ─────────────────────────────────────────────────────────────
    //  Session control
    // ─────────────────────────────────────────────────────────────

    /// Clears the board and spawns the starting tiles.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::GridExhausted`] if a starting tile finds no
    /// room. Construction validates `start_tiles` against the grid size.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) -> Result<(), MoveError> {
        self.grid = Grid::new(*self.config.grid_size());
        self.score = 0;
        self.turns = 0;
        self.won = false;
        self.over = false;
        self.keep_playing = false;

        for _ in 0..*self.config.start_tiles() {
            add_random_tile(&mut self.grid, &mut self.rng, *self.config.two_probability())?;
        }

        self.over = is_game_over(&self.grid);
        self.phase = self.current_phase();
        info!(tiles = self.grid.tile_count(), phase = %self.phase, "New game started");
        Ok(())
    }

    /// Starts over from any phase.
    #[instrument(skip(self))]
    pub fn restart(&mut self) -> Result<(), MoveError> {
        self.new_game()
    }

    /// Lets a won session continue.
    ///
    /// Has no effect on the phase unless the session is `Won`.
    #[instrument(skip(self))]
    pub fn keep_playing(&mut self) {
        self.keep_playing = true;
        if self.phase == Phase::Won {
            self.phase = Phase::Playing;
            info!("Continuing after win");
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Moves
    // ─────────────────────────────────────────────────────────────

    /// Decodes a raw direction value and applies it.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::InvalidDirection`] for values outside `0..=3`,
    /// before the grid is touched, or any error from [`make_move`](Self::make_move).
    #[instrument(skip(self))]
    pub fn try_move(&mut self, raw: u8) -> Result<Turn, MoveError> {
        let direction = Direction::try_from(raw).inspect_err(|e| warn!(%e, "Rejected move"))?;
        self.make_move(direction)
    }

    /// Slides every tile toward `direction`.
    ///
    /// If anything moved, exactly one tile spawns, the score grows by the
    /// merged values and the turn counter advances. Then the win and loss
    /// conditions are evaluated.
    ///
    /// Contract enforcement:
    /// - Preconditions checked always (`AcceptsMoves`)
    /// - Postconditions checked in debug builds only
    ///
    /// # Errors
    ///
    /// Returns the phase error from `AcceptsMoves` when the session is not
    /// playing, or [`MoveError::GridExhausted`] if the spawn finds no room.
    #[instrument(skip(self), fields(turn = self.turns))]
    pub fn make_move(&mut self, direction: Direction) -> Result<Turn, MoveError> {
        AcceptsMoves::check(self.phase).inspect_err(|e| warn!(%e, "Rejected move"))?;

        #[cfg(debug_assertions)]
        let before = {
            SlideContract::pre(&self.grid, &direction)?;
            (self.grid.clone(), self.score)
        };

        let outcome = resolve(&mut self.grid, direction, *self.config.winning_value());

        if !outcome.moved {
            debug!("Move changed nothing");
            return Ok(Turn {
                direction,
                moved: false,
                score_delta: 0,
                slides: Vec::new(),
                merged: Vec::new(),
                spawned: None,
                reached_target: false,
                phase: self.phase,
            });
        }

        #[cfg(debug_assertions)]
        SlideContract::post(&before.0, &self.grid)?;

        let spawned = add_random_tile(&mut self.grid, &mut self.rng, *self.config.two_probability())?;
        self.score += outcome.score_delta;
        self.turns += 1;

        #[cfg(debug_assertions)]
        {
            ScoreMonotonic::check(before.1, self.score)?;
            debug_assert!(super::rules::loss::probe_agrees(&self.grid));
        }

        if outcome.reached_target && !self.won {
            self.won = true;
            info!(score = self.score, turns = self.turns, "Winning tile reached");
        }
        if is_game_over(&self.grid) {
            self.over = true;
            info!(score = self.score, turns = self.turns, "No moves left");
        }
        self.phase = self.current_phase();

        debug!(
            %direction,
            score_delta = outcome.score_delta,
            score = self.score,
            phase = %self.phase,
            "Turn complete"
        );

        Ok(Turn {
            direction,
            moved: true,
            score_delta: outcome.score_delta,
            slides: outcome.slides,
            merged: outcome.merged,
            spawned: Some(spawned),
            reached_target: outcome.reached_target,
            phase: self.phase,
        })
    }

    fn current_phase(&self) -> Phase {
        if self.over {
            Phase::Over
        } else if self.won && !self.keep_playing {
            Phase::Won
        } else {
            Phase::Playing
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Accessors
// ─────────────────────────────────────────────────────────────

impl<R> Game<R> {
    /// Returns the session configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Returns the board.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Current score.
    pub fn score(&self) -> u64 {
        self.score
    }

    /// True once any tile has reached the winning value.
    pub fn won(&self) -> bool {
        self.won
    }

    /// True once no legal move remains.
    pub fn over(&self) -> bool {
        self.over
    }

    /// True if the caller opted to continue after winning.
    pub fn keep_playing_enabled(&self) -> bool {
        self.keep_playing
    }

    /// Number of turns that changed the grid.
    pub fn turns(&self) -> u64 {
        self.turns
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True if the session refuses moves until restarted or continued.
    pub fn is_terminated(&self) -> bool {
        self.over || (self.won && !self.keep_playing)
    }

    /// True if some direction would change the grid.
    pub fn moves_available(&self) -> bool {
        moves_available(&self.grid)
    }

    /// Plain-data copy of the session for presentation or storage.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from(self)
    }
}
