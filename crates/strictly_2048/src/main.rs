//! Strictly 2048 - command-line harness
//!
//! Plays seeded sessions and validates configuration files.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::path::PathBuf;
use strictly_2048::{Direction, Game, GameConfig, GameSnapshot, Phase};
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Autoplay {
            games,
            seed,
            config,
            max_turns,
            keep_playing,
        } => run_autoplay(games, seed, config, max_turns, keep_playing),
        Command::CheckConfig { path } => run_check_config(path),
    }
}

/// Loads the config at `path`, or the defaults when none is given.
#[instrument]
fn load_config(path: Option<PathBuf>) -> Result<GameConfig> {
    match path {
        Some(path) => GameConfig::from_file(&path)
            .with_context(|| format!("loading {}", path.display())),
        None => {
            debug!("No config given, using defaults");
            Ok(GameConfig::default())
        }
    }
}

/// Play `games` sessions with uniformly random directions.
#[instrument]
fn run_autoplay(
    games: u32,
    seed: u64,
    config: Option<PathBuf>,
    max_turns: u64,
    keep_playing: bool,
) -> Result<()> {
    let config = load_config(config)?;
    info!(games, seed, "Starting autoplay");

    let mut best: Option<GameSnapshot> = None;
    let mut wins = 0u32;

    for index in 0..games {
        let game_seed = seed.wrapping_add(u64::from(index));
        let snapshot = play_one(config.clone(), game_seed, max_turns, keep_playing)?;

        if snapshot.won {
            wins += 1;
        }
        println!("game {:>3} (seed {}): {}", index, game_seed, snapshot.status_string());

        if best.as_ref().is_none_or(|b| snapshot.score > b.score) {
            best = Some(snapshot);
        }
    }

    if let Some(best) = best {
        println!("best score {} with tile {}; {} of {} won", best.score, best.highest_tile, wins, games);
    }
    Ok(())
}

/// Play a single seeded game to completion.
#[instrument(skip(config))]
fn play_one(config: GameConfig, seed: u64, max_turns: u64, keep_playing: bool) -> Result<GameSnapshot> {
    let mut game = Game::seeded(config, seed).context("building game")?;
    let mut chooser = StdRng::seed_from_u64(seed.rotate_left(32));
    game.new_game().context("starting game")?;

    let mut attempts = 0u64;
    while attempts < max_turns {
        if game.phase() == Phase::Won && keep_playing {
            game.keep_playing();
        }
        if game.is_terminated() {
            break;
        }

        let direction = Direction::ALL
            .choose(&mut chooser)
            .copied()
            .unwrap_or(Direction::Up);
        game.make_move(direction)
            .with_context(|| format!("turn {} ({})", game.turns(), direction))?;
        attempts += 1;
    }

    if attempts >= max_turns {
        warn!(seed, attempts, "Gave up before the game ended");
    }
    debug!(board = %game.grid(), "Final board");
    info!(seed, score = game.score(), turns = game.turns(), phase = %game.phase(), "Game finished");
    Ok(game.snapshot())
}

/// Load, validate and print the configuration at `path`.
#[instrument]
fn run_check_config(path: PathBuf) -> Result<()> {
    let config = load_config(Some(path))?;
    let rendered = toml::to_string_pretty(&config).context("rendering config")?;
    println!("{}", rendered);
    info!("Config is valid");
    Ok(())
}
