//! Command-line interface for strictly_2048.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly 2048 - contract-checked 2048 engine
#[derive(Parser, Debug)]
#[command(name = "strictly_2048")]
#[command(about = "Play and inspect 2048 sessions from the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play seeded games with random moves and report the results
    Autoplay {
        /// Number of games to play
        #[arg(short, long, default_value = "1")]
        games: u32,

        /// Seed for the first game; game `n` uses `seed + n`
        #[arg(short, long, default_value = "0")]
        seed: u64,

        /// Path to a TOML game configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Give up on a game after this many move attempts
        #[arg(long, default_value = "100000")]
        max_turns: u64,

        /// Keep playing after reaching the winning tile
        #[arg(long)]
        keep_playing: bool,
    },

    /// Load, validate and print a game configuration
    CheckConfig {
        /// Path to the TOML file
        path: PathBuf,
    },
}
