//! Session configuration for 2048.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Tunable rules of a session.
///
/// Missing TOML keys fall back to the classic game: a 4×4 board, 2048 to
/// win, two starting tiles, and a 90% chance that a spawn is a 2.
#[derive(Debug, Clone, PartialEq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square grid.
    grid_size: usize,

    /// Tile value that wins the game.
    winning_value: u32,

    /// Tiles spawned by `new_game`.
    start_tiles: usize,

    /// Probability that a spawned tile is a 2 rather than a 4.
    two_probability: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 4,
            winning_value: 2048,
            start_tiles: 2,
            two_probability: 0.9,
        }
    }
}

impl GameConfig {
    /// Loads and validates configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml_str(&content)?;
        info!(
            grid_size = config.grid_size,
            winning_value = config.winning_value,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the settings describe a playable game.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < 2 {
            return Err(ConfigError::new(format!(
                "grid_size must be at least 2, got {}",
                self.grid_size
            )));
        }
        if self.winning_value < 4 || !self.winning_value.is_power_of_two() {
            return Err(ConfigError::new(format!(
                "winning_value must be a power of two of at least 4, got {}",
                self.winning_value
            )));
        }
        if !(0.0..=1.0).contains(&self.two_probability) {
            return Err(ConfigError::new(format!(
                "two_probability must lie in [0, 1], got {}",
                self.two_probability
            )));
        }
        let cells = self.grid_size * self.grid_size;
        if self.start_tiles > cells {
            return Err(ConfigError::new(format!(
                "start_tiles ({}) exceeds the {} cells of the grid",
                self.start_tiles, cells
            )));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_classic() {
        let config = GameConfig::default();
        assert_eq!(*config.grid_size(), 4);
        assert_eq!(*config.winning_value(), 2048);
        assert_eq!(*config.start_tiles(), 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = GameConfig::from_toml_str("grid_size = 5").expect("valid");
        assert_eq!(*config.grid_size(), 5);
        assert_eq!(*config.winning_value(), 2048);
    }

    #[test]
    fn test_setters_chain() {
        let config = GameConfig::default()
            .with_grid_size(3)
            .with_winning_value(256);
        assert_eq!(*config.grid_size(), 3);
        assert_eq!(*config.winning_value(), 256);
    }

    #[test]
    fn test_rejects_bad_values() {
        let bad = [
            GameConfig::default().with_grid_size(1),
            GameConfig::default().with_winning_value(1000),
            GameConfig::default().with_winning_value(2),
            GameConfig::default().with_two_probability(1.5),
            GameConfig::default().with_two_probability(f64::NAN),
            GameConfig::default().with_start_tiles(17),
        ];
        for config in bad {
            assert!(config.validate().is_err(), "{:?} should be rejected", config);
        }
    }

    #[test]
    fn test_parse_error_reported() {
        let err = GameConfig::from_toml_str("grid_size = \"big\"").unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
    }
}
