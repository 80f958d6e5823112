/// Game configuration constants and the runtime configuration value.
///
/// The constants are the defaults used when no configuration file or CLI flag
/// overrides them.
use std::fs;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::types::Category;

/// Side length of the square board.
pub const MAP_SIZE: usize = 5;

/// Fraction of the board used to bound the number of objects per category.
pub const OBJECT_DENSITY: f64 = 0.4;

/// Last turn number that still gets resolved. The game times out after it.
pub const MAX_TURNS: u32 = 200;

/// Number of games played by the batch runner when nothing else is asked.
pub const NUM_GAMES: usize = 1;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub map_size: usize,
    pub object_density: f64,
    pub max_turns: u32,
    /// Seed for the game's random source. `None` draws a fresh one per run.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map_size: MAP_SIZE,
            object_density: OBJECT_DENSITY,
            max_turns: MAX_TURNS,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Load a configuration from a JSON file. Missing fields keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Json {
            path: path.display().to_string(),
            source,
        })
    }

    /// `floor(object_density * map_size²)`.
    pub fn max_objects(&self) -> usize {
        (self.object_density * (self.map_size * self.map_size) as f64) as usize
    }

    /// Inclusive upper bound of the per-category object count draw.
    pub fn max_objects_per_category(&self) -> usize {
        (2 * self.max_objects() / Category::COUNT).max(1)
    }

    /// Reject values the engine cannot work with at all.
    ///
    /// Boards too crowded to place every object and bot are not rejected here:
    /// placement would never finish, and avoiding that stays with the caller.
    /// Only a warning is logged when the worst case reaches the board capacity.
    pub fn validate(&self, bot_count: usize) -> Result<(), ConfigError> {
        if self.map_size == 0 {
            return Err(ConfigError::Invalid("map_size must be at least 1".into()));
        }
        if self.max_turns == u32::MAX {
            return Err(ConfigError::Invalid(format!(
                "max_turns must be below {} so the turn counter cannot overflow",
                u32::MAX
            )));
        }
        if !self.object_density.is_finite() || !(0.0..=1.0).contains(&self.object_density) {
            return Err(ConfigError::Invalid(format!(
                "object_density must be within [0, 1] (got {})",
                self.object_density
            )));
        }

        let worst_case = self.max_objects_per_category() * Category::COUNT + bot_count;
        let capacity = self.map_size * self.map_size;
        if worst_case >= capacity {
            warn!(
                "[Config] up to {} objects and bots on {} cells: map generation may not terminate",
                worst_case, capacity
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let config = GameConfig::default();
        assert_eq!(config.map_size, 5);
        assert_eq!(config.max_turns, 200);
        assert_eq!(config.max_objects(), 10);
        assert_eq!(config.max_objects_per_category(), 6);
    }

    #[test]
    fn tiny_board_still_allows_one_object_per_category() {
        let config = GameConfig { map_size: 1, ..GameConfig::default() };
        assert_eq!(config.max_objects(), 0);
        assert_eq!(config.max_objects_per_category(), 1);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"map_size": 8, "seed": 3}"#).unwrap();
        assert_eq!(config.map_size, 8);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.max_turns, MAX_TURNS);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let zero = GameConfig { map_size: 0, ..GameConfig::default() };
        assert!(matches!(zero.validate(2), Err(ConfigError::Invalid(_))));

        let dense = GameConfig { object_density: 1.5, ..GameConfig::default() };
        assert!(matches!(dense.validate(2), Err(ConfigError::Invalid(_))));

        let nan = GameConfig { object_density: f64::NAN, ..GameConfig::default() };
        assert!(nan.validate(2).is_err());

        let endless = GameConfig { max_turns: u32::MAX, ..GameConfig::default() };
        assert!(matches!(endless.validate(2), Err(ConfigError::Invalid(_))));

        let longest = GameConfig { max_turns: u32::MAX - 1, ..GameConfig::default() };
        assert!(longest.validate(2).is_ok());

        assert!(GameConfig::default().validate(2).is_ok());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = GameConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
