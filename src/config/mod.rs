/// Main configuration module.
///
/// Re-exports the game configuration constants and the `GameConfig` value.
pub mod game;

pub use game::{ConfigError, GameConfig};
