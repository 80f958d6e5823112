//! Simulation engine: world state, map generation, turn resolution, scoring and
//! the loop that drives the bots' policies.

pub mod error;
pub mod game_loop;
pub mod policy;
pub mod state;
pub mod types;

pub mod entities;
pub mod grid;
pub mod systems;

pub use error::EngineError;
pub use game_loop::{Engine, GameReport};
pub use policy::{BotPolicy, PlayerKind, PolicyError};
pub use state::{BoardSnapshot, GameState, Occupant};
pub use types::{Category, Direction, GameOutcome, Inventory, Position};
