//! Turn-based grid simulation where bots collect objects of three categories.
//!
//! The crate covers the engine only: deterministic map generation, per-turn
//! move resolution with a shuffled processing order, object pickup, and the
//! category-champion scoring rule. Bot decisions come from [`game::BotPolicy`]
//! implementations supplied by the caller; rendering hooks in through
//! [`game::systems::GameObserver`].

pub mod config;
pub mod game;
pub mod tournament;

#[cfg(test)]
mod tests;
