//! Game entities module.
//!
//! This module organizes bot and collectible object entity logic.

pub mod bot;
pub mod object;

pub use bot::*;
pub use object::*;
