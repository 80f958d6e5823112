//! Board layout generation.

#[allow(clippy::module_inception)]
mod grid;

pub use grid::*;
