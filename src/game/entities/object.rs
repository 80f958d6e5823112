//! Collectible object entity.

use serde::{Deserialize, Serialize};

use crate::game::types::{Category, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameObject {
    pub pos: Position,
    pub category: Category,
}

impl GameObject {
    pub const fn new(pos: Position, category: Category) -> Self {
        Self { pos, category }
    }

    /// Short board label, `f1` for the first category.
    pub fn label(&self) -> String {
        format!("f{}", self.category.index() + 1)
    }
}
