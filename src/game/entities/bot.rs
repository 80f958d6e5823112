//! Bot entity: an agent's position, inventory and standing.

use serde::{Deserialize, Serialize};

use crate::game::types::{Category, Inventory, Position};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bot {
    /// Stable 0-based index, assigned at creation.
    pub index: usize,
    pub name: String,
    pub group: String,
    pub pos: Position,
    pub inventory: Inventory,
    /// Inventory as it was just before the most recent pickup.
    pub prev_inventory: Inventory,
    /// Number of categories this bot leads alone, as of the last snapshot.
    pub category_tops: u32,
}

impl Bot {
    pub fn new(
        index: usize,
        pos: Position,
        name: impl Into<String>,
        group: impl Into<String>,
    ) -> Self {
        Self {
            index,
            name: name.into(),
            group: group.into(),
            pos,
            inventory: Inventory::default(),
            prev_inventory: Inventory::default(),
            category_tops: 0,
        }
    }

    /// Short board label, `b1` for index 0.
    pub fn label(&self) -> String {
        format!("b{}", self.index + 1)
    }

    pub fn add_object(&mut self, category: Category) {
        self.prev_inventory = self.inventory;
        self.inventory[category] += 1;
    }
}
