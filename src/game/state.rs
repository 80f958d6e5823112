//! Authoritative world state and the read-only board snapshot handed to policies.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::game::entities::{Bot, GameObject};
use crate::game::grid::MapLayout;
use crate::game::systems::category_tops;
use crate::game::types::{Category, Inventory, Position};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub size: usize,
    pub objects: Vec<GameObject>,
    pub bots: Vec<Bot>,
    pub turn: u32,
    /// Objects generated per category at game start.
    pub initial_counts: Inventory,
}

impl GameState {
    /// Build the starting state from a generated layout. `identities` gives each
    /// bot's `(name, group)`, in index order, and must match the layout's bot count.
    pub fn new(size: usize, layout: MapLayout, identities: Vec<(String, String)>) -> Self {
        let bots = layout
            .bot_positions
            .into_iter()
            .zip(identities)
            .enumerate()
            .map(|(index, (pos, (name, group)))| Bot::new(index, pos, name, group))
            .collect();

        GameState {
            size,
            objects: layout.objects,
            bots,
            turn: 0,
            initial_counts: layout.counts,
        }
    }

    /// Build a state from explicit pieces. Initial counts are derived from the
    /// objects still on the board plus what the bots already hold.
    pub fn from_parts(size: usize, objects: Vec<GameObject>, bots: Vec<Bot>) -> Self {
        let mut initial_counts = Inventory::default();
        for object in &objects {
            initial_counts[object.category] += 1;
        }
        for bot in &bots {
            for (category, count) in bot.inventory.iter() {
                initial_counts[category] += count;
            }
        }

        GameState {
            size,
            objects,
            bots,
            turn: 0,
            initial_counts,
        }
    }

    /// Check the board invariants a hand-built state can break: a non-empty
    /// board, every bot and object on it, and bot `i` stored at slot `i`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 {
            return Err(ConfigError::Invalid("board size must be at least 1".into()));
        }
        for (slot, bot) in self.bots.iter().enumerate() {
            if bot.index != slot {
                return Err(ConfigError::Invalid(format!(
                    "bot with index {} stored at slot {}",
                    bot.index, slot
                )));
            }
            if !bot.pos.in_bounds(self.size) {
                return Err(ConfigError::Invalid(format!(
                    "{} at {} is outside the {}x{} board",
                    bot.label(),
                    bot.pos,
                    self.size,
                    self.size
                )));
            }
        }
        if let Some(object) = self.objects.iter().find(|o| !o.pos.in_bounds(self.size)) {
            return Err(ConfigError::Invalid(format!(
                "{} object at {} is outside the {}x{} board",
                object.category.name(),
                object.pos,
                self.size,
                self.size
            )));
        }
        Ok(())
    }

    pub fn remaining(&self, category: Category) -> u32 {
        self.objects.iter().filter(|o| o.category == category).count() as u32
    }

    /// Recompute and store every bot's category-lead count.
    pub fn refresh_standings(&mut self) {
        let tops = category_tops(&self.bots);
        for (bot, tops) in self.bots.iter_mut().zip(tops) {
            bot.category_tops = tops;
        }
    }

    /// Copy the current board into a grid of occupants. Bots are listed before
    /// objects within a cell.
    pub fn snapshot(&self) -> BoardSnapshot {
        let mut cells = vec![vec![Vec::new(); self.size]; self.size];
        for bot in &self.bots {
            cells[bot.pos.x][bot.pos.y].push(Occupant::Bot(bot.clone()));
        }
        for object in &self.objects {
            cells[object.pos.x][object.pos.y].push(Occupant::Object(*object));
        }

        BoardSnapshot {
            size: self.size,
            turn: self.turn,
            cells,
            bots: self.bots.clone(),
        }
    }

    /// Refresh standings, then snapshot.
    pub fn take_snapshot(&mut self) -> BoardSnapshot {
        self.refresh_standings();
        self.snapshot()
    }
}

/// Something standing on a cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Occupant {
    Bot(Bot),
    Object(GameObject),
}

impl Occupant {
    pub fn label(&self) -> String {
        match self {
            Occupant::Bot(bot) => bot.label(),
            Occupant::Object(object) => object.label(),
        }
    }
}

/// Immutable copy of the board for one turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub size: usize,
    pub turn: u32,
    /// `cells[x][y]` lists the occupants of row `x`, column `y`.
    pub cells: Vec<Vec<Vec<Occupant>>>,
    /// Every bot, in index order.
    pub bots: Vec<Bot>,
}

impl BoardSnapshot {
    pub fn cell(&self, pos: Position) -> &[Occupant] {
        &self.cells[pos.x][pos.y]
    }

    pub fn objects(&self) -> impl Iterator<Item = &GameObject> {
        self.cells.iter().flatten().flatten().filter_map(|occupant| match occupant {
            Occupant::Object(object) => Some(object),
            Occupant::Bot(_) => None,
        })
    }

    /// One line per row, cells joined by tabs and dashes.
    pub fn pretty(&self) -> String {
        let mut out = String::from("**** GAME MAP ****\n");
        for row in &self.cells {
            let line: Vec<String> = row
                .iter()
                .map(|cell| {
                    let labels: Vec<String> = cell.iter().map(Occupant::label).collect();
                    format!("[{}]", labels.join(", "))
                })
                .collect();
            out.push_str(&line.join("\t -- "));
            out.push('\n');
        }
        out.push_str("******************");
        out
    }
}
