//! Core value types shared by every game system.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cell coordinates. `x` is the row, `y` the column; both start at 0 in the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell in `direction`, or `None` when it falls outside a
    /// `size`×`size` board.
    pub fn step(self, direction: Direction, size: usize) -> Option<Position> {
        let (dx, dy) = direction.delta();
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        (x < size && y < size).then_some(Position { x, y })
    }

    pub fn in_bounds(self, size: usize) -> bool {
        self.x < size && self.y < size
    }
}

impl From<(usize, usize)> for Position {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("<{0}> is not a direction (expected up, down, left or right)")]
pub struct ParseDirectionError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Unit step as `(row, column)` deltas.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Direction for a unit step given as column delta `dx` and row delta `dy`.
    /// A horizontal component wins when both are set.
    pub fn from_delta(dx: isize, dy: isize) -> Option<Direction> {
        match (dx, dy) {
            (1, _) => Some(Direction::Right),
            (-1, _) => Some(Direction::Left),
            (_, 1) => Some(Direction::Down),
            (_, -1) => Some(Direction::Up),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            other => Err(ParseDirectionError(other.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of collectible object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Banana,
    Coin,
    Cauldron,
}

impl Category {
    pub const COUNT: usize = 3;
    pub const ALL: [Category; Category::COUNT] =
        [Category::Banana, Category::Coin, Category::Cauldron];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Category::Banana => "banana",
            Category::Coin => "coin",
            Category::Cauldron => "cauldron",
        }
    }
}

/// Per-category object counts, ordered like [`Category::ALL`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Inventory(pub [u32; Category::COUNT]);

impl Inventory {
    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, u32)> + '_ {
        Category::ALL.into_iter().map(move |category| (category, self[category]))
    }
}

impl Index<Category> for Inventory {
    type Output = u32;

    fn index(&self, category: Category) -> &u32 {
        &self.0[category.index()]
    }
}

impl IndexMut<Category> for Inventory {
    fn index_mut(&mut self, category: Category) -> &mut u32 {
        &mut self.0[category.index()]
    }
}

impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.0[0], self.0[1], self.0[2])
    }
}

/// Result of resolving one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    InProgress,
    Timeout,
    ObjectCollected,
    AllObjectsCollected,
}

impl GameOutcome {
    /// `true` once the game cannot continue.
    pub const fn is_terminal(self) -> bool {
        matches!(self, GameOutcome::Timeout | GameOutcome::AllObjectsCollected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_stays_on_board() {
        let corner = Position::new(0, 0);
        assert_eq!(corner.step(Direction::Up, 5), None);
        assert_eq!(corner.step(Direction::Left, 5), None);
        assert_eq!(corner.step(Direction::Down, 5), Some(Position::new(1, 0)));
        assert_eq!(corner.step(Direction::Right, 5), Some(Position::new(0, 1)));

        let far = Position::new(4, 4);
        assert_eq!(far.step(Direction::Down, 5), None);
        assert_eq!(far.step(Direction::Right, 5), None);
    }

    #[test]
    fn direction_tokens() {
        for direction in Direction::ALL {
            assert_eq!(direction.as_str().parse::<Direction>(), Ok(direction));
        }
        assert_eq!("Up".parse::<Direction>(), Err(ParseDirectionError("Up".into())));
        assert!("stay".parse::<Direction>().is_err());
    }

    #[test]
    fn from_delta_matches_axes() {
        assert_eq!(Direction::from_delta(1, 0), Some(Direction::Right));
        assert_eq!(Direction::from_delta(-1, 0), Some(Direction::Left));
        assert_eq!(Direction::from_delta(0, 1), Some(Direction::Down));
        assert_eq!(Direction::from_delta(0, -1), Some(Direction::Up));
        assert_eq!(Direction::from_delta(0, 0), None);
        assert_eq!(Direction::from_delta(2, 0), None);
    }

    #[test]
    fn inventory_indexing() {
        let mut inventory = Inventory::default();
        inventory[Category::Coin] += 2;
        inventory[Category::Cauldron] += 1;
        assert_eq!(inventory.0, [0, 2, 1]);
        assert_eq!(inventory.total(), 3);
        assert_eq!(inventory.to_string(), "[0, 2, 1]");
    }

    #[test]
    fn terminal_outcomes() {
        assert!(GameOutcome::Timeout.is_terminal());
        assert!(GameOutcome::AllObjectsCollected.is_terminal());
        assert!(!GameOutcome::InProgress.is_terminal());
        assert!(!GameOutcome::ObjectCollected.is_terminal());
    }
}
