//! Bot policies: the external decision functions that pick a direction each turn.
//!
//! A policy is untrusted. Whatever it does wrong (returning an error, an unknown
//! token, or panicking) is turned into an [`EngineError`] naming the bot by
//! [`dispatch_step`].

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::game::error::EngineError;
use crate::game::state::BoardSnapshot;
use crate::game::types::{Direction, ParseDirectionError, Position};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("{0}")]
    Failed(String),
    #[error("invalid direction <{0}>")]
    InvalidResponse(String),
}

impl From<ParseDirectionError> for PolicyError {
    fn from(e: ParseDirectionError) -> Self {
        PolicyError::InvalidResponse(e.0)
    }
}

pub trait BotPolicy {
    /// Display name of the player controlling the bot.
    fn name(&self) -> &str;

    fn group(&self) -> &str {
        ""
    }

    /// Pick this turn's direction from a read-only copy of the board.
    fn step(
        &mut self,
        board: &BoardSnapshot,
        turn: u32,
        position: Position,
    ) -> Result<Direction, PolicyError>;
}

fn panic_detail(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_string()
    }
}

/// Query one policy, converting every kind of failure into an [`EngineError`].
pub fn dispatch_step(
    policy: &mut dyn BotPolicy,
    index: usize,
    board: &BoardSnapshot,
    turn: u32,
    position: Position,
) -> Result<Direction, EngineError> {
    let result = panic::catch_unwind(AssertUnwindSafe(|| policy.step(board, turn, position)));

    match result {
        Ok(Ok(direction)) => Ok(direction),
        Ok(Err(PolicyError::InvalidResponse(value))) => Err(EngineError::InvalidPolicyResponse {
            index,
            name: policy.name().to_string(),
            value,
        }),
        Ok(Err(PolicyError::Failed(detail))) => Err(EngineError::PolicyFailure {
            index,
            name: policy.name().to_string(),
            detail,
        }),
        Err(payload) => Err(EngineError::PolicyFailure {
            index,
            name: policy.name().to_string(),
            detail: panic_detail(payload),
        }),
    }
}

/// Uniformly random moves.
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl BotPolicy for RandomPolicy {
    fn name(&self) -> &str {
        "random"
    }

    fn step(
        &mut self,
        _board: &BoardSnapshot,
        _turn: u32,
        _position: Position,
    ) -> Result<Direction, PolicyError> {
        Ok(Direction::ALL[self.rng.random_range(0..Direction::ALL.len())])
    }
}

/// Always the same move.
pub struct FixedPolicy {
    direction: Direction,
    name: String,
}

impl FixedPolicy {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            name: format!("fixed-{direction}"),
        }
    }
}

impl BotPolicy for FixedPolicy {
    fn name(&self) -> &str {
        &self.name
    }

    fn step(
        &mut self,
        _board: &BoardSnapshot,
        _turn: u32,
        _position: Position,
    ) -> Result<Direction, PolicyError> {
        Ok(self.direction)
    }
}

/// Replays raw direction tokens in order and fails once they run out.
pub struct ScriptedPolicy {
    name: String,
    tokens: Vec<String>,
    next: usize,
}

impl ScriptedPolicy {
    pub fn new<I, S>(name: impl Into<String>, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            tokens: tokens.into_iter().map(Into::into).collect(),
            next: 0,
        }
    }
}

impl BotPolicy for ScriptedPolicy {
    fn name(&self) -> &str {
        &self.name
    }

    fn step(
        &mut self,
        _board: &BoardSnapshot,
        turn: u32,
        _position: Position,
    ) -> Result<Direction, PolicyError> {
        let token = self
            .tokens
            .get(self.next)
            .ok_or_else(|| PolicyError::Failed(format!("script exhausted at turn {turn}")))?;
        self.next += 1;
        Ok(token.parse::<Direction>()?)
    }
}

/// Built-in player kinds selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Random,
    Fixed(Direction),
}

impl PlayerKind {
    pub fn create_policy(self, seed: u64) -> Box<dyn BotPolicy> {
        match self {
            PlayerKind::Random => Box::new(RandomPolicy::new(seed)),
            PlayerKind::Fixed(direction) => Box::new(FixedPolicy::new(direction)),
        }
    }
}

impl FromStr for PlayerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "random" => Ok(PlayerKind::Random),
            other => match other.strip_prefix("fixed:") {
                Some(token) => token
                    .parse()
                    .map(PlayerKind::Fixed)
                    .map_err(|e: ParseDirectionError| e.to_string()),
                None => Err(format!(
                    "unknown player kind <{other}> (expected random or fixed:<direction>)"
                )),
            },
        }
    }
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerKind::Random => f.write_str("random"),
            PlayerKind::Fixed(direction) => write!(f, "fixed:{direction}"),
        }
    }
}
