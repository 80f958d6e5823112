//! Simulation loop: query every policy, resolve the turn, repeat until the game ends.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::config::{ConfigError, GameConfig};
use crate::game::error::EngineError;
use crate::game::grid::generate_map;
use crate::game::policy::{BotPolicy, dispatch_step};
use crate::game::state::GameState;
use crate::game::systems::{GameEvent, GameObserver, determine_winners, resolve_turn};
use crate::game::types::{Direction, GameOutcome};

/// What a finished game reports back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameReport {
    /// The single winning bot index, or empty when the best standing was shared.
    pub winners: Vec<usize>,
    /// Cumulative time spent inside each bot's policy. Empty unless timing is on.
    pub timings: BTreeMap<usize, Duration>,
    pub final_turn: u32,
    pub outcome: GameOutcome,
}

#[derive(Debug, Clone, PartialEq)]
enum Phase {
    Running,
    /// A terminal outcome was reached but the game has not been scored yet.
    Over(GameOutcome),
    Ended(GameReport),
}

pub struct Engine<'p> {
    config: GameConfig,
    state: GameState,
    rng: StdRng,
    policies: &'p mut [Box<dyn BotPolicy>],
    check_timing: bool,
    timings: BTreeMap<usize, Duration>,
    phase: Phase,
}

impl<'p> Engine<'p> {
    /// Generate a fresh map for one bot per policy. The policies stay owned by
    /// the caller; bot `i` is driven by `policies[i]`.
    pub fn new(
        config: GameConfig,
        policies: &'p mut [Box<dyn BotPolicy>],
    ) -> Result<Self, EngineError> {
        config.validate(policies.len())?;

        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = StdRng::seed_from_u64(seed);
        let layout = generate_map(&mut rng, &config, policies.len());
        let identities = policies
            .iter()
            .map(|policy| (policy.name().to_string(), policy.group().to_string()))
            .collect();
        let state = GameState::new(config.map_size, layout, identities);

        info!(
            "[Engine] new game: seed={} size={} bots={} objects={}",
            seed,
            config.map_size,
            state.bots.len(),
            state.initial_counts
        );

        Ok(Self::assemble(config, state, rng, policies))
    }

    /// Run from a prepared state instead of a generated map.
    ///
    /// The state must fit the configuration: same board size, every bot and
    /// object on the board, and bot `i` stored at slot `i`.
    pub fn with_state(
        config: GameConfig,
        state: GameState,
        rng: StdRng,
        policies: &'p mut [Box<dyn BotPolicy>],
    ) -> Result<Self, EngineError> {
        config.validate(policies.len())?;
        if state.size != config.map_size {
            return Err(ConfigError::Invalid(format!(
                "board size {} does not match map_size {}",
                state.size, config.map_size
            ))
            .into());
        }
        state.validate()?;
        if state.bots.len() != policies.len() {
            return Err(ConfigError::Invalid(format!(
                "{} bots on the board but {} policies",
                state.bots.len(),
                policies.len()
            ))
            .into());
        }
        Ok(Self::assemble(config, state, rng, policies))
    }

    fn assemble(
        config: GameConfig,
        state: GameState,
        rng: StdRng,
        policies: &'p mut [Box<dyn BotPolicy>],
    ) -> Self {
        Self {
            config,
            state,
            rng,
            policies,
            check_timing: false,
            timings: BTreeMap::new(),
            phase: Phase::Running,
        }
    }

    /// Measure how long each policy takes to answer.
    pub fn with_timing(mut self, check_timing: bool) -> Self {
        self.check_timing = check_timing;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Play a single turn: snapshot, ask every policy, resolve.
    ///
    /// A policy error aborts before anything of this turn is applied; earlier
    /// turns stay as they were. Once a terminal outcome has been reached the
    /// game is frozen: no policy is queried and the terminal outcome is
    /// returned again.
    pub fn play_turn(
        &mut self,
        observer: &mut dyn GameObserver,
    ) -> Result<GameOutcome, EngineError> {
        match &self.phase {
            Phase::Running => {}
            Phase::Over(outcome) => return Ok(*outcome),
            Phase::Ended(report) => return Ok(report.outcome),
        }

        let snapshot = self.state.take_snapshot();
        observer.on_turn(&snapshot);

        let mut moves: BTreeMap<usize, Direction> = BTreeMap::new();
        for (index, policy) in self.policies.iter_mut().enumerate() {
            let position = self.state.bots[index].pos;
            let started = self.check_timing.then(Instant::now);

            let direction =
                dispatch_step(policy.as_mut(), index, &snapshot, snapshot.turn, position)?;

            if let Some(started) = started {
                *self.timings.entry(index).or_default() += started.elapsed();
            }
            moves.insert(index, direction);
        }

        let outcome = resolve_turn(&mut self.state, &moves, self.config.max_turns, &mut self.rng);
        debug!("[Engine] turn={} outcome={:?}", self.state.turn, outcome);

        if outcome == GameOutcome::ObjectCollected {
            observer.on_event(GameEvent::Collect);
        }
        if outcome.is_terminal() {
            self.phase = Phase::Over(outcome);
        }
        Ok(outcome)
    }

    /// Play until timeout or until every object is collected, then score.
    /// Calling this again on a finished game returns the same report.
    pub fn run(&mut self, observer: &mut dyn GameObserver) -> Result<GameReport, EngineError> {
        if let Phase::Ended(report) = &self.phase {
            return Ok(report.clone());
        }

        let mut outcome = self.play_turn(observer)?;
        while !outcome.is_terminal() {
            outcome = self.play_turn(observer)?;
        }

        let snapshot = self.state.take_snapshot();
        if outcome == GameOutcome::AllObjectsCollected {
            observer.on_event(GameEvent::GameOver);
        }

        let report = GameReport {
            winners: determine_winners(&snapshot.bots),
            timings: self.timings.clone(),
            final_turn: snapshot.turn,
            outcome,
        };
        observer.on_game_over(&snapshot, &report);

        info!(
            "[Engine] game over: outcome={:?} turn={} winners={:?}",
            report.outcome, report.final_turn, report.winners
        );
        self.phase = Phase::Ended(report.clone());
        Ok(report)
    }
}
