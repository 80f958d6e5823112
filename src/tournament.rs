//! Batch runner: play several games with the same line-up and tally the results.

use std::fmt;

use log::info;
use rand::Rng;
use serde::Serialize;

use crate::config::GameConfig;
use crate::game::error::EngineError;
use crate::game::game_loop::Engine;
use crate::game::policy::{BotPolicy, PlayerKind};
use crate::game::systems::GameObserver;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSummary {
    pub label: String,
    pub wins: usize,
    /// Sum over games of (time spent in the policy / turns played), in seconds.
    /// Only present when timing was requested.
    pub avg_step_secs: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TournamentSummary {
    pub games: usize,
    pub entries: Vec<PlayerSummary>,
}

/// Seed for game `game` of a batch started from `base`.
pub fn game_seed(base: u64, game: usize) -> u64 {
    base.wrapping_add(game as u64)
}

fn policy_seed(game_seed: u64, index: usize) -> u64 {
    game_seed.wrapping_mul(0x9E37_79B9_7F4A_7C15).wrapping_add(index as u64 + 1)
}

/// Play `games` games, creating fresh policies for each one.
/// The first engine error stops the whole batch.
pub fn run_tournament(
    config: &GameConfig,
    players: &[PlayerKind],
    games: usize,
    check_timing: bool,
    observer: &mut dyn GameObserver,
) -> Result<TournamentSummary, EngineError> {
    let base = config.seed.unwrap_or_else(|| rand::rng().random());
    info!("[Tournament] {} games, {} players, base seed {}", games, players.len(), base);

    let mut wins = vec![0usize; players.len()];
    let mut times = vec![0f64; players.len()];

    for game in 0..games {
        let seed = game_seed(base, game);
        let mut policies: Vec<Box<dyn BotPolicy>> = players
            .iter()
            .enumerate()
            .map(|(index, kind)| kind.create_policy(policy_seed(seed, index)))
            .collect();

        let game_config = GameConfig {
            seed: Some(seed),
            ..config.clone()
        };
        let report = Engine::new(game_config, &mut policies)?
            .with_timing(check_timing)
            .run(observer)?;

        for winner in &report.winners {
            wins[*winner] += 1;
        }
        let turns = report.final_turn.max(1) as f64;
        for (index, spent) in &report.timings {
            times[*index] += spent.as_secs_f64() / turns;
        }
    }

    let entries = players
        .iter()
        .enumerate()
        .map(|(index, kind)| PlayerSummary {
            label: format!("b{} {}", index + 1, kind),
            wins: wins[index],
            avg_step_secs: check_timing.then_some(times[index]),
        })
        .collect();

    Ok(TournamentSummary { games, entries })
}

impl fmt::Display for TournamentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "The results of the {} games were as follows:", self.games)?;
        for entry in &self.entries {
            writeln!(f, "{}: {}", entry.label, entry.wins)?;
        }

        if self.entries.iter().any(|e| e.avg_step_secs.is_some()) {
            writeln!(
                f,
                "It took the following average number of seconds for each player's \
                 step method to be executed:"
            )?;
            for entry in &self.entries {
                writeln!(f, "{}: {}", entry.label, entry.avg_step_secs.unwrap_or_default())?;
            }
        }
        Ok(())
    }
}
