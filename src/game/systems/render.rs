//! Rendering boundary.
//!
//! Observers receive a snapshot every turn plus the discrete game events. They
//! never feed anything back into the engine.

use std::io::Write;

use log::warn;
use serde::Serialize;

use crate::game::entities::Bot;
use crate::game::game_loop::GameReport;
use crate::game::state::{BoardSnapshot, Occupant};

/// Discrete events a renderer may react to (sounds, banners).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameEvent {
    Collect,
    GameOver,
}

impl GameEvent {
    pub const fn name(self) -> &'static str {
        match self {
            GameEvent::Collect => "collect",
            GameEvent::GameOver => "gameover",
        }
    }
}

pub trait GameObserver {
    /// Called with the snapshot handed to the policies, before they are queried.
    fn on_turn(&mut self, _snapshot: &BoardSnapshot) {}

    fn on_event(&mut self, _event: GameEvent) {}

    /// Called once with the final snapshot.
    fn on_game_over(&mut self, _snapshot: &BoardSnapshot, _report: &GameReport) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl GameObserver for NullObserver {}

/// Print the board and bot standings to the terminal.
#[derive(Debug, Default)]
pub struct TerminalRenderer;

impl TerminalRenderer {
    pub fn new() -> Self {
        Self
    }
}

/// Print the board, one cell per column. Bots take priority over objects when
/// they share a cell; a `+` marks extra occupants.
pub fn print_grid(snapshot: &BoardSnapshot) {
    for row in &snapshot.cells {
        for cell in row {
            let shown = cell.iter().find(|o| matches!(o, Occupant::Bot(_))).or(cell.first());
            let symbol = match shown {
                Some(occupant) if cell.len() > 1 => format!("{}+", occupant.label()),
                Some(occupant) => occupant.label(),
                None => "..".to_string(),
            };
            print!("{:<4}", symbol);
        }
        println!();
    }
}

pub fn print_bot_state(bot: &Bot) {
    println!(
        "--- {} ({}) --- pos {} | inventory {} | tops {}",
        bot.label(),
        bot.name,
        bot.pos,
        bot.inventory,
        bot.category_tops
    );
}

impl GameObserver for TerminalRenderer {
    fn on_turn(&mut self, snapshot: &BoardSnapshot) {
        println!("Turn {}", snapshot.turn);
        print_grid(snapshot);
        for bot in &snapshot.bots {
            print_bot_state(bot);
        }
        println!();
    }

    fn on_event(&mut self, event: GameEvent) {
        println!("* {} *", event.name());
    }

    fn on_game_over(&mut self, snapshot: &BoardSnapshot, report: &GameReport) {
        println!("Game over after turn {} ({:?})", snapshot.turn, report.outcome);
        print_grid(snapshot);
        for bot in &snapshot.bots {
            print_bot_state(bot);
        }
        match report.winners.as_slice() {
            [] => println!("No winner."),
            winners => {
                for index in winners {
                    println!("Winner: {}", snapshot.bots[*index].label());
                }
            }
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Record<'a> {
    Turn { snapshot: &'a BoardSnapshot },
    Event { name: &'static str },
    GameOver { snapshot: &'a BoardSnapshot, report: &'a GameReport },
}

/// Write one JSON object per line for every snapshot and event.
pub struct JsonLinesObserver<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesObserver<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write(&mut self, record: &Record<'_>) {
        let result = serde_json::to_writer(&mut self.out, record)
            .map_err(std::io::Error::from)
            .and_then(|_| self.out.write_all(b"\n"));
        if let Err(e) = result {
            warn!("[Render] failed to write JSON record: {}", e);
        }
    }
}

impl<W: Write> GameObserver for JsonLinesObserver<W> {
    fn on_turn(&mut self, snapshot: &BoardSnapshot) {
        self.write(&Record::Turn { snapshot });
    }

    fn on_event(&mut self, event: GameEvent) {
        self.write(&Record::Event { name: event.name() });
    }

    fn on_game_over(&mut self, snapshot: &BoardSnapshot, report: &GameReport) {
        self.write(&Record::GameOver { snapshot, report });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::GameObject;
    use crate::game::state::GameState;
    use crate::game::types::{Category, Position};

    #[test]
    fn json_lines_one_record_per_call() {
        let state = GameState::from_parts(
            2,
            vec![GameObject::new(Position::new(0, 1), Category::Coin)],
            vec![Bot::new(0, Position::new(0, 0), "a", "")],
        );
        let snapshot = state.snapshot();

        let mut observer = JsonLinesObserver::new(Vec::new());
        observer.on_turn(&snapshot);
        observer.on_event(GameEvent::Collect);
        let text = String::from_utf8(observer.into_inner()).unwrap();

        let lines: Vec<serde_json::Value> =
            text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["type"], "turn");
        assert_eq!(lines[0]["snapshot"]["cells"][0][1][0]["kind"], "object");
        assert_eq!(lines[0]["snapshot"]["cells"][0][1][0]["category"], "coin");
        assert_eq!(lines[1]["name"], "collect");
    }

    #[test]
    fn event_names() {
        assert_eq!(GameEvent::Collect.name(), "collect");
        assert_eq!(GameEvent::GameOver.name(), "gameover");
    }
}
