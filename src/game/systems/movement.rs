//! Bot movement system.
//!
//! This module handles moving bots on the board.

use crate::game::state::GameState;
use crate::game::types::{Direction, Position};

/// Move the specified bot one cell in the given direction.
/// Returns the new position, or `None` when the move would leave the board and
/// was discarded (the bot stays put).
pub fn move_bot(
    game_state: &mut GameState,
    bot_index: usize,
    direction: Direction,
) -> Option<Position> {
    let size = game_state.size;
    let bot = &mut game_state.bots[bot_index];
    let new_pos = bot.pos.step(direction, size)?;
    bot.pos = new_pos;
    Some(new_pos)
}
