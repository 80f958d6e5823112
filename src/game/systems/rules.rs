//! Turn resolution: apply every bot's move in random order, collect objects and
//! classify the turn.

use std::collections::BTreeMap;

use log::{debug, warn};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::game::state::GameState;
use crate::game::systems::move_bot;
use crate::game::types::{Direction, GameOutcome};

/// Pick up every object on the bot's current cell. Returns how many were taken.
pub fn collect_objects(game_state: &mut GameState, bot_index: usize) -> usize {
    let pos = game_state.bots[bot_index].pos;
    let (taken, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut game_state.objects)
        .into_iter()
        .partition(|object| object.pos == pos);
    game_state.objects = kept;

    let bot = &mut game_state.bots[bot_index];
    for object in &taken {
        bot.add_object(object.category);
        debug!(
            "[Rules] turn={} {} collected {} at {}",
            game_state.turn,
            bot.label(),
            object.category.name(),
            pos
        );
    }
    taken.len()
}

/// Resolve one turn.
///
/// Once the turn counter has gone past `max_turns` nothing is applied and the
/// result is [`GameOutcome::Timeout`]. Otherwise the counter is incremented and
/// the moves are applied one bot at a time in a shuffled order. The turn stops
/// early with [`GameOutcome::AllObjectsCollected`] as soon as the board is empty;
/// bots not yet processed keep their position. Moves already applied are never
/// rolled back.
pub fn resolve_turn<R: Rng + ?Sized>(
    game_state: &mut GameState,
    moves: &BTreeMap<usize, Direction>,
    max_turns: u32,
    rng: &mut R,
) -> GameOutcome {
    if game_state.turn > max_turns {
        return GameOutcome::Timeout;
    }
    let Some(next_turn) = game_state.turn.checked_add(1) else {
        return GameOutcome::Timeout;
    };
    game_state.turn = next_turn;

    let mut order: Vec<usize> = moves.keys().copied().collect();
    order.shuffle(rng);

    let mut collected = false;
    for bot_index in order {
        if bot_index >= game_state.bots.len() {
            warn!("[Rules] move for unknown bot index {} ignored", bot_index);
            continue;
        }
        if move_bot(game_state, bot_index, moves[&bot_index]).is_none() {
            continue;
        }

        if collect_objects(game_state, bot_index) > 0 {
            collected = true;
        }
        if game_state.objects.is_empty() {
            return GameOutcome::AllObjectsCollected;
        }
    }

    if collected {
        GameOutcome::ObjectCollected
    } else {
        GameOutcome::InProgress
    }
}
