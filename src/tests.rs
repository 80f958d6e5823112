//! End-to-end scenarios across map generation, turn resolution and scoring.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::GameConfig;
use crate::game::entities::{Bot, GameObject};
use crate::game::policy::{BotPolicy, PolicyError, RandomPolicy};
use crate::game::systems::{NullObserver, determine_winners, resolve_turn};
use crate::game::{BoardSnapshot, Category, Direction, Engine, GameOutcome, GameState, Position};

fn assert_conserved(state: &GameState) {
    for category in Category::ALL {
        let held: u32 = state.bots.iter().map(|b| b.inventory[category]).sum();
        assert_eq!(held + state.remaining(category), state.initial_counts[category]);
    }
}

#[test]
fn single_step_onto_the_last_object() {
    let mut state = GameState::from_parts(
        5,
        vec![GameObject::new(Position::new(2, 2), Category::Banana)],
        vec![Bot::new(0, Position::new(2, 1), "a", "")],
    );
    let moves = BTreeMap::from([(0, Direction::Right)]);

    let outcome = resolve_turn(&mut state, &moves, 200, &mut StdRng::seed_from_u64(0));

    assert_eq!(outcome, GameOutcome::AllObjectsCollected);
    assert_eq!(state.bots[0].pos, Position::new(2, 2));
    assert_eq!(state.bots[0].inventory[Category::Banana], 1);
    assert!(state.objects.is_empty());
}

#[test]
fn move_off_the_board_keeps_position() {
    let mut state = GameState::from_parts(
        5,
        vec![GameObject::new(Position::new(4, 4), Category::Coin)],
        vec![Bot::new(0, Position::new(0, 0), "a", "")],
    );
    let moves = BTreeMap::from([(0, Direction::Up)]);

    let outcome = resolve_turn(&mut state, &moves, 200, &mut StdRng::seed_from_u64(0));

    assert_eq!(outcome, GameOutcome::InProgress);
    assert_eq!(state.bots[0].pos, Position::new(0, 0));
    assert_eq!(state.turn, 1);
}

#[test]
fn timeout_leaves_bots_untouched() {
    let mut state = GameState::from_parts(
        5,
        vec![GameObject::new(Position::new(2, 2), Category::Banana)],
        vec![Bot::new(0, Position::new(2, 1), "a", "")],
    );
    state.turn = 201;
    let before = state.bots.clone();

    let moves = BTreeMap::from([(0, Direction::Right)]);
    let outcome = resolve_turn(&mut state, &moves, 200, &mut StdRng::seed_from_u64(0));

    assert_eq!(outcome, GameOutcome::Timeout);
    assert_eq!(state.bots, before);
    assert_eq!(state.objects.len(), 1);
}

#[test]
fn inventory_is_conserved_through_whole_games() {
    for seed in 0..10 {
        let config = GameConfig { seed: Some(seed), map_size: 6, ..GameConfig::default() };
        let mut policies: Vec<Box<dyn BotPolicy>> = (0..3)
            .map(|i| Box::new(RandomPolicy::new(seed * 10 + i)) as Box<dyn BotPolicy>)
            .collect();
        let mut engine = Engine::new(config, &mut policies).unwrap();
        assert_conserved(engine.state());

        loop {
            let outcome = engine.play_turn(&mut NullObserver).unwrap();
            assert_conserved(engine.state());
            for bot in &engine.state().bots {
                assert!(bot.pos.in_bounds(6));
            }
            if outcome.is_terminal() {
                break;
            }
        }
    }
}

#[test]
fn equal_top_standings_mean_no_winner() {
    let mut a = Bot::new(0, Position::new(0, 0), "a", "");
    let mut b = Bot::new(1, Position::new(0, 0), "b", "");
    a.inventory[Category::Banana] = 2;
    b.inventory[Category::Coin] = 2;
    let mut state = GameState::from_parts(3, vec![], vec![a, b]);

    let snapshot = state.take_snapshot();
    assert_eq!(snapshot.bots[0].category_tops, 1);
    assert_eq!(snapshot.bots[1].category_tops, 1);
    assert!(determine_winners(&snapshot.bots).is_empty());
}

/// Walks to the nearest object it can see on the snapshot.
struct Seeker;

impl BotPolicy for Seeker {
    fn name(&self) -> &str {
        "seeker"
    }

    fn group(&self) -> &str {
        "tests"
    }

    fn step(
        &mut self,
        board: &BoardSnapshot,
        _turn: u32,
        position: Position,
    ) -> Result<Direction, PolicyError> {
        let target = board
            .objects()
            .min_by_key(|o| o.pos.x.abs_diff(position.x) + o.pos.y.abs_diff(position.y))
            .ok_or_else(|| PolicyError::Failed("nothing left to chase".into()))?;

        let dx = (target.pos.y as isize - position.y as isize).signum();
        let dy = (target.pos.x as isize - position.x as isize).signum();
        Direction::from_delta(dx, dy).ok_or_else(|| PolicyError::Failed("already there".into()))
    }
}

#[test]
fn a_seeker_clears_the_board_alone() {
    let config =
        GameConfig { seed: Some(21), map_size: 7, max_turns: 1000, ..GameConfig::default() };
    let mut policies: Vec<Box<dyn BotPolicy>> = vec![Box::new(Seeker)];
    let mut engine = Engine::new(config, &mut policies).unwrap();

    let report = engine.run(&mut NullObserver).unwrap();

    assert_eq!(report.outcome, GameOutcome::AllObjectsCollected);
    assert_eq!(report.winners, vec![0]);
    let bot = &engine.state().bots[0];
    assert_eq!(bot.group, "tests");
    assert_eq!(bot.inventory, engine.state().initial_counts);
}
