//! Initial map generation: object placement per category and bot starting cells.

use std::collections::HashSet;

use log::debug;
use rand::Rng;

use crate::config::GameConfig;
use crate::game::entities::GameObject;
use crate::game::types::{Category, Inventory, Position};

/// Everything placed on the board at game start.
#[derive(Debug, Clone, PartialEq)]
pub struct MapLayout {
    pub objects: Vec<GameObject>,
    pub bot_positions: Vec<Position>,
    /// Number of objects generated for each category.
    pub counts: Inventory,
}

fn random_position<R: Rng + ?Sized>(rng: &mut R, size: usize) -> Position {
    Position {
        x: rng.random_range(0..size),
        y: rng.random_range(0..size),
    }
}

/// Generate objects and bot starting positions.
///
/// Objects never share a cell and bots never start on an object, but two bots
/// may start on the same cell. Placement retries until it finds a free cell, so
/// the board must have more cells than objects plus bots or this never returns.
pub fn generate_map<R: Rng + ?Sized>(
    rng: &mut R,
    config: &GameConfig,
    bot_count: usize,
) -> MapLayout {
    let size = config.map_size;
    let upper = config.max_objects_per_category();

    let mut counts = Inventory::default();
    for category in Category::ALL {
        counts[category] = rng.random_range(1..=upper) as u32;
    }

    let mut taken = HashSet::new();
    let mut objects = Vec::with_capacity(counts.total() as usize);
    for (category, count) in counts.iter() {
        for _ in 0..count {
            let pos = loop {
                let candidate = random_position(rng, size);
                if taken.insert(candidate) {
                    break candidate;
                }
            };
            objects.push(GameObject::new(pos, category));
        }
    }

    let bot_positions = (0..bot_count)
        .map(|_| loop {
            let candidate = random_position(rng, size);
            if !taken.contains(&candidate) {
                break candidate;
            }
        })
        .collect();

    debug!("[MapGen] size={} counts={} bots={}", size, counts, bot_count);

    MapLayout {
        objects,
        bot_positions,
        counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn layout_respects_placement_rules() {
        let config = GameConfig { map_size: 10, ..GameConfig::default() };
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let layout = generate_map(&mut rng, &config, 4);

            let unique: HashSet<_> = layout.objects.iter().map(|o| o.pos).collect();
            assert_eq!(unique.len(), layout.objects.len());
            assert_eq!(layout.objects.len() as u32, layout.counts.total());

            for category in Category::ALL {
                let placed =
                    layout.objects.iter().filter(|o| o.category == category).count() as u32;
                assert_eq!(placed, layout.counts[category]);
                assert!((1..=config.max_objects_per_category() as u32).contains(&placed));
            }

            assert_eq!(layout.bot_positions.len(), 4);
            let object_cells = layout.objects.iter().map(|o| o.pos);
            for pos in object_cells.chain(layout.bot_positions.iter().copied()) {
                assert!(pos.in_bounds(config.map_size));
            }
            assert!(layout.bot_positions.iter().all(|p| !unique.contains(p)));
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let config = GameConfig::default();
        let a = generate_map(&mut StdRng::seed_from_u64(7), &config, 2);
        let b = generate_map(&mut StdRng::seed_from_u64(7), &config, 2);
        assert_eq!(a, b);
    }

    #[test]
    fn tiny_board_places_one_object_each() {
        // 2x2 board: max_objects = 1, so every category gets exactly one object,
        // leaving one free cell for the bot.
        let config = GameConfig { map_size: 2, ..GameConfig::default() };
        let layout = generate_map(&mut StdRng::seed_from_u64(1), &config, 1);
        assert_eq!(layout.counts.0, [1, 1, 1]);
        assert!(layout.objects.iter().all(|o| o.pos != layout.bot_positions[0]));
    }
}
