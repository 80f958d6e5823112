//! Category standings and winner selection.
//!
//! A bot "tops" a category when it alone holds the highest count for it. Ties
//! count as a loss for everyone involved, both per category and for the overall
//! win.

use crate::game::entities::Bot;
use crate::game::types::Category;

/// Number of categories each bot tops, indexed like `bots`.
///
/// The running maximum starts at zero, so bots holding nothing still compete:
/// a lone bot with an empty inventory tops every category, and two bots at zero
/// tie.
pub fn category_tops(bots: &[Bot]) -> Vec<u32> {
    let mut tops = vec![0; bots.len()];

    for category in Category::ALL {
        let mut best = 0;
        let mut leaders: Vec<usize> = Vec::new();

        for (slot, bot) in bots.iter().enumerate() {
            let count = bot.inventory[category];
            if count > best {
                best = count;
                leaders.clear();
            }
            if count == best {
                leaders.push(slot);
            }
        }

        if let [leader] = leaders.as_slice() {
            tops[*leader] += 1;
        }
    }

    tops
}

/// Indices of the winning bots according to their stored `category_tops`.
///
/// Returns a single index, or nothing when the best lead count is shared (or
/// there are no bots).
pub fn determine_winners(bots: &[Bot]) -> Vec<usize> {
    let Some(best) = bots.iter().map(|bot| bot.category_tops).max() else {
        return Vec::new();
    };

    let winners: Vec<usize> = bots
        .iter()
        .filter(|bot| bot.category_tops == best)
        .map(|bot| bot.index)
        .collect();

    if winners.len() > 1 { Vec::new() } else { winners }
}
