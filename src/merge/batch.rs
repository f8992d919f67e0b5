//! Batch merge (setup).
//!
//! Scans the column bottom to top for the first equal adjacent pair, merges
//! it, and restarts the scan. Stops when a full pass finds nothing or fewer
//! than two cards remain.

use im::Vector;
use smallvec::SmallVec;

use super::{combine, MergeOutcome, MergeResolution};
use crate::cards::{Card, CardMint};

/// Batch resolution system.
#[derive(Clone, Copy, Debug, Default)]
pub struct BatchMerge;

fn first_pair(cards: &Vector<Card>) -> Option<usize> {
    (0..cards.len().saturating_sub(1)).find(|&i| cards[i].value == cards[i + 1].value)
}

impl MergeResolution for BatchMerge {
    fn resolve(&self, cards: &Vector<Card>, mint: &mut CardMint<'_>) -> MergeOutcome {
        let mut result = cards.clone();
        let mut score_gained = 0;
        let mut merged_card_ids = SmallVec::new();
        let mut created = SmallVec::new();

        while result.len() >= 2 {
            let Some(i) = first_pair(&result) else {
                break;
            };

            let lower = result[i];
            let upper = result.remove(i + 1);
            let merged = combine(&lower, &upper, mint);
            result.set(i, merged);

            score_gained += u64::from(merged.value);
            merged_card_ids.push(lower.id);
            merged_card_ids.push(upper.id);
            created.push(merged);
        }

        MergeOutcome {
            cards: result,
            score_gained,
            merged_card_ids,
            created,
        }
    }
}
