//! Single-step merge (live play).
//!
//! Only the newest collision point can merge: the top two cards of the
//! column. One call resolves at most one pair; the orchestrator calls again
//! after each animated merge until a step gains nothing.

use im::Vector;
use smallvec::smallvec;

use super::{combine, MergeOutcome, MergeResolution};
use crate::cards::{Card, CardMint};

/// Single-step resolution system.
#[derive(Clone, Copy, Debug, Default)]
pub struct SingleStepMerge;

impl MergeResolution for SingleStepMerge {
    fn resolve(&self, cards: &Vector<Card>, mint: &mut CardMint<'_>) -> MergeOutcome {
        let len = cards.len();
        if len < 2 {
            return MergeOutcome::unchanged(cards);
        }

        let lower = cards[len - 2];
        let upper = cards[len - 1];
        if lower.value != upper.value {
            return MergeOutcome::unchanged(cards);
        }

        let merged = combine(&lower, &upper, mint);
        let mut result = cards.clone();
        result.pop_back();
        result.pop_back();
        result.push_back(merged);

        MergeOutcome {
            cards: result,
            score_gained: u64::from(merged.value),
            merged_card_ids: smallvec![lower.id, upper.id],
            created: smallvec![merged],
        }
    }
}
