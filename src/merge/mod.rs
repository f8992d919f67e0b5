//! Merge resolution.
//!
//! Two equal adjacent cards collapse into one card of double the value; the
//! new card's value is added to the score. Two resolution systems exist:
//!
//! - [`SingleStepMerge`]: live play. Looks only at the top two cards and
//!   resolves at most one pair, so each collision can be animated.
//! - [`BatchMerge`]: setup. Rescans the whole column after every merge until
//!   nothing is left to merge, with no animation.
//!
//! Both agree when the only equal pair is the top two cards and the chain is
//! driven to completion.
//!
//! ## Example Usage
//!
//! ```
//! use fortune_stack::cards::{Card, CardMint, LuckAttributes, SuitId, Tier};
//! use fortune_stack::core::{CardId, CardIdAllocator, LuckConfig, SeededRng};
//! use fortune_stack::merge::process_chain_merge;
//!
//! let luck = LuckAttributes { tier: Tier::Common, suit: SuitId::Growth };
//! let cards: im::Vector<Card> = [16, 8, 8]
//!     .iter()
//!     .enumerate()
//!     .map(|(i, &v)| Card::new(CardId(i as u32 + 1), v, luck))
//!     .collect();
//!
//! let mut ids = CardIdAllocator::new();
//! let config = LuckConfig::default();
//! let mut rng = SeededRng::new(42u32);
//! let mut mint = CardMint::new(&mut ids, &config, &mut rng);
//!
//! let outcome = process_chain_merge(&cards, &mut mint);
//! assert_eq!(outcome.score_gained, 16);
//! assert_eq!(outcome.cards.iter().map(|c| c.value).collect::<Vec<_>>(), vec![16, 16]);
//! ```

mod batch;
mod single_step;

pub use batch::BatchMerge;
pub use single_step::SingleStepMerge;

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, CardMint};
use crate::core::CardId;

/// Result of running a resolution system over a column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeOutcome {
    /// Column contents after resolution, bottom first.
    pub cards: Vector<Card>,

    /// Sum of the values of every card created.
    pub score_gained: u64,

    /// Ids of the cards destroyed, in merge order.
    pub merged_card_ids: SmallVec<[CardId; 2]>,

    /// Cards created, in merge order.
    pub created: SmallVec<[Card; 1]>,
}

impl MergeOutcome {
    /// An outcome with no merges.
    #[must_use]
    pub fn unchanged(cards: &Vector<Card>) -> Self {
        Self {
            cards: cards.clone(),
            score_gained: 0,
            merged_card_ids: SmallVec::new(),
            created: SmallVec::new(),
        }
    }

    /// Check whether any merge happened.
    #[must_use]
    pub fn merged(&self) -> bool {
        !self.created.is_empty()
    }
}

/// Trait for merge resolution systems.
pub trait MergeResolution {
    /// Resolve merges over a column's cards.
    ///
    /// Never mutates the input; new cards are created through `mint`.
    fn resolve(&self, cards: &Vector<Card>, mint: &mut CardMint<'_>) -> MergeOutcome;
}

/// Collapse `lower` and `upper` into a new card of double value.
///
/// The new card's luck is rolled with `lower` as lineage: the card the
/// newcomer landed on.
pub(crate) fn combine(lower: &Card, upper: &Card, mint: &mut CardMint<'_>) -> Card {
    debug_assert_eq!(lower.value, upper.value);
    mint.mint(lower.value.saturating_mul(2), Some(lower))
}

/// Single-step merge over the top two cards.
pub fn process_chain_merge(cards: &Vector<Card>, mint: &mut CardMint<'_>) -> MergeOutcome {
    SingleStepMerge.resolve(cards, mint)
}

/// Resolve every merge in a column at once.
pub fn process_all_merges(cards: &Vector<Card>, mint: &mut CardMint<'_>) -> MergeOutcome {
    BatchMerge.resolve(cards, mint)
}
