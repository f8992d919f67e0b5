//! Deck builder.
//!
//! A deck is built from a composition table (`count × value` entries) and
//! shuffled with the game RNG. The deck is order-significant: the top card
//! is the back of the list.

use rustc_hash::FxHashMap;

use super::card::{Card, CardMint};
use crate::core::{DeckEntry, SeededRng};

/// Build the cards of a composition table, in table order, unshuffled.
///
/// Every card is rolled independently, without lineage.
pub fn create_finite_deck(composition: &[DeckEntry], mint: &mut CardMint<'_>) -> Vec<Card> {
    let size = composition.iter().map(|e| e.count).sum();
    let mut deck = Vec::with_capacity(size);

    for entry in composition {
        for _ in 0..entry.count {
            deck.push(mint.mint(entry.value, None));
        }
    }

    deck
}

/// Fisher–Yates shuffle in place, one draw per element.
pub fn shuffle_deck(cards: &mut [Card], rng: &mut SeededRng) {
    rng.shuffle(cards);
}

/// Multiset of face values as sorted `(value, count)` pairs.
#[must_use]
pub fn value_histogram<'a>(cards: impl IntoIterator<Item = &'a Card>) -> Vec<(u32, usize)> {
    let mut counts: FxHashMap<u32, usize> = FxHashMap::default();
    for card in cards {
        *counts.entry(card.value).or_default() += 1;
    }

    let mut histogram: Vec<(u32, usize)> = counts.into_iter().collect();
    histogram.sort_unstable_by_key(|&(value, _)| value);
    histogram
}
