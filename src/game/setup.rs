//! New-game construction.

use im::Vector;
use log::info;

use crate::cards::{create_finite_deck, shuffle_deck, Card, CardMint};
use crate::core::{EngineConfig, GameState};
use crate::merge::process_all_merges;

/// Build the initial state of a game.
///
/// 1. Build and shuffle the base deck
/// 2. Deal round-robin over the columns, `deal_per_column` rounds
/// 3. Sort each column descending, then batch-merge it into the score
/// 4. Seed the queue with fresh cards of `queue_seed_value`, removing as
///    many cards of that value from the deck
///
/// Everything is drawn from `mint`, so a seed reproduces the board exactly.
pub fn setup_game(config: &EngineConfig, mint: &mut CardMint<'_>) -> GameState {
    let mut cards = create_finite_deck(&config.deck.base, mint);
    shuffle_deck(&mut cards, mint.rng());
    let mut deck: Vector<Card> = cards.into_iter().collect();

    let mut state = GameState::new(&config.board);

    for _ in 0..config.board.deal_per_column {
        for column in &mut state.columns {
            if let Some(card) = deck.pop_back() {
                column.push(card);
            }
        }
    }

    for column in &mut state.columns {
        let mut dealt: Vec<Card> = column.cards.iter().copied().collect();
        dealt.sort_by(|a, b| b.value.cmp(&a.value));
        let dealt: Vector<Card> = dealt.into_iter().collect();
        let outcome = process_all_merges(&dealt, mint);
        column.cards = outcome.cards;
        state.score += outcome.score_gained;
    }

    let seed_value = config.deck.queue_seed_value;
    for _ in 0..config.board.queue_size {
        state.queue.push_back(mint.mint(seed_value, None));
    }
    for _ in 0..config.board.queue_size {
        if let Some(index) = deck.iter().position(|c| c.value == seed_value) {
            deck.remove(index);
        }
    }

    state.deck = deck;
    state.undo_remaining = config.budgets.undo;
    state.discards_remaining = config.budgets.discard;

    info!(
        "new game: {} cards in deck, initial score {}",
        state.deck.len(),
        state.score
    );
    state
}
