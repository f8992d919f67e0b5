//! One-time injection of higher-tier cards.

use log::info;

use crate::cards::{create_finite_deck, shuffle_deck, Card, CardMint};
use crate::core::{DeckConfig, GameState};

/// Inject the unlock batch into the deck once a column card reaches the
/// unlock threshold.
///
/// Fires at most once per game. The batch joins the undrawn deck and the
/// whole deck is reshuffled; the board and queue are untouched. Returns the
/// number of cards injected when it fires.
pub fn unlock_higher_tier_cards(
    state: &mut GameState,
    deck: &DeckConfig,
    mint: &mut CardMint<'_>,
) -> Option<usize> {
    if state.higher_tier_cards_added {
        return None;
    }
    if state.max_column_value()? < deck.unlock_threshold {
        return None;
    }

    let batch = create_finite_deck(&deck.unlock_batch, mint);
    let injected = batch.len();

    let mut cards: Vec<Card> = state.deck.iter().copied().chain(batch).collect();
    shuffle_deck(&mut cards, mint.rng());
    state.deck = cards.into_iter().collect();
    state.higher_tier_cards_added = true;

    info!(
        "tier unlock: {injected} cards injected, deck now {}",
        state.deck.len()
    );
    Some(injected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{LuckAttributes, SuitId, Tier};
    use crate::core::{BoardConfig, CardId, CardIdAllocator, LuckConfig, SeededRng};

    fn card(id: u32, value: u32) -> Card {
        Card::new(
            CardId(id),
            value,
            LuckAttributes {
                tier: Tier::Common,
                suit: SuitId::Growth,
            },
        )
    }

    #[test]
    fn test_fires_once_at_threshold() {
        let config = DeckConfig::default();
        let luck = LuckConfig::default();
        let mut ids = CardIdAllocator::new();
        let mut rng = SeededRng::new(3u32);
        let mut mint = CardMint::new(&mut ids, &luck, &mut rng);

        let mut state = GameState::new(&BoardConfig::default());
        state.deck.push_back(card(900, 2));
        state.columns[1].push(card(901, 32));

        assert_eq!(unlock_higher_tier_cards(&mut state, &config, &mut mint), None);
        assert_eq!(state.deck.len(), 1);

        state.columns[1].push(card(902, 64));
        let injected = unlock_higher_tier_cards(&mut state, &config, &mut mint);
        assert_eq!(injected, Some(22));
        assert_eq!(state.deck.len(), 23);
        assert!(state.higher_tier_cards_added);
        assert_eq!(state.deck.iter().filter(|c| c.value == 64).count(), 4);

        state.columns[2].push(card(903, 128));
        assert_eq!(unlock_higher_tier_cards(&mut state, &config, &mut mint), None);
        assert_eq!(state.deck.len(), 23);
    }

    #[test]
    fn test_queue_cards_do_not_trigger() {
        let config = DeckConfig::default();
        let luck = LuckConfig::default();
        let mut ids = CardIdAllocator::new();
        let mut rng = SeededRng::new(3u32);
        let mut mint = CardMint::new(&mut ids, &luck, &mut rng);

        let mut state = GameState::new(&BoardConfig::default());
        state.queue.push_back(card(1, 64));
        assert_eq!(unlock_higher_tier_cards(&mut state, &config, &mut mint), None);
        assert!(!state.higher_tier_cards_added);
    }
}
