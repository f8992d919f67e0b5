//! Game state: columns, queue, deck, score, and budgets.
//!
//! ## GameState
//!
//! The complete, settled-or-transient state of one game. Only the
//! orchestrator mutates it; every other component reads snapshots.
//!
//! ## Snapshot
//!
//! The payload of one undo step: board containers, score, unlock flag, and
//! the trash pile. Budgets are not part of it: restoring a snapshot never
//! refunds an undo or a discard.
//!
//! Containers use `im::Vector`, so taking a snapshot is O(1).

use im::Vector;
use serde::{Deserialize, Serialize};

use super::config::BoardConfig;
use super::ids::ColumnId;
use crate::board::Column;
use crate::cards::Card;
use crate::error::EngineError;

/// Full state of one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Columns with ids `1..=n`, in id order.
    pub columns: Vec<Column>,

    /// Lookahead buffer. The back is the placeable card.
    pub queue: Vector<Card>,

    /// Undrawn cards. The back is the top of the deck.
    pub deck: Vector<Card>,

    /// Sum of all merge gains so far.
    pub score: u64,

    /// Whether the one-time unlock batch has been injected.
    pub higher_tier_cards_added: bool,

    /// Undo requests left.
    pub undo_remaining: u32,

    /// Discard requests left.
    pub discards_remaining: u32,

    /// Cards removed by discard, oldest first.
    pub trash: Vector<Card>,

    /// Play time accumulated by the driver, in milliseconds.
    pub elapsed_ms: u64,
}

impl GameState {
    /// Create an empty board for the given geometry, with zeroed budgets.
    #[must_use]
    pub fn new(board: &BoardConfig) -> Self {
        Self {
            columns: ColumnId::all(board.column_count).map(Column::new).collect(),
            queue: Vector::new(),
            deck: Vector::new(),
            score: 0,
            higher_tier_cards_added: false,
            undo_remaining: 0,
            discards_remaining: 0,
            trash: Vector::new(),
            elapsed_ms: 0,
        }
    }

    // === Columns ===

    /// Look up a column by id.
    #[must_use]
    pub fn column(&self, id: ColumnId) -> Option<&Column> {
        id.index().and_then(|i| self.columns.get(i))
    }

    /// Look up a column by id, mutably.
    pub fn column_mut(&mut self, id: ColumnId) -> Option<&mut Column> {
        let index = id.index()?;
        self.columns.get_mut(index)
    }

    // === Queue ===

    /// The card a move would place.
    #[must_use]
    pub fn placeable(&self) -> Option<&Card> {
        self.queue.last()
    }

    /// Remove and return the placeable card.
    pub fn take_placeable(&mut self) -> Option<Card> {
        self.queue.pop_back()
    }

    /// Draw the deck's top card into the front of the queue.
    ///
    /// Returns the drawn card, or `None` once the deck is exhausted.
    pub fn draw_into_queue(&mut self) -> Option<Card> {
        let card = self.deck.pop_back()?;
        self.queue.push_front(card);
        Some(card)
    }

    // === Population ===

    /// Every live card: columns bottom-up, then queue, then deck.
    pub fn live_cards(&self) -> impl Iterator<Item = &Card> {
        self.columns
            .iter()
            .flat_map(|c| c.iter())
            .chain(self.queue.iter())
            .chain(self.deck.iter())
    }

    /// Sum of face values over live cards and the trash pile.
    ///
    /// Merges preserve this total, so it equals the value of every card ever
    /// put into the game.
    #[must_use]
    pub fn accounted_value(&self) -> u64 {
        self.live_cards()
            .chain(self.trash.iter())
            .map(|c| u64::from(c.value))
            .sum()
    }

    /// Largest face value on the board.
    #[must_use]
    pub fn max_column_value(&self) -> Option<u32> {
        self.columns.iter().flat_map(|c| c.iter()).map(|c| c.value).max()
    }

    // === Snapshots ===

    /// Capture an undo snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            columns: self.columns.clone(),
            queue: self.queue.clone(),
            deck: self.deck.clone(),
            score: self.score,
            higher_tier_cards_added: self.higher_tier_cards_added,
            trash: self.trash.clone(),
        }
    }

    /// Restore a snapshot. Budgets and elapsed time are left untouched.
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.columns = snapshot.columns;
        self.queue = snapshot.queue;
        self.deck = snapshot.deck;
        self.score = snapshot.score;
        self.higher_tier_cards_added = snapshot.higher_tier_cards_added;
        self.trash = snapshot.trash;
    }

    /// Canonical byte encoding of the state.
    ///
    /// Two states are identical exactly when their fingerprints are.
    pub fn fingerprint(&self) -> Result<Vec<u8>, EngineError> {
        Ok(bincode::serialize(self)?)
    }
}

/// One undo step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub columns: Vec<Column>,
    pub queue: Vector<Card>,
    pub deck: Vector<Card>,
    pub score: u64,
    pub higher_tier_cards_added: bool,
    pub trash: Vector<Card>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{LuckAttributes, SuitId, Tier};
    use crate::core::CardId;

    fn card(id: u32, value: u32) -> Card {
        Card::new(
            CardId(id),
            value,
            LuckAttributes {
                tier: Tier::Common,
                suit: SuitId::Sprout,
            },
        )
    }

    #[test]
    fn test_new_state() {
        let state = GameState::new(&BoardConfig::default());

        assert_eq!(state.columns.len(), 4);
        assert_eq!(state.columns[0].id, ColumnId(1));
        assert_eq!(state.columns[3].id, ColumnId(4));
        assert!(state.queue.is_empty());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_column_lookup() {
        let mut state = GameState::new(&BoardConfig::default());

        assert!(state.column(ColumnId(0)).is_none());
        assert!(state.column(ColumnId(5)).is_none());

        state.column_mut(ColumnId(3)).unwrap().push(card(1, 4));
        assert_eq!(state.column(ColumnId(3)).unwrap().len(), 1);
    }

    #[test]
    fn test_queue_draw_enters_front() {
        let mut state = GameState::new(&BoardConfig::default());
        state.queue = Vector::from(vec![card(1, 2), card(2, 4)]);
        state.deck = Vector::from(vec![card(3, 8), card(4, 16)]);

        assert_eq!(state.placeable().map(|c| c.value), Some(4));
        assert_eq!(state.take_placeable().map(|c| c.id), Some(CardId(2)));

        let drawn = state.draw_into_queue();
        assert_eq!(drawn.map(|c| c.id), Some(CardId(4))); // Deck top is the back
        assert_eq!(state.queue[0].id, CardId(4));
        assert_eq!(state.placeable().map(|c| c.id), Some(CardId(1)));
    }

    #[test]
    fn test_draw_from_empty_deck() {
        let mut state = GameState::new(&BoardConfig::default());
        assert!(state.draw_into_queue().is_none());
        assert!(state.queue.is_empty());
    }

    #[test]
    fn test_accounted_value_includes_trash() {
        let mut state = GameState::new(&BoardConfig::default());
        state.columns[0].push(card(1, 8));
        state.queue.push_back(card(2, 2));
        state.deck.push_back(card(3, 4));
        state.trash.push_back(card(4, 16));

        assert_eq!(state.accounted_value(), 30);
        assert_eq!(state.live_cards().count(), 3);
        assert_eq!(state.max_column_value(), Some(8));
    }

    #[test]
    fn test_snapshot_restore_keeps_budgets() {
        let mut state = GameState::new(&BoardConfig::default());
        state.undo_remaining = 2;
        state.queue.push_back(card(1, 2));
        let snapshot = state.snapshot();

        state.queue.clear();
        state.score = 40;
        state.undo_remaining = 1;
        state.restore(snapshot);

        assert_eq!(state.queue.len(), 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.undo_remaining, 1);
    }

    #[test]
    fn test_fingerprint_distinguishes_states() {
        let mut a = GameState::new(&BoardConfig::default());
        let b = a.clone();
        assert_eq!(a.fingerprint().unwrap(), b.fingerprint().unwrap());

        a.score = 1;
        assert_ne!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
    }
}
