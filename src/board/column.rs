//! A single column (stack) of cards.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::ColumnId;

/// Ordered stack of cards. Index 0 is the bottom, the back is the top.
///
/// Backed by `im::Vector` so cloning a column into an undo snapshot is O(1).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub cards: Vector<Card>,
}

impl Column {
    /// Create an empty column.
    #[must_use]
    pub fn new(id: ColumnId) -> Self {
        Self {
            id,
            cards: Vector::new(),
        }
    }

    /// Create a column holding `cards`, bottom first.
    #[must_use]
    pub fn with_cards(id: ColumnId, cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            id,
            cards: cards.into_iter().collect(),
        }
    }

    /// The topmost card, if any.
    #[must_use]
    pub fn top(&self) -> Option<&Card> {
        self.cards.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Put a card on top.
    pub fn push(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    /// Iterate bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Face values bottom to top.
    #[must_use]
    pub fn values(&self) -> Vec<u32> {
        self.cards.iter().map(|c| c.value).collect()
    }
}
