//! Card value object and the mint that creates cards.
//!
//! `Card` is immutable: a merge destroys two cards and mints a new one with
//! a fresh id, never editing either source. All card creation goes through
//! [`CardMint`], which bundles the id allocator, the luck table, and the
//! game's RNG so every card is rolled from the same deterministic stream.

use serde::{Deserialize, Serialize};

use super::luck::{roll_luck_attributes, LuckAttributes, Tier};
use super::suit::SuitId;
use crate::core::{CardId, CardIdAllocator, LuckConfig, SeededRng};

/// A card instance on the board, in the queue, or in the deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Unique id, monotonic per game.
    pub id: CardId,

    /// Face value, always a power of two.
    pub value: u32,

    /// Luck depth.
    pub tier: Tier,

    /// Flavor category.
    pub suit: SuitId,
}

impl Card {
    /// Create a card from already-rolled luck attributes.
    #[must_use]
    pub fn new(id: CardId, value: u32, luck: LuckAttributes) -> Self {
        Self {
            id,
            value,
            tier: luck.tier,
            suit: luck.suit,
        }
    }

    /// Luck attributes of this card.
    #[must_use]
    pub fn luck(&self) -> LuckAttributes {
        LuckAttributes {
            tier: self.tier,
            suit: self.suit,
        }
    }

    #[must_use]
    pub fn suit_emoji(&self) -> &'static str {
        self.suit.emoji()
    }

    #[must_use]
    pub fn suit_label(&self) -> &'static str {
        self.suit.label()
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} [{}]", self.value, self.suit.emoji(), self.tier.short_label())
    }
}

/// Card factory context.
///
/// Borrowing the three collaborators together keeps card creation in one
/// place: allocate an id, then roll luck. Lineage, when present, is the card
/// a merge grew from.
pub struct CardMint<'a> {
    ids: &'a mut CardIdAllocator,
    luck: &'a LuckConfig,
    rng: &'a mut SeededRng,
}

impl<'a> CardMint<'a> {
    /// Create a mint over a game's allocator, luck table, and RNG.
    pub fn new(ids: &'a mut CardIdAllocator, luck: &'a LuckConfig, rng: &'a mut SeededRng) -> Self {
        Self { ids, luck, rng }
    }

    /// Create a card of `value`, rolled with the lineage of `source` if any.
    pub fn mint(&mut self, value: u32, source: Option<&Card>) -> Card {
        let id = self.ids.alloc();
        let luck = roll_luck_attributes(
            value,
            source.map(|c| c.suit),
            source.map(|c| c.tier),
            self.luck,
            self.rng,
        );
        Card::new(id, value, luck)
    }

    /// The underlying RNG, for shuffles that follow minting.
    pub fn rng(&mut self) -> &mut SeededRng {
        &mut *self.rng
    }
}
