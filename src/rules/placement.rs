//! Descending-stack placement rule.

use crate::board::Column;
use crate::cards::Card;
use crate::core::{ColumnId, GameState};

/// Check whether `card` may be placed on `column`.
///
/// An empty column accepts anything. Otherwise the card's value must not
/// exceed the top card's value. Suit and tier never matter.
///
/// ## Example
///
/// ```
/// use fortune_stack::board::Column;
/// use fortune_stack::cards::{Card, LuckAttributes, SuitId, Tier};
/// use fortune_stack::core::{CardId, ColumnId};
/// use fortune_stack::rules::can_place;
///
/// let luck = LuckAttributes { tier: Tier::Common, suit: SuitId::Growth };
/// let eight = Card::new(CardId(1), 8, luck);
/// assert!(can_place(&eight, &Column::new(ColumnId(1))));
/// ```
#[must_use]
pub fn can_place(card: &Card, column: &Column) -> bool {
    column.top().map_or(true, |top| card.value <= top.value)
}

/// Columns the placeable card could go to, in id order.
///
/// Empty when the queue is empty.
#[must_use]
pub fn legal_columns(state: &GameState) -> Vec<ColumnId> {
    let Some(card) = state.placeable() else {
        return Vec::new();
    };
    state
        .columns
        .iter()
        .filter(|column| can_place(card, column))
        .map(|column| column.id)
        .collect()
}
