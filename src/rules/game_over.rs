//! Game-over evaluation.
//!
//! ## Priority
//!
//! Conditions are checked in a fixed order and the first match wins:
//!
//! 1. `Overflow`: a column reached the overflow depth
//! 2. `DeckEmpty`: nothing left in the deck or the queue
//! 3. `Deadlock`: the placeable card fits nowhere and no discard is left
//!
//! The order decides the end-of-game message when several hold at once.

use serde::{Deserialize, Serialize};

use super::placement::can_place;
use crate::core::{BoardConfig, ColumnId, GameState};

/// Why a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameOverReason {
    Overflow,
    DeckEmpty,
    Deadlock,
}

impl std::fmt::Display for GameOverReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            GameOverReason::Overflow => "overflow",
            GameOverReason::DeckEmpty => "deckEmpty",
            GameOverReason::Deadlock => "deadlock",
        };
        f.write_str(text)
    }
}

/// Terminal or non-terminal status of a settled state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameOverStatus {
    pub is_game_over: bool,

    /// Set only for `Overflow`.
    pub trigger_column: Option<ColumnId>,

    pub reason: Option<GameOverReason>,
}

impl GameOverStatus {
    /// The game continues.
    #[must_use]
    pub const fn ongoing() -> Self {
        Self {
            is_game_over: false,
            trigger_column: None,
            reason: None,
        }
    }

    fn over(reason: GameOverReason, trigger_column: Option<ColumnId>) -> Self {
        Self {
            is_game_over: true,
            trigger_column,
            reason: Some(reason),
        }
    }
}

/// Evaluate the game-over conditions against a settled state.
///
/// Must not be called mid-chain: a transient column can look overflowed
/// before its merges collapse it.
#[must_use]
pub fn check_game_over(state: &GameState, board: &BoardConfig) -> GameOverStatus {
    if let Some(column) = state
        .columns
        .iter()
        .find(|column| column.len() >= board.overflow_depth)
    {
        return GameOverStatus::over(GameOverReason::Overflow, Some(column.id));
    }

    if state.deck.is_empty() && state.queue.is_empty() {
        return GameOverStatus::over(GameOverReason::DeckEmpty, None);
    }

    if let Some(card) = state.placeable() {
        let placeable = state.columns.iter().any(|column| can_place(card, column));
        if !placeable && state.discards_remaining == 0 {
            return GameOverStatus::over(GameOverReason::Deadlock, None);
        }
    }

    GameOverStatus::ongoing()
}
