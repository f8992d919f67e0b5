//! Requests from the input layer, and the log of accepted ones.
//!
//! The engine does not care how a request was produced (drag, click, key).
//! Accepted requests are recorded with a sequence number so a game can be
//! replayed from its seed.

use serde::{Deserialize, Serialize};

use super::ids::ColumnId;
use super::rng::Seed;

/// A request from the input layer.
///
/// ## Example
///
/// ```
/// use fortune_stack::core::{Action, ColumnId};
///
/// let place = Action::Move(ColumnId::new(2));
/// assert!(place.is_move());
/// assert!(!Action::Undo.is_move());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Place the queue's current card onto a column.
    Move(ColumnId),
    /// Roll back to the previous settled state.
    Undo,
    /// Throw away the queue's current card.
    Discard,
    /// Discard the whole game and start over from a new seed.
    Restart(Seed),
}

impl Action {
    /// Check if this action is a placement.
    #[must_use]
    pub fn is_move(&self) -> bool {
        matches!(self, Action::Move(_))
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Move(column) => write!(f, "move to {column}"),
            Action::Undo => write!(f, "undo"),
            Action::Discard => write!(f, "discard"),
            Action::Restart(seed) => write!(f, "restart with seed {seed}"),
        }
    }
}

/// An accepted action with its position in the game's history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The action taken.
    pub action: Action,

    /// Sequence number, starting at 0 for each game.
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(action: Action, sequence: u32) -> Self {
        Self { action, sequence }
    }
}
