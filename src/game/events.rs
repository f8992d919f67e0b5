//! What the orchestrator reports back to its caller.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::Card;
use crate::core::{CardId, ColumnId, Seed};
use crate::rules::GameOverStatus;

/// Something that happened, for the rendering layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// The placeable card landed on `column`; `drawn` entered the queue.
    CardPlaced {
        column: ColumnId,
        card: Card,
        drawn: Option<Card>,
    },
    /// The placeable card went to the trash.
    CardDiscarded { card: Card, drawn: Option<Card> },
    /// A snapshot was restored.
    Undone { score: u64 },
    /// Two cards started colliding; they are now marked animating.
    MergeStarted {
        column: ColumnId,
        card_ids: SmallVec<[CardId; 2]>,
    },
    /// A merge step was applied.
    Merged {
        column: ColumnId,
        card: Card,
        score_gained: u64,
    },
    /// The one-time high-value batch entered the deck.
    TierUnlocked { injected: usize },
    GameOver(GameOverStatus),
    Restarted { seed: Seed },
}

/// Why a request did nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectReason {
    /// A merge sequence is in flight.
    Busy,
    GameOver,
    EmptyQueue,
    UnknownColumn,
    IllegalPlacement,
    ColumnFull,
    NoUndoRemaining,
    NoHistory,
    NoDiscardRemaining,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            RejectReason::Busy => "a merge is in progress",
            RejectReason::GameOver => "the game is over",
            RejectReason::EmptyQueue => "the queue is empty",
            RejectReason::UnknownColumn => "no such column",
            RejectReason::IllegalPlacement => "card is larger than the column's top card",
            RejectReason::ColumnFull => "column is full",
            RejectReason::NoUndoRemaining => "no undo left",
            RejectReason::NoHistory => "nothing to undo",
            RejectReason::NoDiscardRemaining => "no discard left",
        };
        f.write_str(text)
    }
}

/// Result of a request. A rejected request changed nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Accepted(Vec<EngineEvent>),
    Rejected(RejectReason),
}

impl Outcome {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted(_))
    }

    /// Events of an accepted request, empty if rejected.
    #[must_use]
    pub fn events(&self) -> &[EngineEvent] {
        match self {
            Outcome::Accepted(events) => events,
            Outcome::Rejected(_) => &[],
        }
    }

    #[must_use]
    pub fn rejection(&self) -> Option<RejectReason> {
        match self {
            Outcome::Accepted(_) => None,
            Outcome::Rejected(reason) => Some(*reason),
        }
    }
}
