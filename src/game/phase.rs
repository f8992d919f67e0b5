//! Merge-resolution state machine.
//!
//! ```text
//!            move
//!   Idle ───────────▶ AwaitingMerge ──(no pair)──▶ Settled ──▶ Idle
//!                        ▲      │
//!                        │      │ (pair found)
//!                        │      ▼
//!                        └── Animating
//! ```
//!
//! Only `Idle` accepts moves. Game over is evaluated in `Settled`, after the
//! chain has drained.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::ColumnId;
use crate::merge::MergeOutcome;

/// Where the orchestrator is in a merge sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MergePhase {
    /// Settled and accepting requests.
    #[default]
    Idle,

    /// Waiting `remaining` before checking `column` for a merge.
    AwaitingMerge { column: ColumnId, remaining: Duration },

    /// `step` is computed and shown; it is applied once `remaining` runs out.
    Animating {
        column: ColumnId,
        step: MergeOutcome,
        remaining: Duration,
    },

    /// The chain on `column` drained; unlock and game over are next.
    Settled { column: ColumnId },
}

impl MergePhase {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, MergePhase::Idle)
    }

    /// Column being resolved, if any.
    #[must_use]
    pub fn column(&self) -> Option<ColumnId> {
        match self {
            MergePhase::Idle => None,
            MergePhase::AwaitingMerge { column, .. }
            | MergePhase::Animating { column, .. }
            | MergePhase::Settled { column } => Some(*column),
        }
    }

    /// Time until the next transition. `None` when idle.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        match self {
            MergePhase::Idle => None,
            MergePhase::AwaitingMerge { remaining, .. } | MergePhase::Animating { remaining, .. } => {
                Some(*remaining)
            }
            MergePhase::Settled { .. } => Some(Duration::ZERO),
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            MergePhase::Idle => "idle",
            MergePhase::AwaitingMerge { .. } => "awaiting-merge",
            MergePhase::Animating { .. } => "animating",
            MergePhase::Settled { .. } => "settled",
        }
    }
}
