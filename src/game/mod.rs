//! Game orchestration.
//!
//! [`Orchestrator`] is the only component that mutates a `GameState`. It
//! sequences:
//!
//! - queue to column moves and deck replenishment
//! - the single-step merge loop, one animated merge at a time
//! - the one-time tier unlock
//! - game-over detection and the fortune report
//! - the undo and discard budgets
//!
//! Renderers read settled snapshots through the accessors and react to the
//! [`EngineEvent`]s returned from each call.

mod events;
mod history;
mod orchestrator;
mod phase;
mod setup;
mod unlock;

pub use events::{EngineEvent, Outcome, RejectReason};
pub use history::UndoHistory;
pub use orchestrator::Orchestrator;
pub use phase::MergePhase;
pub use setup::setup_game;
pub use unlock::unlock_higher_tier_cards;
