//! # fortune-stack
//!
//! Deterministic card engine for a single-player stacking game with a luck
//! layer.
//!
//! Power-of-two cards are drawn from a finite deck into a three-card queue
//! and placed onto four columns under a descending-stack rule. Equal
//! adjacent values merge upward into doubled cards and the merged value is
//! scored. Every card also carries a luck tier and a suit, and the final
//! board is summarized into a fortune report when the game ends.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: one seed reproduces the whole game. All randomness
//!    flows through an explicitly threaded `SeededRng`.
//!
//! 2. **Single Owner**: `Orchestrator` is the only code that mutates state.
//!    Everything else is a pure function over a snapshot.
//!
//! 3. **Safe To Call Blindly**: invalid requests are rejected without side
//!    effects instead of failing.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: columns, queue, and deck are `im`
//!   vectors, so undo snapshots are O(1) clones.
//!
//! - **Explicit Merge State Machine**: `Idle → AwaitingMerge → Animating →
//!   Settled`, driven by elapsed time instead of timers.
//!
//! ## Modules
//!
//! - `core`: Ids, seeded RNG, configuration, state, actions
//! - `cards`: Suits, luck tiers, cards, deck building
//! - `board`: Columns
//! - `merge`: Single-step and batch merge resolution
//! - `rules`: Placement rule and game-over evaluation
//! - `fortune`: End-of-game fortune aggregation
//! - `game`: The orchestrator
//! - `narrative`: Seam to an external text-completion service

pub mod board;
pub mod cards;
pub mod core;
pub mod error;
pub mod fortune;
pub mod game;
pub mod merge;
pub mod narrative;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    create_seeded_random, daily_seed, Action, ActionRecord, CardId, ColumnId, EngineConfig,
    GameState, Seed, SeededRng, Snapshot,
};

pub use crate::board::Column;

pub use crate::cards::{
    create_finite_deck, roll_luck_attributes, shuffle_deck, Card, CardMint, LuckAttributes,
    SuitId, Tier,
};

pub use crate::merge::{
    process_all_merges, process_chain_merge, BatchMerge, MergeOutcome, MergeResolution,
    SingleStepMerge,
};

pub use crate::rules::{can_place, check_game_over, GameOverReason, GameOverStatus};

pub use crate::fortune::{evaluate_fortune, FortuneReport, SummaryLabel, Volatility};

pub use crate::game::{EngineEvent, MergePhase, Orchestrator, Outcome, RejectReason};

pub use crate::narrative::{NarrativeRequest, NarrativeService};

pub use crate::error::{ConfigError, EngineError, NarrativeError};
