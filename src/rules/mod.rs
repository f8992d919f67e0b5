//! Game rules: the placement rule and the game-over evaluator.
//!
//! There is exactly one placement rule. Both functions are pure: they read a
//! state and never touch it, so the orchestrator can call them at any
//! settled point.

pub mod game_over;
pub mod placement;

pub use game_over::{check_game_over, GameOverReason, GameOverStatus};
pub use placement::{can_place, legal_columns};
