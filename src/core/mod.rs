//! Core engine types: ids, seeded RNG, configuration, state, actions.
//!
//! These are the leaves every other module builds on. Nothing here knows
//! about merge rules or game-over conditions.

pub mod action;
pub mod config;
pub mod ids;
pub mod rng;
pub mod state;

pub use action::{Action, ActionRecord};
pub use config::{
    BoardConfig, BudgetConfig, DeckConfig, DeckEntry, EngineConfig, EvolutionRow, FortuneConfig,
    LuckConfig, TierWeights, TimingConfig,
};
pub use ids::{CardId, CardIdAllocator, ColumnId};
pub use rng::{create_seeded_random, daily_seed, Seed, SeededRng};
pub use state::{GameState, Snapshot};
