//! Error types for the few fallible seams of the engine.
//!
//! Gameplay requests never fail: an invalid move is reported as a rejected
//! outcome and leaves the state untouched. `Result` is reserved for loading
//! configuration, encoding state, and the external narrative collaborator.

/// Configuration the engine cannot run with.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("deck composition is empty")]
    EmptyDeck,

    #[error("card value {0} is not a power of two")]
    NotPowerOfTwo(u32),

    #[error("tier weights for threshold {threshold} sum to {sum}, expected 1")]
    TierWeights { threshold: u32, sum: f64 },

    #[error("tier weights for threshold {threshold} contain a negative entry")]
    NegativeWeight { threshold: u32 },

    #[error("suit retention chance {0} is outside [0, 1]")]
    RetentionChance(f64),

    #[error("board needs at least one column")]
    NoColumns,

    #[error("queue size must be at least 1")]
    ZeroQueue,

    #[error("overflow depth must be at least 1")]
    ZeroOverflowDepth,

    #[error("volatility cutoffs out of order: stable_max {stable_max} > mixed_max {mixed_max}")]
    VolatilityCutoffs { stable_max: i64, mixed_max: i64 },

    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure of the external narrative collaborator.
///
/// Never affects engine state; the fortune report stays valid without prose.
#[derive(Debug, thiserror::Error)]
pub enum NarrativeError {
    #[error("no fortune report is available yet")]
    NoReport,

    #[error("narrative service unreachable: {0}")]
    Transport(String),

    #[error("narrative service returned an error: {0}")]
    Service(String),

    #[error("narrative service returned an empty summary")]
    EmptySummary,

    #[error("narrative payload JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Top-level engine error.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Narrative(#[from] NarrativeError),

    #[error("failed to encode game state: {0}")]
    Encode(#[from] bincode::Error),
}
