//! Engine configuration.
//!
//! Every tuning constant of the game lives here rather than in the code that
//! uses it:
//! - `LuckConfig`: value thresholds to tier weights, suit retention chance
//! - `DeckConfig`: base deck composition and the one-time unlock batch
//! - `BoardConfig`: column count, overflow depth, queue size, setup deal
//! - `BudgetConfig`: undo and discard budgets, undo history depth
//! - `TimingConfig`: animation delays the merge state machine waits on
//! - `FortuneConfig`: report sizes, volatility weights and cutoffs
//!
//! All sections deserialize with defaults, so a JSON document only needs the
//! fields it overrides.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Categorical distribution over the three luck tiers.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TierWeights {
    pub tier1: f64,
    pub tier2: f64,
    pub tier3: f64,
}

impl TierWeights {
    /// Create a new weight triple.
    #[must_use]
    pub const fn new(tier1: f64, tier2: f64, tier3: f64) -> Self {
        Self { tier1, tier2, tier3 }
    }

    /// Sum of the three weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.tier1 + self.tier2 + self.tier3
    }
}

/// One row of the evolution table: applies to values `>= threshold`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvolutionRow {
    pub threshold: u32,
    pub weights: TierWeights,
}

/// Luck roll configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LuckConfig {
    /// Evolution table, any order. The row with the largest threshold not
    /// above a card's value applies.
    pub evolution: Vec<EvolutionRow>,

    /// Chance that a merge keeps its source card's suit when the tier repeats.
    pub retention_chance: f64,
}

impl Default for LuckConfig {
    fn default() -> Self {
        let row = |threshold, tier1, tier2, tier3| EvolutionRow {
            threshold,
            weights: TierWeights::new(tier1, tier2, tier3),
        };
        Self {
            evolution: vec![
                row(2, 1.0, 0.0, 0.0),
                row(4, 1.0, 0.0, 0.0),
                row(8, 1.0, 0.0, 0.0),
                row(16, 0.9, 0.1, 0.0),
                row(32, 0.9, 0.1, 0.0),
                row(64, 0.9, 0.1, 0.0),
                row(128, 0.85, 0.1, 0.05),
                row(256, 0.8, 0.15, 0.05),
                row(512, 0.7, 0.2, 0.1),
                row(1024, 0.3, 0.4, 0.3),
                row(2048, 0.0, 0.5, 0.5),
            ],
            retention_chance: 0.5,
        }
    }
}

impl LuckConfig {
    /// Tier weights for a card value.
    ///
    /// Values below every threshold fall back to the smallest row; an empty
    /// table always yields tier 1.
    #[must_use]
    pub fn weights_for(&self, value: u32) -> TierWeights {
        let eligible = self
            .evolution
            .iter()
            .filter(|row| row.threshold <= value)
            .max_by_key(|row| row.threshold);
        let fallback = || self.evolution.iter().min_by_key(|row| row.threshold);

        eligible
            .or_else(fallback)
            .map(|row| row.weights)
            .unwrap_or(TierWeights::new(1.0, 0.0, 0.0))
    }
}

/// A `count × value` entry of a deck composition table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckEntry {
    pub value: u32,
    pub count: usize,
}

impl DeckEntry {
    #[must_use]
    pub const fn new(value: u32, count: usize) -> Self {
        Self { value, count }
    }
}

/// Deck composition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Cards present from the start.
    pub base: Vec<DeckEntry>,

    /// Injected into the remaining deck once per game.
    pub unlock_batch: Vec<DeckEntry>,

    /// The unlock fires when any column holds a card at least this large.
    pub unlock_threshold: u32,

    /// Value of the fresh cards seeding the queue at setup.
    pub queue_seed_value: u32,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            base: vec![
                DeckEntry::new(2, 24),
                DeckEntry::new(4, 18),
                DeckEntry::new(8, 12),
                DeckEntry::new(16, 6),
            ],
            unlock_batch: vec![DeckEntry::new(32, 18), DeckEntry::new(64, 4)],
            unlock_threshold: 64,
            queue_seed_value: 2,
        }
    }
}

impl DeckConfig {
    /// Total number of cards in the base composition.
    #[must_use]
    pub fn base_size(&self) -> usize {
        self.base.iter().map(|e| e.count).sum()
    }

    /// Sum of face values in the base composition.
    #[must_use]
    pub fn base_value(&self) -> u64 {
        composition_value(&self.base)
    }

    /// Sum of face values in the unlock batch.
    #[must_use]
    pub fn unlock_value(&self) -> u64 {
        composition_value(&self.unlock_batch)
    }
}

fn composition_value(entries: &[DeckEntry]) -> u64 {
    entries
        .iter()
        .map(|e| u64::from(e.value) * e.count as u64)
        .sum()
}

/// Board geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Number of columns, ids `1..=column_count`.
    pub column_count: u8,

    /// A column holding this many cards ends the game.
    pub overflow_depth: usize,

    /// Lookahead buffer size.
    pub queue_size: usize,

    /// Cards dealt to each column at setup.
    pub deal_per_column: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            column_count: 4,
            overflow_depth: 8,
            queue_size: 3,
            deal_per_column: 2,
        }
    }
}

/// Consumable, non-replenishing budgets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetConfig {
    pub undo: u32,
    pub discard: u32,
    /// Settled snapshots kept for undo.
    pub history_depth: usize,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            undo: 2,
            discard: 1,
            history_depth: 2,
        }
    }
}

/// Animation pauses of the merge state machine, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub merge_start_delay_ms: u64,
    pub merge_settle_delay_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            merge_start_delay_ms: 100,
            merge_settle_delay_ms: 600,
        }
    }
}

impl TimingConfig {
    /// Pause between a placement and the first merge check.
    #[must_use]
    pub fn merge_start_delay(&self) -> Duration {
        Duration::from_millis(self.merge_start_delay_ms)
    }

    /// Pause while a merge animates before it is applied.
    #[must_use]
    pub fn merge_settle_delay(&self) -> Duration {
        Duration::from_millis(self.merge_settle_delay_ms)
    }
}

/// Fortune report tuning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FortuneConfig {
    pub top_cards: usize,
    pub dominant_suits: usize,

    pub tier1_weight: i64,
    pub tier2_weight: i64,
    pub tier3_weight: i64,

    /// Scores at or below this are `stable`.
    pub stable_max: i64,
    /// Scores at or below this (and above `stable_max`) are `mixed`.
    pub mixed_max: i64,

    /// Tier-3 count that earns the strongest summary label.
    pub surge_tier3_count: u32,
}

impl Default for FortuneConfig {
    fn default() -> Self {
        Self {
            top_cards: 6,
            dominant_suits: 4,
            tier1_weight: -1,
            tier2_weight: 1,
            tier3_weight: 2,
            stable_max: 0,
            mixed_max: 3,
            surge_tier3_count: 3,
        }
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub luck: LuckConfig,
    pub deck: DeckConfig,
    pub board: BoardConfig,
    pub budgets: BudgetConfig,
    pub timing: TimingConfig,
    pub fortune: FortuneConfig,
}

impl EngineConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON document and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the board section.
    #[must_use]
    pub fn with_board(mut self, board: BoardConfig) -> Self {
        self.board = board;
        self
    }

    /// Replace the deck section.
    #[must_use]
    pub fn with_deck(mut self, deck: DeckConfig) -> Self {
        self.deck = deck;
        self
    }

    /// Replace the budget section.
    #[must_use]
    pub fn with_budgets(mut self, budgets: BudgetConfig) -> Self {
        self.budgets = budgets;
        self
    }

    /// Replace the timing section.
    #[must_use]
    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    /// Replace the luck section.
    #[must_use]
    pub fn with_luck(mut self, luck: LuckConfig) -> Self {
        self.luck = luck;
        self
    }

    /// Replace the fortune section.
    #[must_use]
    pub fn with_fortune(mut self, fortune: FortuneConfig) -> Self {
        self.fortune = fortune;
        self
    }

    /// Check every section for values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for row in &self.luck.evolution {
            let w = row.weights;
            if w.tier1 < 0.0 || w.tier2 < 0.0 || w.tier3 < 0.0 {
                return Err(ConfigError::NegativeWeight { threshold: row.threshold });
            }
            let sum = w.total();
            if (sum - 1.0).abs() > 1e-9 {
                return Err(ConfigError::TierWeights { threshold: row.threshold, sum });
            }
        }
        if !(0.0..=1.0).contains(&self.luck.retention_chance) {
            return Err(ConfigError::RetentionChance(self.luck.retention_chance));
        }

        if self.deck.base_size() == 0 {
            return Err(ConfigError::EmptyDeck);
        }
        let values = self
            .deck
            .base
            .iter()
            .chain(&self.deck.unlock_batch)
            .map(|e| e.value)
            .chain([self.deck.queue_seed_value, self.deck.unlock_threshold]);
        for value in values {
            if !value.is_power_of_two() {
                return Err(ConfigError::NotPowerOfTwo(value));
            }
        }

        if self.board.column_count == 0 {
            return Err(ConfigError::NoColumns);
        }
        if self.board.queue_size == 0 {
            return Err(ConfigError::ZeroQueue);
        }
        if self.board.overflow_depth == 0 {
            return Err(ConfigError::ZeroOverflowDepth);
        }

        let f = &self.fortune;
        if f.stable_max > f.mixed_max {
            return Err(ConfigError::VolatilityCutoffs {
                stable_max: f.stable_max,
                mixed_max: f.mixed_max,
            });
        }

        Ok(())
    }
}
