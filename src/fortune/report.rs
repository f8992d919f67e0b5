//! Fortune report value types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, SuitId, Tier};

/// Card count per luck tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TierCounts {
    pub tier1: u32,
    pub tier2: u32,
    pub tier3: u32,
}

impl TierCounts {
    /// Count for one tier.
    #[must_use]
    pub fn get(&self, tier: Tier) -> u32 {
        match tier {
            Tier::Common => self.tier1,
            Tier::Symbolic => self.tier2,
            Tier::Destiny => self.tier3,
        }
    }

    /// Add one card of `tier`.
    pub fn record(&mut self, tier: Tier) {
        match tier {
            Tier::Common => self.tier1 += 1,
            Tier::Symbolic => self.tier2 += 1,
            Tier::Destiny => self.tier3 += 1,
        }
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.tier1 + self.tier2 + self.tier3
    }
}

/// One entry of the dominant-suit ranking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuitHighlight {
    pub suit: SuitId,
    pub suit_emoji: String,
    pub suit_label: String,
    pub count: u32,
}

impl SuitHighlight {
    /// Start a highlight from the first card seen with this suit.
    #[must_use]
    pub fn from_card(card: &Card) -> Self {
        Self {
            suit: card.suit,
            suit_emoji: card.suit_emoji().to_string(),
            suit_label: card.suit_label().to_string(),
            count: 1,
        }
    }
}

/// Three-way classification of the volatility score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Volatility {
    Stable,
    Mixed,
    Volatile,
}

impl std::fmt::Display for Volatility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Volatility::Stable => "stable",
            Volatility::Mixed => "mixed",
            Volatility::Volatile => "volatile",
        };
        f.write_str(text)
    }
}

/// Headline of a report, strongest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SummaryLabel {
    /// Enough destiny-grade cards to dominate the board.
    DestinySurge,
    /// At least one destiny-grade card.
    DestinyRising,
    /// Symbolic cards at least match everyday ones.
    SymbolicFocus,
    /// Everyday cards dominate.
    EverydayCycle,
    /// Nothing on the board or in the queue.
    NoData,
}

impl SummaryLabel {
    /// Display headline.
    #[must_use]
    pub fn headline(self) -> &'static str {
        match self {
            SummaryLabel::DestinySurge => "✨ Destiny Surge ✨",
            SummaryLabel::DestinyRising => "✨ Destiny Rising ✨",
            SummaryLabel::SymbolicFocus => "Symbolic Energy Focus",
            SummaryLabel::EverydayCycle => "Everyday Energy Cycle",
            SummaryLabel::NoData => "No fortune data",
        }
    }
}

impl std::fmt::Display for SummaryLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.headline())
    }
}

/// End-of-game luck summary.
///
/// Produced once when the game ends and never mutated afterwards. A
/// recomputation replaces the whole report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FortuneReport {
    /// Highest-value cards, descending.
    pub top_cards: Vec<Card>,

    pub highest_card: Option<Card>,

    pub tier_counts: TierCounts,

    /// Most frequent suits, by count descending. Ties keep first-seen order.
    pub dominant_suits: SmallVec<[SuitHighlight; 4]>,

    pub tier3_count: u32,

    pub volatility: Volatility,

    /// Weighted tier sum the volatility class was cut from.
    pub volatility_score: i64,

    pub summary_label: SummaryLabel,

    /// Reading of the highest card's suit at its tier.
    pub summary_detail: String,

    /// One line per dominant suit, then an optional volatility line.
    pub narrative_lines: Vec<String>,

    pub timestamp: DateTime<Utc>,
}

impl FortuneReport {
    /// Check whether the report was built from an empty population.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.highest_card.is_none()
    }
}
