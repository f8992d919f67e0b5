//! Fortune aggregation over the final card population.

use chrono::{DateTime, Utc};
use im::Vector;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::report::{FortuneReport, SuitHighlight, SummaryLabel, TierCounts, Volatility};
use crate::board::Column;
use crate::cards::{Card, SuitId, Tier};
use crate::core::FortuneConfig;

const EMPTY_DETAIL: &str = "No fortune summary can be produced.";
const VOLATILE_LINE: &str = "⚡ Luck swings widely. Prepare for fast-changing currents.";
const STABLE_LINE: &str = "🌙 The flow is calm. Consistency is the key.";

/// Build a fortune report from the board and the queue.
///
/// Pure apart from `timestamp`, which is copied into the report as is.
#[must_use]
pub fn evaluate_fortune(
    columns: &[Column],
    queue: &Vector<Card>,
    config: &FortuneConfig,
    timestamp: DateTime<Utc>,
) -> FortuneReport {
    let mut cards: Vec<Card> = columns
        .iter()
        .flat_map(|column| column.iter().copied())
        .chain(queue.iter().copied())
        .collect();
    // Stable: equal values keep board-then-queue order
    cards.sort_by(|a, b| b.value.cmp(&a.value));

    let highest_card = cards.first().copied();
    let tier_counts = count_tiers(&cards);
    let dominant_suits = rank_suits(&cards, config.dominant_suits);
    let volatility_score = volatility_score(&tier_counts, config);
    let volatility = classify_volatility(volatility_score, config);
    let summary_label = summary_label(&tier_counts, highest_card.as_ref(), config);

    let summary_detail = highest_card.map_or_else(
        || EMPTY_DETAIL.to_string(),
        |card| card.suit.narrative(card.tier).to_string(),
    );
    let narrative_lines = narrative_lines(&dominant_suits, volatility);

    cards.truncate(config.top_cards);

    FortuneReport {
        top_cards: cards,
        highest_card,
        tier_counts,
        dominant_suits,
        tier3_count: tier_counts.tier3,
        volatility,
        volatility_score,
        summary_label,
        summary_detail,
        narrative_lines,
        timestamp,
    }
}

fn count_tiers(cards: &[Card]) -> TierCounts {
    let mut counts = TierCounts::default();
    for card in cards {
        counts.record(card.tier);
    }
    counts
}

/// Group by suit in first-seen order, then stable-sort by count.
fn rank_suits(cards: &[Card], keep: usize) -> SmallVec<[SuitHighlight; 4]> {
    let mut index: FxHashMap<SuitId, usize> = FxHashMap::default();
    let mut highlights: Vec<SuitHighlight> = Vec::new();

    for card in cards {
        match index.get(&card.suit) {
            Some(&i) => highlights[i].count += 1,
            None => {
                index.insert(card.suit, highlights.len());
                highlights.push(SuitHighlight::from_card(card));
            }
        }
    }

    highlights.sort_by(|a, b| b.count.cmp(&a.count));
    highlights.into_iter().take(keep).collect()
}

/// Weighted linear combination of the tier counts.
#[must_use]
pub fn volatility_score(counts: &TierCounts, config: &FortuneConfig) -> i64 {
    i64::from(counts.tier1) * config.tier1_weight
        + i64::from(counts.tier2) * config.tier2_weight
        + i64::from(counts.tier3) * config.tier3_weight
}

#[must_use]
pub fn classify_volatility(score: i64, config: &FortuneConfig) -> Volatility {
    if score <= config.stable_max {
        Volatility::Stable
    } else if score <= config.mixed_max {
        Volatility::Mixed
    } else {
        Volatility::Volatile
    }
}

/// Decision tree over the histogram and the highest card, first match wins.
#[must_use]
pub fn summary_label(
    counts: &TierCounts,
    highest: Option<&Card>,
    config: &FortuneConfig,
) -> SummaryLabel {
    let Some(highest) = highest else {
        return SummaryLabel::NoData;
    };
    if counts.tier3 >= config.surge_tier3_count {
        SummaryLabel::DestinySurge
    } else if highest.tier == Tier::Destiny {
        SummaryLabel::DestinyRising
    } else if counts.tier2 >= counts.tier1 {
        SummaryLabel::SymbolicFocus
    } else {
        SummaryLabel::EverydayCycle
    }
}

fn narrative_lines(highlights: &[SuitHighlight], volatility: Volatility) -> Vec<String> {
    let mut lines: Vec<String> = highlights
        .iter()
        .map(|h| {
            let narrative = h.suit.narrative(h.suit.tier());
            format!("{} {}: {}", h.suit_emoji, h.suit_label, narrative)
        })
        .collect();

    match volatility {
        Volatility::Volatile => lines.push(VOLATILE_LINE.to_string()),
        Volatility::Stable => lines.push(STABLE_LINE.to_string()),
        Volatility::Mixed => {}
    }
    lines
}
