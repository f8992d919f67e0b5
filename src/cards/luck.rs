//! Luck attribute roller.
//!
//! Every card carries a tier (how deep its luck runs) and a suit (which way
//! it points). Both are rolled from the card's face value:
//!
//! 1. **Tier**: one draw against the evolution row for the value.
//! 2. **Retention**: if the merge source's tier equals the new tier and its
//!    suit belongs to that tier, one draw decides whether to keep the suit.
//! 3. **Suit**: unless retained, one draw picks uniformly from the tier pool.
//!
//! The draw sequence is fixed; replays depend on it.

use serde::{Deserialize, Serialize};

use super::suit::SuitId;
use crate::core::{LuckConfig, SeededRng};

/// Luck depth of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// Tier 1: everyday flow.
    Common,
    /// Tier 2: symbolic fruit.
    Symbolic,
    /// Tier 3: destiny-grade.
    Destiny,
}

impl Tier {
    /// All tiers, ascending.
    pub const ALL: [Tier; 3] = [Tier::Common, Tier::Symbolic, Tier::Destiny];

    /// Numeric tier (1-3).
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Tier::Common => 1,
            Tier::Symbolic => 2,
            Tier::Destiny => 3,
        }
    }

    /// Tier from its number.
    #[must_use]
    pub const fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Tier::Common),
            2 => Some(Tier::Symbolic),
            3 => Some(Tier::Destiny),
            _ => None,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Tier::Common => "Everyday flow",
            Tier::Symbolic => "Symbolic fruit",
            Tier::Destiny => "Great fortune",
        }
    }

    #[must_use]
    pub fn short_label(self) -> &'static str {
        match self {
            Tier::Common => "Tier 1",
            Tier::Symbolic => "Tier 2",
            Tier::Destiny => "Destiny",
        }
    }
}

/// Rolled tier + suit of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LuckAttributes {
    pub tier: Tier,
    pub suit: SuitId,
}

/// Roll a tier for a face value. Consumes exactly one draw.
pub fn roll_luck_tier(value: u32, config: &LuckConfig, rng: &mut SeededRng) -> Tier {
    let weights = config.weights_for(value);
    let roll = rng.next_f64();

    if roll < weights.tier1 {
        Tier::Common
    } else if roll < weights.tier1 + weights.tier2 {
        Tier::Symbolic
    } else {
        Tier::Destiny
    }
}

/// Pick a suit from a tier's pool, possibly keeping `previous`.
///
/// `previous` is only eligible when it belongs to `tier`.
pub fn pick_suit_for_tier(
    tier: Tier,
    previous: Option<SuitId>,
    config: &LuckConfig,
    rng: &mut SeededRng,
) -> SuitId {
    if let Some(previous) = previous.filter(|suit| suit.tier() == tier) {
        if rng.chance(config.retention_chance) {
            return previous;
        }
    }

    let pool = SuitId::pool(tier);
    pool[rng.gen_index(pool.len())]
}

/// Roll tier and suit for a card of `value`.
///
/// `previous_suit`/`previous_tier` carry a merge source's lineage; a fresh
/// card passes `None` for both. The suit can only be retained when the new
/// tier equals `previous_tier`.
pub fn roll_luck_attributes(
    value: u32,
    previous_suit: Option<SuitId>,
    previous_tier: Option<Tier>,
    config: &LuckConfig,
    rng: &mut SeededRng,
) -> LuckAttributes {
    let tier = roll_luck_tier(value, config, rng);
    let lineage = previous_suit.filter(|_| previous_tier == Some(tier));
    let suit = pick_suit_for_tier(tier, lineage, config, rng);

    LuckAttributes { tier, suit }
}
