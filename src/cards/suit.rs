//! Suit catalog.
//!
//! Fifteen flavor categories, five per luck tier. Emoji, label, and narrative
//! text are pure functions of the suit id, so cards only store the id.

use serde::{Deserialize, Serialize};

use super::luck::Tier;

/// Flavor category of a card, independent of its numeric value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SuitId {
    // Tier 1
    Growth,
    Stagnation,
    Sprout,
    Change,
    Decline,
    // Tier 2
    Love,
    Wealth,
    Completion,
    Happiness,
    Will,
    // Tier 3
    DestinyLove,
    DestinyWealth,
    DestinyHappiness,
    DestinyInsight,
    DestinyDecision,
}

const TIER1_POOL: [SuitId; 5] = [
    SuitId::Growth,
    SuitId::Stagnation,
    SuitId::Sprout,
    SuitId::Change,
    SuitId::Decline,
];

const TIER2_POOL: [SuitId; 5] = [
    SuitId::Love,
    SuitId::Wealth,
    SuitId::Completion,
    SuitId::Happiness,
    SuitId::Will,
];

const TIER3_POOL: [SuitId; 5] = [
    SuitId::DestinyLove,
    SuitId::DestinyWealth,
    SuitId::DestinyHappiness,
    SuitId::DestinyInsight,
    SuitId::DestinyDecision,
];

impl SuitId {
    /// Every suit, tier by tier.
    pub const ALL: [SuitId; 15] = [
        SuitId::Growth,
        SuitId::Stagnation,
        SuitId::Sprout,
        SuitId::Change,
        SuitId::Decline,
        SuitId::Love,
        SuitId::Wealth,
        SuitId::Completion,
        SuitId::Happiness,
        SuitId::Will,
        SuitId::DestinyLove,
        SuitId::DestinyWealth,
        SuitId::DestinyHappiness,
        SuitId::DestinyInsight,
        SuitId::DestinyDecision,
    ];

    /// Suits belonging to a tier, in draw order.
    #[must_use]
    pub fn pool(tier: Tier) -> &'static [SuitId] {
        match tier {
            Tier::Common => &TIER1_POOL,
            Tier::Symbolic => &TIER2_POOL,
            Tier::Destiny => &TIER3_POOL,
        }
    }

    /// The tier this suit belongs to.
    #[must_use]
    pub fn tier(self) -> Tier {
        match self {
            SuitId::Growth | SuitId::Stagnation | SuitId::Sprout | SuitId::Change | SuitId::Decline => {
                Tier::Common
            }
            SuitId::Love | SuitId::Wealth | SuitId::Completion | SuitId::Happiness | SuitId::Will => {
                Tier::Symbolic
            }
            SuitId::DestinyLove
            | SuitId::DestinyWealth
            | SuitId::DestinyHappiness
            | SuitId::DestinyInsight
            | SuitId::DestinyDecision => Tier::Destiny,
        }
    }

    #[must_use]
    pub fn emoji(self) -> &'static str {
        match self {
            SuitId::Growth => "🌿",
            SuitId::Stagnation => "💤",
            SuitId::Sprout => "🌱",
            SuitId::Change => "🔮",
            SuitId::Decline => "🌧️",
            SuitId::Love => "❤️",
            SuitId::Wealth => "💰",
            SuitId::Completion => "🌕",
            SuitId::Happiness => "☀️",
            SuitId::Will => "🔥",
            SuitId::DestinyLove => "💖",
            SuitId::DestinyWealth => "💎",
            SuitId::DestinyHappiness => "🌞",
            SuitId::DestinyInsight => "🪞",
            SuitId::DestinyDecision => "🔱",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SuitId::Growth => "Growth",
            SuitId::Stagnation => "Stagnation",
            SuitId::Sprout => "Beginning",
            SuitId::Change => "Change",
            SuitId::Decline => "Decline",
            SuitId::Love => "Love",
            SuitId::Wealth => "Wealth",
            SuitId::Completion => "Completion",
            SuitId::Happiness => "Happiness",
            SuitId::Will => "Will",
            SuitId::DestinyLove => "Love (Destiny)",
            SuitId::DestinyWealth => "Wealth (Destiny)",
            SuitId::DestinyHappiness => "Happiness (Destiny)",
            SuitId::DestinyInsight => "Insight",
            SuitId::DestinyDecision => "Decision",
        }
    }

    /// One-sentence reading of this suit at a given depth.
    #[must_use]
    pub fn narrative(self, tier: Tier) -> &'static str {
        let [common, symbolic, destiny] = self.narratives();
        match tier {
            Tier::Common => common,
            Tier::Symbolic => symbolic,
            Tier::Destiny => destiny,
        }
    }

    fn narratives(self) -> [&'static str; 3] {
        match self {
            SuitId::Growth => [
                "Steady growth continues. Small habits invite large change.",
                "Growth becomes visible. The fruit of effort can be confirmed.",
                "A surge of growth arrives. A leap to a new level is near.",
            ],
            SuitId::Stagnation => [
                "The flow slows for a while. Catch your breath and rebalance.",
                "A new symbol is born inside the stillness. Read the hidden signs.",
                "A pause before great fortune. Reset your direction and rise.",
            ],
            SuitId::Sprout => [
                "The seed of a new start is growing. Take the first step.",
                "A beginning widens into a meaningful event. Extend your ties.",
                "A destined beginning unfolds. Bold attempts bring real change.",
            ],
            SuitId::Change => [
                "A small change approaches. Flexibility keeps the road smooth.",
                "Change shakes the core. Prepare to alter your patterns.",
                "Fate turns sharply. Choosing change opens great fortune.",
            ],
            SuitId::Decline => [
                "Energy dips for a moment. Focus on rest and recovery.",
                "Even in a lull there is learning. Tidy up and the next step brightens.",
                "A cleansing storm passes. Let go of what you no longer need.",
            ],
            SuitId::Love => [
                "A seed of affection sprouts. Empathy warms your relationships.",
                "The symbol of love shines. Sincerity deepens every bond.",
                "Great fortune in love opens. A relationship leaps forward.",
            ],
            SuitId::Wealth => [
                "Finances settle. Start with a small plan.",
                "The fruit of wealth appears. Focus on offers of real value.",
                "Great fortune in wealth opens. Unexpected chances arrive.",
            ],
            SuitId::Completion => [
                "An air of closure surrounds you. Finish what is left undone.",
                "Completion shows itself. Shared achievements grow larger.",
                "Great fortune in completion unfolds. An ending becomes a new start.",
            ],
            SuitId::Happiness => [
                "Warm happiness seeps in. Look for everyday joys.",
                "The symbol of happiness sparkles. Share the joy around you.",
                "Great fortune in happiness peaks. Blessings arrive in a row.",
            ],
            SuitId::Will => [
                "Resolve hardens. A steady center steadies the flow.",
                "The symbol of will burns. Decisions clear the path.",
                "Great fortune in will ignites. Strong drive moves everything.",
            ],
            SuitId::DestinyLove => [
                "Destined love is foretold. Listen to what moves your heart.",
                "Destined love draws near. A relationship enters a new phase.",
                "Destined love bursts open. A fated meeting takes place.",
            ],
            SuitId::DestinyWealth => [
                "Destined wealth awakens. You gain as much as you prepared.",
                "The door to wealth opens wide. Seize the key opportunity.",
                "Destined wealth overflows. Abundance keeps arriving.",
            ],
            SuitId::DestinyHappiness => [
                "Destined happiness warms up. Grow your sense of gratitude.",
                "Waves of happiness grow. Joy follows joy.",
                "Destined happiness is at its height. Blessings spread through life.",
            ],
            SuitId::DestinyInsight => [
                "Signs of insight appear. Answers show themselves in quiet.",
                "Insight arrives as a symbolic message. Follow your intuition.",
                "Great insight unfolds. Understanding fits every piece together.",
            ],
            SuitId::DestinyDecision => [
                "The spirit of decision stirs. A small but firm choice is needed.",
                "The symbol of decision emerges. Declare your direction clearly.",
                "The hour of decision arrives. Your choice opens your fate.",
            ],
        }
    }
}

impl std::fmt::Display for SuitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.emoji(), self.label())
    }
}
