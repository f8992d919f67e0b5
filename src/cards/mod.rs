//! Card system: suits, luck tiers, card instances, and deck building.
//!
//! ## Key Types
//!
//! - `Card`: Immutable value object (id, face value, tier, suit)
//! - `CardMint`: The only way cards are created (id + luck roll)
//! - `Tier` / `SuitId`: The luck layer attached to every card
//!
//! ## Randomness
//!
//! Nothing in this module calls an ambient random source. Every roll and
//! shuffle draws from the `SeededRng` threaded through `CardMint`.

pub mod card;
pub mod deck;
pub mod luck;
pub mod suit;

pub use card::{Card, CardMint};
pub use deck::{create_finite_deck, shuffle_deck, value_histogram};
pub use luck::{pick_suit_for_tier, roll_luck_attributes, roll_luck_tier, LuckAttributes, Tier};
pub use suit::SuitId;
