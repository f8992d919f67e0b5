//! Board model: columns, the lookahead queue, and the remaining deck.
//!
//! ## Layout
//!
//! - **Columns**: fixed ids `1..=column_count`, cards built bottom-up
//! - **Queue**: bounded lookahead; the *last* card is the placeable one and
//!   newly drawn cards enter at the *front*
//! - **Deck**: undrawn cards; the top is the back of the list
//!
//! The three containers live on `GameState`; placement and game-over rules
//! that read them live in `rules`.

mod column;

pub use column::Column;
