//! Deterministic random number generation from string or numeric seeds.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces an identical sequence on every platform
//! - **String seeds**: Text is hashed (xmur3) into a 32-bit starting state
//! - **Daily seeds**: `daily_seed` formats a calendar day plus an optional salt
//! - **Serializable**: The whole generator is a 32-bit counter and a draw count
//!
//! The stream is Mulberry32: a counter-based 32-bit generator whose output is
//! bit-for-bit specified, so a seed reproduces the same game anywhere.
//!
//! ## Usage
//!
//! ```
//! use fortune_stack::core::{create_seeded_random, daily_seed};
//! use chrono::NaiveDate;
//!
//! let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let seed = daily_seed(date, "player-7");
//! assert_eq!(seed, "2024-01-01:player-7");
//!
//! let mut rng1 = create_seeded_random(seed.as_str());
//! let mut rng2 = create_seeded_random(seed.as_str());
//! assert_eq!(rng1.next_f64(), rng2.next_f64());
//! ```

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Seed accepted by [`SeededRng::new`].
///
/// Numbers are used as the starting state directly; text is hashed first.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seed {
    /// A textual seed such as a daily seed string.
    Text(String),
    /// A raw 32-bit starting state.
    Number(u32),
}

impl Seed {
    /// Resolve this seed to the generator's 32-bit starting state.
    #[must_use]
    pub fn normalize(&self) -> u32 {
        match self {
            Seed::Text(text) => xmur3(text),
            Seed::Number(n) => *n,
        }
    }
}

impl From<&str> for Seed {
    fn from(s: &str) -> Self {
        Seed::Text(s.to_string())
    }
}

impl From<String> for Seed {
    fn from(s: String) -> Self {
        Seed::Text(s)
    }
}

impl From<u32> for Seed {
    fn from(n: u32) -> Self {
        Seed::Number(n)
    }
}

impl From<u64> for Seed {
    /// Only the low 32 bits are kept.
    fn from(n: u64) -> Self {
        Seed::Number(n as u32)
    }
}

impl std::fmt::Display for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Seed::Text(text) => write!(f, "{text}"),
            Seed::Number(n) => write!(f, "{n}"),
        }
    }
}

/// xmur3 string hash over UTF-16 code units, first output only.
fn xmur3(text: &str) -> u32 {
    let units: Vec<u16> = text.encode_utf16().collect();
    let mut h = 1_779_033_703u32 ^ units.len() as u32;
    for unit in units {
        h = (h ^ u32::from(unit)).wrapping_mul(3_432_918_353);
        h = h.rotate_left(13);
    }
    h = (h ^ (h >> 16)).wrapping_mul(2_246_822_507);
    h = (h ^ (h >> 13)).wrapping_mul(3_266_489_909);
    h ^ (h >> 16)
}

/// Deterministic Mulberry32 generator.
///
/// Engine code draws floats in `[0, 1)` through [`SeededRng::next_f64`]; the
/// number of draws each operation consumes is part of its contract, so the
/// generator also counts them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeededRng {
    state: u32,
    draws: u64,
}

impl SeededRng {
    /// Create a new generator from any seed.
    #[must_use]
    pub fn new(seed: impl Into<Seed>) -> Self {
        Self::from_state(seed.into().normalize())
    }

    /// Create a generator starting at a raw 32-bit state.
    #[must_use]
    pub const fn from_state(state: u32) -> Self {
        Self { state, draws: 0 }
    }

    /// Produce the next raw 32-bit output.
    pub fn next_raw(&mut self) -> u32 {
        self.draws += 1;
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let s = self.state;
        let mut t = (s ^ (s >> 15)).wrapping_mul(1 | s);
        t = t.wrapping_add((t ^ (t >> 7)).wrapping_mul(61 | t)) ^ t;
        t ^ (t >> 14)
    }

    /// Produce a float in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_raw()) / 4_294_967_296.0
    }

    /// Pick an index in `0..len` from one draw. `len` must be non-zero.
    pub fn gen_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "gen_index on empty range");
        let index = (self.next_f64() * len as f64) as usize;
        index.min(len.saturating_sub(1))
    }

    /// Return true with the given probability, consuming one draw.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }

    /// Fisher–Yates shuffle, one draw per remaining element.
    ///
    /// Walks from the back: pick `j` in `0..i`, decrement `i`, swap.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        let mut current = slice.len();
        while current != 0 {
            let random_index = self.gen_index(current);
            current -= 1;
            slice.swap(current, random_index);
        }
    }

    /// Number of outputs produced so far.
    #[must_use]
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Current raw state.
    #[must_use]
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl rand::RngCore for SeededRng {
    fn next_u32(&mut self) -> u32 {
        self.next_raw()
    }

    fn next_u64(&mut self) -> u64 {
        let low = u64::from(self.next_raw());
        let high = u64::from(self.next_raw());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_raw().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl rand::SeedableRng for SeededRng {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::from_state(u32::from_le_bytes(seed))
    }
}

/// Create a deterministic generator from a string or numeric seed.
#[must_use]
pub fn create_seeded_random(seed: impl Into<Seed>) -> SeededRng {
    SeededRng::new(seed)
}

/// Format a calendar day as `YYYY-MM-DD`, suffixed with `:salt` when the
/// salt is non-empty.
#[must_use]
pub fn daily_seed(date: NaiveDate, salt: &str) -> String {
    let day = format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day());
    if salt.is_empty() {
        day
    } else {
        format!("{day}:{salt}")
    }
}
