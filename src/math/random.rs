//! Random sources shared by every generation stage
//!
//! Batches draw from [`SeededRandom`] so a seed fully determines the output.
//! Rerolls draw from [`EntropyRandom`] and are never reproducible.

use rand::{Rng, SeedableRng, rngs::StdRng};
use std::time::{SystemTime, UNIX_EPOCH};

/// Odd increment added to the state before each draw
const STATE_INCREMENT: u32 = 0x6D2B_79F5;
/// Divisor mapping a 32-bit output onto [0, 1)
const NORMALIZER: f64 = 4_294_967_296.0;

/// Capability to produce uniformly distributed floats in [0, 1)
///
/// Stages only depend on this trait, never on which implementation is active.
pub trait RandomSource {
    /// Draw the next value in [0, 1)
    fn next_f64(&mut self) -> f64;

    /// Draw uniformly from [min, max)
    fn range(&mut self, min: f64, max: f64) -> f64 {
        self.next_f64().mul_add(max - min, min)
    }

    /// Draw uniformly from [-magnitude, magnitude)
    fn symmetric(&mut self, magnitude: f64) -> f64 {
        self.range(-magnitude, magnitude)
    }

    /// Return true with the given probability
    fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }

    /// Draw an index in 0..len (0 when `len` is 0)
    fn index(&mut self, len: usize) -> usize {
        let scaled = (self.next_f64() * len as f64) as usize;
        scaled.min(len.saturating_sub(1))
    }
}

/// Advance a generator state by one draw
///
/// Pure function of the state, identical on every platform.
pub const fn step(state: u32) -> (u32, f64) {
    let next = state.wrapping_add(STATE_INCREMENT);
    let mut t = (next ^ (next >> 15)).wrapping_mul(next | 1);
    t = t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61)) ^ t;
    let output = t ^ (t >> 14);
    (next, output as f64 / NORMALIZER)
}

/// Deterministic generator threading a single 32-bit state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeededRandom {
    state: u32,
}

impl SeededRandom {
    /// Create a generator starting from the given seed
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Current internal state
    pub const fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        let (next, value) = step(self.state);
        self.state = next;
        value
    }
}

/// Non-reproducible generator backed by operating system entropy
#[derive(Debug, Clone)]
pub struct EntropyRandom {
    rng: StdRng,
}

impl Default for EntropyRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl EntropyRandom {
    /// Create a generator seeded from the thread-local entropy source
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }
}

impl RandomSource for EntropyRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// How the batch seed is obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seed {
    /// Sum of the UTF-16 code units of a phrase
    Text(String),
    /// Explicit numeric seed
    Value(u32),
    /// Wall-clock milliseconds, truncated to 32 bits
    Clock,
}

impl Seed {
    /// Interpret optional user text, falling back to the clock when absent or empty
    pub fn from_text(text: Option<&str>) -> Self {
        match text {
            Some(phrase) if !phrase.is_empty() => Self::Text(phrase.to_string()),
            _ => Self::Clock,
        }
    }

    /// Resolve to the numeric seed used by [`SeededRandom`]
    pub fn resolve(&self) -> u32 {
        match self {
            Self::Text(phrase) => text_seed(phrase),
            Self::Value(value) => *value,
            Self::Clock => clock_seed(),
        }
    }
}

/// Sum the UTF-16 code units of a phrase with wrapping arithmetic
pub fn text_seed(phrase: &str) -> u32 {
    phrase
        .encode_utf16()
        .fold(0u32, |acc, unit| acc.wrapping_add(u32::from(unit)))
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u32)
        .unwrap_or_default()
}
