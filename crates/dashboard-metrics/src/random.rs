//! Injectable randomness
//!
//! Jitter on twin predictions, the fallback route distance and every
//! simulated "live" update draw from a [`RandomSource`] handed in by the
//! caller. Nothing in the workspace touches a global generator.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// A source of uniform draws in `[0, 1)`
pub trait RandomSource {
    /// Next uniform value in `[0, 1)`
    fn next_unit(&mut self) -> f64;

    /// Uniform value in `[low, high)`
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_unit()
    }

    /// Uniform integer in `0..n`; returns 0 when `n` is 0
    fn below(&mut self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        ((self.next_unit() * n as f64).floor() as u32).min(n - 1)
    }
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// ChaCha20-backed source, reproducible when seeded
#[derive(Debug, Clone)]
pub struct SeededSource {
    rng: ChaCha20Rng,
    seed: Option<u64>,
}

impl SeededSource {
    /// Deterministic source for replayable scenarios
    pub fn from_seed(seed: u64) -> Self {
        SeededSource {
            rng: ChaCha20Rng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Source seeded from OS entropy
    pub fn from_entropy() -> Self {
        SeededSource {
            rng: ChaCha20Rng::from_entropy(),
            seed: None,
        }
    }

    /// Seeded when a seed is given, entropy otherwise
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::from_seed(s),
            None => Self::from_entropy(),
        }
    }

    /// The seed this source was created with, if any
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl RandomSource for SeededSource {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed list of unit draws, cycling when exhausted
///
/// Values are clamped into `[0, 1)` so a script can never push a formula
/// outside the range a real generator would produce.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    draws: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(draws: impl Into<Vec<f64>>) -> Self {
        ScriptedSource {
            draws: draws.into(),
            cursor: 0,
        }
    }

    /// Always returns the same draw
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws consumed so far
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 0.0;
        }
        let value = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}
