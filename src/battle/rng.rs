//! Injectable randomness for the resolvers.
//!
//! Every random decision the engine makes goes through a [`RandomSource`], so a
//! caller can swap the thread generator for a seeded or fully scripted one and
//! get reproducible outcomes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniform draws in `[0, 1)`. Drawing never fails.
pub trait RandomSource {
    /// Returns the next draw. `reason` names the decision it feeds and is only
    /// used for tracing.
    fn next_unit(&mut self, reason: &str) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self, reason: &str) -> f64 {
        (**self).next_unit(reason)
    }
}

/// Maps a unit draw onto `[low, high)`.
pub fn uniform_between(
    rng: &mut (impl RandomSource + ?Sized),
    reason: &str,
    low: f64,
    high: f64,
) -> f64 {
    low + (high - low) * rng.next_unit(reason)
}

/// Picks an index in `0..len` from one draw. `len` must be non-zero.
pub fn pick_index(rng: &mut (impl RandomSource + ?Sized), reason: &str, len: usize) -> usize {
    let scaled = (rng.next_unit(reason) * len as f64) as usize;
    scaled.min(len.saturating_sub(1))
}

/// Draws from the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_unit(&mut self, reason: &str) -> f64 {
        let value: f64 = rand::rng().random();
        tracing::trace!(value, reason, "random draw");
        value
    }
}

/// A seedable generator: the same seed always yields the same sequence.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self, reason: &str) -> f64 {
        let value: f64 = self.rng.random();
        tracing::trace!(value, reason, seeded = true, "random draw");
        value
    }
}

/// Replays a fixed list of draws, wrapping around when exhausted.
///
/// Values are clamped into `[0, 1]`. An empty script always yields `0.0`.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    outcomes: Vec<f64>,
    index: usize,
}

impl ScriptedRandom {
    pub fn new(outcomes: Vec<f64>) -> Self {
        Self { outcomes, index: 0 }
    }

    /// Number of draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.index
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self, reason: &str) -> f64 {
        if self.outcomes.is_empty() {
            return 0.0;
        }
        let value = self.outcomes[self.index % self.outcomes.len()].clamp(0.0, 1.0);
        tracing::trace!(value, reason, index = self.index, "scripted draw");
        self.index += 1;
        value
    }
}
