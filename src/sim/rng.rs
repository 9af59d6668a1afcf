//! Injectable random source
//!
//! Every random decision in the simulation (formation sizing, fire rolls,
//! particle jitter, spawn thresholds, starfield placement) draws from one
//! `RandomSource` owned by the game state.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of uniform draws
pub trait RandomSource {
    /// Uniform draw in [0, 1)
    fn next_unit(&mut self) -> f32;

    /// Uniform draw in [lo, hi)
    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_unit()
    }

    /// Integer draw in [lo, hi), floor of a scaled unit draw
    fn index(&mut self, lo: u32, hi: u32) -> u32 {
        let span = hi.saturating_sub(lo);
        let picked = (self.next_unit() * span as f32).floor() as u32;
        lo + picked.min(span.saturating_sub(1))
    }
}

/// PCG-backed source, reproducible from a seed
#[derive(Debug, Clone)]
pub struct SeededRng {
    seed: u64,
    rng: Pcg32,
}

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRng {
    fn next_unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// Replays a fixed sequence of unit draws, cycling when exhausted
///
/// Values are clamped into [0, 1). An empty script always yields 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    values: Vec<f32>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        let values = values
            .into()
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f32::EPSILON))
            .collect();
        Self { values, cursor: 0 }
    }

    /// Source that returns the same draw forever
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws taken so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRng {
    fn next_unit(&mut self) -> f32 {
        if self.values.is_empty() {
            self.cursor += 1;
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
