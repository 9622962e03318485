//! 1D octave value noise
//!
//! Gradients live on the integer lattice and are drawn lazily from the
//! field's own PRNG the first time a lattice point is touched, then cached
//! for the lifetime of the field. No precomputed permutation table, so the
//! domain is unbounded.

use std::collections::HashMap;

use super::rng::WorldRng;
use crate::config::GenerationConfig;
use crate::error::ConfigError;

/// XOR'd into the world seed so noise draws don't mirror the generator's
const DECORRELATE: u32 = 0x9E37_79B9;

/// Smoothstep easing: t²(3 − 2t)
#[inline]
pub fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

/// Seeded octave noise over the real line
#[derive(Debug, Clone)]
pub struct NoiseField {
    rng: WorldRng,
    gradients: HashMap<i64, f64>,
    frequency: f64,
    octaves: u32,
    persistence: f64,
}

impl NoiseField {
    pub fn new(seed: i32, params: &GenerationConfig) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self {
            rng: Self::field_rng(seed),
            gradients: HashMap::new(),
            frequency: params.frequency,
            octaves: params.octaves,
            persistence: params.persistence,
        })
    }

    fn field_rng(seed: i32) -> WorldRng {
        WorldRng::new(seed as u32 ^ DECORRELATE)
    }

    /// Reset to a fresh seed, dropping every cached gradient
    pub fn reseed(&mut self, seed: i32) {
        self.rng = Self::field_rng(seed);
        self.gradients.clear();
    }

    /// Number of lattice points drawn so far
    pub fn cached_points(&self) -> usize {
        self.gradients.len()
    }

    /// Gradient at a lattice point, drawing it on first use
    fn gradient(&mut self, cell: i64) -> f64 {
        let rng = &mut self.rng;
        *self
            .gradients
            .entry(cell)
            .or_insert_with(|| rng.next_f64() * 2.0 - 1.0)
    }

    /// Sample the field at `x`; result lies in `[-1, 1]`
    pub fn sample(&mut self, x: f64) -> f64 {
        let mut sum = 0.0;
        let mut total_amplitude = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = self.frequency;

        for _ in 0..self.octaves {
            let scaled = x * frequency;
            let cell = scaled.floor();
            let t = scaled - cell;
            let cell = cell as i64;

            // Left neighbor first: draw order is part of the seed contract
            let g0 = self.gradient(cell);
            let g1 = self.gradient(cell + 1);
            let value = g0 + (g1 - g0) * smoothstep(t);

            sum += value * amplitude;
            total_amplitude += amplitude;
            amplitude *= self.persistence;
            frequency *= 2.0;
        }

        sum / total_amplitude
    }
}
