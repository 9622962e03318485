//! Deterministic 32-bit PRNG
//!
//! A single `u32` of state, advanced by a fixed odd constant and run through
//! a multiply-xor mix. Same seed and call sequence give the same stream on
//! every platform.

use rand::RngCore;

/// Weyl increment added to the state on every draw
const INCREMENT: u32 = 0x6D2B_79F5;
/// Divisor mapping a `u32` onto `[0, 1)`
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Seeded float stream used by terrain generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldRng {
    state: u32,
}

impl WorldRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Seed from a signed world seed (bit-reinterpreted)
    pub fn from_seed(seed: i32) -> Self {
        Self::new(seed as u32)
    }

    /// Next uniform float in `[0, 1)`
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / TWO_POW_32
    }

    /// Draw and test against a probability
    #[inline]
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniform integer in `min..=max` (one draw)
    pub fn range_inclusive(&mut self, min: i32, max: i32) -> i32 {
        let span = (max - min + 1).max(1) as f64;
        min + (self.next_f64() * span).floor() as i32
    }
}

impl RngCore for WorldRng {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    fn next_u64(&mut self) -> u64 {
        let lo = self.next_u32() as u64;
        let hi = self.next_u32() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}
