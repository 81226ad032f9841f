//! Pseudo-random noise for the workloads.
//!
//! Every family injects randomness solely to defeat compiler and memory
//! optimizations (constant folding, zero-page mapping, copy-on-write), not
//! for statistical quality. The process-wide seed is captured exactly once
//! from the wall clock at first use and never implicitly reseeded; tests use
//! [`Noise::seeded`] for reproducible sequences.

use std::time::{SystemTime, UNIX_EPOCH};

use once_cell::sync::Lazy;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seed captured once at process start, shared by all wall-clock noise
/// sources created afterwards.
static PROCESS_SEED: Lazy<u64> = Lazy::new(|| {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(0);
    tracing::debug!(seed, "captured process-wide noise seed");
    seed
});

/// The process-wide seed (wall-clock microseconds at first use).
pub fn process_seed() -> u64 {
    *PROCESS_SEED
}

/// A small, fast, non-cryptographic noise source.
#[derive(Debug, Clone)]
pub struct Noise {
    rng: SmallRng,
}

impl Noise {
    /// Noise seeded from the process-wide wall-clock seed.
    pub fn from_wall_clock() -> Self {
        Self::seeded(process_seed())
    }

    /// Deterministically seeded noise, for tests and oracles.
    pub fn seeded(seed: u64) -> Self {
        Self { rng: SmallRng::seed_from_u64(seed) }
    }

    /// Next raw 64-bit noise word.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.rng.gen()
    }

    /// Next raw 32-bit noise word.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.rng.gen()
    }

    /// Next noise byte.
    #[inline]
    pub fn next_byte(&mut self) -> u8 {
        self.rng.gen()
    }

    /// Uniform value in `[0, bound)`. `bound` must be non-zero.
    #[inline]
    pub fn below(&mut self, bound: u64) -> u64 {
        self.rng.gen_range(0..bound)
    }

    /// Uniform float in `[0, 1)`.
    #[inline]
    pub fn unit_f64(&mut self) -> f64 {
        self.rng.gen()
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for rng.
    use super::*;

    /// Validates `Noise::seeded` behavior for the deterministic sequence
    /// scenario.
    ///
    /// Assertions:
    /// - Confirms two sources with the same seed emit identical words.
    /// - Confirms a differently seeded source diverges.
    #[test]
    fn test_seeded_noise_is_deterministic() {
        let mut a = Noise::seeded(42);
        let mut b = Noise::seeded(42);
        let words_a: Vec<u64> = (0..16).map(|_| a.next_u64()).collect();
        let words_b: Vec<u64> = (0..16).map(|_| b.next_u64()).collect();
        assert_eq!(words_a, words_b);

        let mut c = Noise::seeded(43);
        let words_c: Vec<u64> = (0..16).map(|_| c.next_u64()).collect();
        assert_ne!(words_a, words_c);
    }

    /// Validates `Noise::below` and `Noise::unit_f64` range contracts.
    ///
    /// Assertions:
    /// - Ensures `below(8)` stays under 8.
    /// - Ensures `unit_f64` stays in `[0, 1)`.
    #[test]
    fn test_bounded_draws_stay_in_range() {
        let mut noise = Noise::seeded(7);
        for _ in 0..1_000 {
            assert!(noise.below(8) < 8);
            let x = noise.unit_f64();
            assert!((0.0..1.0).contains(&x));
        }
    }

    /// Validates `process_seed` behavior for the stable-seed scenario.
    ///
    /// Assertions:
    /// - Confirms repeated reads return the same value.
    #[test]
    fn test_process_seed_is_stable() {
        assert_eq!(process_seed(), process_seed());
    }
}
