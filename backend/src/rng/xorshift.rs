//! xorshift64* random number generator
//!
//! Fast, high-quality PRNG suitable for simulation work: 64-bit state,
//! 64-bit output, passes BigCrush.
//!
//! # Determinism
//!
//! Same seed → same sequence. This is what makes two runs with identical
//! `step` call sequences produce bit-identical trajectories, and what makes
//! a restored checkpoint continue exactly where the original left off.

use serde::{Deserialize, Serialize};

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use hospital_simulator_core_rs::RngManager;
///
/// let mut rng = RngManager::new(12345);
/// let u = rng.next_f64();        // uniform in [0, 1)
/// let stay = rng.exponential(3.0); // exponential with mean 3 days
/// assert!(u >= 0.0 && u < 1.0);
/// assert!(stay >= 0.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    /// Internal state (64-bit, never zero)
    state: u64,
}

impl RngManager {
    /// Create a new RNG with the given seed.
    ///
    /// A zero seed is mapped to 1 (xorshift requires non-zero state).
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate the next random u64, advancing the internal state.
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Generate a random f64 in `[0.0, 1.0)`.
    pub fn next_f64(&mut self) -> f64 {
        let value = self.next_u64();
        // Top 53 bits → [0, 1) with full double precision.
        (value >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }

    /// Draw from an exponential distribution with the given mean.
    ///
    /// Inversion sampling: `-ln(1 - U) * mean` with `U` uniform in `[0, 1)`,
    /// so the argument to `ln` stays in `(0, 1]` and the result is always
    /// finite and non-negative.
    pub fn exponential(&mut self, mean: f64) -> f64 {
        let u = self.next_f64();
        -(1.0 - u).ln() * mean
    }

    /// Current RNG state, for checkpointing and replay.
    pub fn get_state(&self) -> u64 {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_seed_converted_to_nonzero() {
        let rng = RngManager::new(0);
        assert_ne!(rng.get_state(), 0);
    }

    #[test]
    fn next_f64_in_range() {
        let mut rng = RngManager::new(12345);
        for _ in 0..1000 {
            let val = rng.next_f64();
            assert!((0.0..1.0).contains(&val), "value {} outside [0, 1)", val);
        }
    }

    #[test]
    fn exponential_finite_and_non_negative() {
        let mut rng = RngManager::new(99);
        for _ in 0..1000 {
            let draw = rng.exponential(3.0);
            assert!(draw.is_finite());
            assert!(draw >= 0.0);
        }
    }

    #[test]
    fn exponential_mean_roughly_correct() {
        let mut rng = RngManager::new(7);
        let n = 20_000;
        let sum: f64 = (0..n).map(|_| rng.exponential(2.0)).sum();
        let mean = sum / n as f64;
        assert!((mean - 2.0).abs() < 0.1, "sample mean {} far from 2.0", mean);
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = RngManager::new(42);
        let mut b = RngManager::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }
}
