//! Deterministic random number generation.
//!
//! RULE: Nothing in the simulation may call any platform RNG.
//! All randomness flows through SimStreamRng instances derived from
//! the single master seed the caller supplies to the Monte Carlo run.
//!
//! Each simulation gets its own RNG stream, seeded deterministically
//! from (master_seed XOR stream_index). This means:
//!   - The panel is bit-reproducible regardless of how the batch is
//!     scheduled across worker threads.
//!   - Any single simulation can be replayed in isolation.

use rand::distributions::Distribution;
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use statrs::distribution::{Binomial, Normal, Poisson};

/// A deterministic RNG stream for a single simulation trajectory.
pub struct SimStreamRng {
    inner: Pcg64Mcg,
}

impl SimStreamRng {
    /// Create a stream RNG from the master seed and a stable stream
    /// index (the simulation's index within the batch).
    pub fn new(master_seed: u64, stream_index: u64) -> Self {
        let derived_seed = master_seed ^ (stream_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    /// Draw from Normal(mean, sd) and clip into [lo, hi].
    /// A non-positive sd degenerates to the clipped mean.
    pub fn normal_clipped(&mut self, mean: f64, sd: f64, lo: f64, hi: f64) -> f64 {
        if sd <= 0.0 {
            return mean.clamp(lo, hi);
        }
        // Construction only fails on sd <= 0 or NaN, both handled above.
        let normal = Normal::new(mean, sd).unwrap_or_else(|_| Normal::new(mean, 1e-9).unwrap());
        let draw: f64 = normal.sample(&mut self.inner);
        draw.clamp(lo, hi)
    }

    /// Draw a Poisson count with the given rate. Zero for a
    /// non-positive rate, where the distribution is undefined.
    pub fn poisson(&mut self, lambda: f64) -> u64 {
        if lambda <= 0.0 {
            return 0;
        }
        let poisson = Poisson::new(lambda).unwrap_or_else(|_| Poisson::new(1e-9).unwrap());
        // statrs samples Poisson into more than one output type; pin f64.
        let draw: f64 = poisson.sample(&mut self.inner);
        draw as u64
    }

    /// Draw a Binomial count over `n` trials at probability `p`.
    pub fn binomial(&mut self, n: u64, p: f64) -> u64 {
        if n == 0 || p <= 0.0 {
            return 0;
        }
        if p >= 1.0 {
            return n;
        }
        let binomial = Binomial::new(p, n).unwrap_or_else(|_| Binomial::new(0.5, n).unwrap());
        let draw: f64 = binomial.sample(&mut self.inner);
        draw as u64
    }
}
