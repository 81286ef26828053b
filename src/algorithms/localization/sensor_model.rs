//! Range-sensor noise models.
//!
//! The filter only needs point queries `P(measured | expected)` against a
//! discrete noise kernel supplied by the world layer. Missing mass is
//! reported as `None`; the filter substitutes its configured likelihood
//! floor rather than treating it as impossible.

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Point-query contract for the external range-noise distribution.
pub trait SensorNoiseModel {
    /// Probability of observing `measured` when the true range is `expected`,
    /// or `None` when the distribution places no mass there.
    fn likelihood(&self, measured: u32, expected: u32) -> Option<f64>;
}

/// Uniform discrete kernel: a measurement falls anywhere within
/// `half_width` of the true range with equal probability.
///
/// Doubles as the observation simulator for tests, mirroring how the game
/// layer draws its noisy readings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DiscreteNoiseKernel {
    /// Maximum absolute deviation of a measurement from the true range.
    half_width: u32,
}

impl DiscreteNoiseKernel {
    /// Create a kernel with the given half-width. Zero means an exact sensor.
    pub fn new(half_width: u32) -> Self {
        Self { half_width }
    }

    /// Inclusive support bounds around a true range (clipped at zero).
    fn support(&self, expected: u32) -> (u32, u32) {
        (
            expected.saturating_sub(self.half_width),
            expected + self.half_width,
        )
    }

    /// Draw a noisy measurement for a true range.
    pub fn sample<R: Rng>(&self, expected: u32, rng: &mut R) -> u32 {
        let (lo, hi) = self.support(expected);
        rng.random_range(lo..=hi)
    }
}

impl SensorNoiseModel for DiscreteNoiseKernel {
    fn likelihood(&self, measured: u32, expected: u32) -> Option<f64> {
        let (lo, hi) = self.support(expected);
        if (lo..=hi).contains(&measured) {
            Some(1.0 / (hi - lo + 1) as f64)
        } else {
            None
        }
    }
}

/// Table-driven noise model for kernels supplied by the world layer.
///
/// Keyed by expected range; each entry is a distribution over measured
/// ranges. Absent keys and absent measured values both report `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TabulatedNoiseModel {
    table: HashMap<u32, HashMap<u32, f64>>,
}

impl TabulatedNoiseModel {
    /// Build from `(expected, measured, probability)` entries.
    pub fn from_entries(entries: impl IntoIterator<Item = (u32, u32, f64)>) -> Self {
        let mut table: HashMap<u32, HashMap<u32, f64>> = HashMap::new();
        for (expected, measured, probability) in entries {
            table
                .entry(expected)
                .or_default()
                .insert(measured, probability);
        }
        Self { table }
    }
}

impl SensorNoiseModel for TabulatedNoiseModel {
    fn likelihood(&self, measured: u32, expected: u32) -> Option<f64> {
        self.table.get(&expected)?.get(&measured).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_exact_kernel() {
        let kernel = DiscreteNoiseKernel::new(0);
        assert_eq!(kernel.likelihood(3, 3), Some(1.0));
        assert_eq!(kernel.likelihood(2, 3), None);
    }

    #[test]
    fn test_window_kernel_mass() {
        let kernel = DiscreteNoiseKernel::new(2);
        // Support of expected 5 is {3, 4, 5, 6, 7}.
        for m in 3..=7 {
            assert_relative_eq!(kernel.likelihood(m, 5).unwrap(), 0.2);
        }
        assert_eq!(kernel.likelihood(2, 5), None);
        assert_eq!(kernel.likelihood(8, 5), None);
    }

    #[test]
    fn test_window_clipped_at_zero() {
        let kernel = DiscreteNoiseKernel::new(2);
        // Support of expected 1 is {0, 1, 2, 3}.
        assert_relative_eq!(kernel.likelihood(0, 1).unwrap(), 0.25);
        assert_relative_eq!(kernel.likelihood(3, 1).unwrap(), 0.25);
        assert_eq!(kernel.likelihood(4, 1), None);
    }

    #[test]
    fn test_sample_stays_in_support() {
        let kernel = DiscreteNoiseKernel::new(2);
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..200 {
            let m = kernel.sample(5, &mut rng);
            assert!((3..=7).contains(&m));
        }
    }

    #[test]
    fn test_tabulated_lookup() {
        let model = TabulatedNoiseModel::from_entries([(4, 4, 0.6), (4, 5, 0.4)]);
        assert_relative_eq!(model.likelihood(4, 4).unwrap(), 0.6);
        assert_relative_eq!(model.likelihood(5, 4).unwrap(), 0.4);
        assert_eq!(model.likelihood(6, 4), None);
        assert_eq!(model.likelihood(4, 9), None);
    }
}
