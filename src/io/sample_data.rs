//! Synthetic time series shown by the viewer.
//!
//! The series is a multiplicative random walk on a daily cycle, so it stays
//! strictly positive and looks reasonable on both linear and log Y axes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rdas::SampledSeries;

/// 2024-01-01T00:00:00Z in seconds since 1970.
pub const SERIES_START: f64 = 1_704_067_200.0;

const DAY_SECONDS: f64 = 86_400.0;

/// Deterministic generator for the demo series.
#[derive(Debug, Clone)]
pub struct SampleGenerator {
    samples: usize,
    cadence_s: f64,
    seed: u64,
}

impl Default for SampleGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleGenerator {
    /// Three days of one-minute samples.
    pub fn new() -> Self {
        Self {
            samples: 3 * 24 * 60,
            cadence_s: 60.0,
            seed: 42, // Default seed for reproducibility
        }
    }

    /// Generates the series.
    pub fn generate(&self) -> SampledSeries {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut level: f64 = 1.5;
        let samples = (0..self.samples).map(|i| {
            let t = SERIES_START + i as f64 * self.cadence_s;
            let phase = (t - SERIES_START) / DAY_SECONDS * std::f64::consts::TAU;
            // walk in log10 space, pulled back toward the mean
            level += rng.gen_range(-0.02..0.02) - 0.01 * (level - 1.5);
            let decades = level + 0.4 * phase.sin();
            (t, 10f64.powf(decades))
        });
        SampledSeries::new(samples.collect::<Vec<_>>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdas::SeriesReadout;

    fn generator(seed: u64) -> SampleGenerator {
        SampleGenerator {
            samples: 500,
            cadence_s: 60.0,
            seed,
        }
    }

    #[test]
    fn test_generate_is_deterministic() {
        let a = generator(7).generate();
        let b = generator(7).generate();
        assert_eq!(a, b);
        let c = generator(8).generate();
        assert_ne!(a, c);
    }

    #[test]
    fn test_series_is_positive_and_ordered() {
        let series = SampleGenerator::new().generate();
        assert_eq!(series.len(), 3 * 24 * 60);
        assert!(series.ys().iter().all(|y| *y > 0.0));
        assert!(series.xs().windows(2).all(|w| w[0] < w[1]));
        assert_eq!(series.xs()[0], SERIES_START);
    }
}
