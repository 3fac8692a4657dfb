//! Rectified EMG envelope simulator
//!
//! Produces the non-negative magnitude readings a band streams while one arm
//! is recorded.

use crate::signal_patterns::SignalPattern;
use mb_core::{MbError, MbResult};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Configuration for one simulated channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmgConfig {
    /// Sampling rate in Hz
    pub sampling_rate: f64,
    /// Reading produced at full activation and unit gain
    pub peak_amplitude: f64,
    /// Channel gain, models a weaker or stronger muscle
    pub gain: f64,
    /// Activation pattern to follow
    pub pattern: SignalPattern,
    /// Gaussian noise standard deviation (0.0 = no noise)
    pub noise_std: f64,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl Default for EmgConfig {
    fn default() -> Self {
        Self {
            sampling_rate: 100.0,
            peak_amplitude: 1000.0,
            gain: 1.0,
            pattern: SignalPattern::default(),
            noise_std: 15.0,
            seed: None,
        }
    }
}

impl EmgConfig {
    pub fn validate(&self) -> MbResult<()> {
        const MIN_RATE: f64 = 1.0;
        const MAX_RATE: f64 = 4000.0;

        if !(MIN_RATE..=MAX_RATE).contains(&self.sampling_rate) {
            return Err(MbError::SimulationError {
                message: format!(
                    "sampling rate {}Hz outside {}-{}Hz",
                    self.sampling_rate, MIN_RATE, MAX_RATE
                ),
            });
        }

        if !self.peak_amplitude.is_finite() || self.peak_amplitude <= 0.0 {
            return Err(MbError::SimulationError {
                message: "peak amplitude must be positive".to_string(),
            });
        }

        if !self.gain.is_finite() || self.gain < 0.0 {
            return Err(MbError::SimulationError {
                message: "gain must be non-negative".to_string(),
            });
        }

        Ok(())
    }
}

/// Single-channel EMG simulator
pub struct EmgSimulator {
    config: EmgConfig,
    rng: StdRng,
    noise: Normal<f64>,
    time_offset: f64,
}

impl EmgSimulator {
    /// Create new simulator with configuration
    pub fn new(config: EmgConfig) -> MbResult<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let noise = Normal::new(0.0, config.noise_std).map_err(|e| MbError::SimulationError {
            message: format!("Failed to create normal distribution: {}", e),
        })?;

        Ok(EmgSimulator {
            config,
            rng,
            noise,
            time_offset: 0.0,
        })
    }

    pub fn config(&self) -> &EmgConfig {
        &self.config
    }

    /// Seconds of signal generated so far
    pub fn elapsed(&self) -> f64 {
        self.time_offset
    }

    /// Generate readings covering `duration` seconds.
    ///
    /// Successive calls continue where the previous one ended.
    pub fn generate(&mut self, duration: f64) -> Vec<f64> {
        let sample_count = (duration * self.config.sampling_rate).round().max(0.0) as usize;
        self.generate_samples(sample_count)
    }

    /// Generate exactly `sample_count` readings
    pub fn generate_samples(&mut self, sample_count: usize) -> Vec<f64> {
        let dt = 1.0 / self.config.sampling_rate;
        let scale = self.config.peak_amplitude * self.config.gain;

        let readings = (0..sample_count)
            .map(|i| {
                let time = self.time_offset + i as f64 * dt;
                let envelope = scale * self.config.pattern.activation_at_time(time);
                (envelope + self.noise.sample(&mut self.rng)).max(0.0)
            })
            .collect();

        self.time_offset += sample_count as f64 * dt;
        readings
    }

    /// Restart the pattern from time zero
    pub fn reset(&mut self) {
        self.time_offset = 0.0;
    }
}

/// Left/right pair of simulators sharing one pattern
pub struct BilateralSimulator {
    left: EmgSimulator,
    right: EmgSimulator,
}

impl BilateralSimulator {
    /// Pair with independent channel configurations
    pub fn new(left: EmgConfig, right: EmgConfig) -> MbResult<Self> {
        Ok(BilateralSimulator {
            left: EmgSimulator::new(left)?,
            right: EmgSimulator::new(right)?,
        })
    }

    /// Pair where the right arm is `imbalance_pct` percent weaker than the left.
    ///
    /// The right channel is seeded with `seed + 1` so the two noise streams
    /// differ.
    pub fn with_imbalance(base: EmgConfig, imbalance_pct: f64) -> MbResult<Self> {
        if !(0.0..=100.0).contains(&imbalance_pct) {
            return Err(MbError::SimulationError {
                message: format!("imbalance {}% outside 0-100%", imbalance_pct),
            });
        }

        let right = EmgConfig {
            gain: base.gain * (1.0 - imbalance_pct / 100.0),
            seed: base.seed.map(|seed| seed.wrapping_add(1)),
            ..base.clone()
        };
        Self::new(base, right)
    }

    /// Split into `(left, right)` simulators
    pub fn into_parts(self) -> (EmgSimulator, EmgSimulator) {
        (self.left, self.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_config() -> EmgConfig {
        EmgConfig {
            pattern: SignalPattern::Constant { level: 0.5 },
            noise_std: 0.0,
            seed: Some(7),
            ..EmgConfig::default()
        }
    }

    #[test]
    fn test_sample_count_and_continuity() {
        let mut sim = EmgSimulator::new(quiet_config()).unwrap();
        assert_eq!(sim.generate(0.5).len(), 50);
        assert_eq!(sim.generate(0.25).len(), 25);
        assert!((sim.elapsed() - 0.75).abs() < 1e-9);

        assert_eq!(sim.generate_samples(3).len(), 3);
        assert!((sim.elapsed() - 0.78).abs() < 1e-9);

        sim.reset();
        assert_eq!(sim.elapsed(), 0.0);
    }

    #[test]
    fn test_noise_free_envelope() {
        let mut sim = EmgSimulator::new(quiet_config()).unwrap();
        assert!(sim.generate(0.1).iter().all(|&r| (r - 500.0).abs() < 1e-9));
    }

    #[test]
    fn test_readings_never_negative() {
        let config = EmgConfig {
            pattern: SignalPattern::Constant { level: 0.0 },
            noise_std: 50.0,
            seed: Some(3),
            ..EmgConfig::default()
        };
        let mut sim = EmgSimulator::new(config).unwrap();
        assert!(sim.generate(2.0).iter().all(|&r| r >= 0.0));
    }

    #[test]
    fn test_seed_reproducible() {
        let config = EmgConfig { seed: Some(42), ..EmgConfig::default() };
        let a = EmgSimulator::new(config.clone()).unwrap().generate(0.2);
        let b = EmgSimulator::new(config).unwrap().generate(0.2);
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_config() {
        let bad_rate = EmgConfig { sampling_rate: 0.0, ..EmgConfig::default() };
        assert!(EmgSimulator::new(bad_rate).is_err());

        let bad_noise = EmgConfig { noise_std: -1.0, ..EmgConfig::default() };
        assert!(EmgSimulator::new(bad_noise).is_err());

        let bad_gain = EmgConfig { gain: f64::NAN, ..EmgConfig::default() };
        assert!(EmgSimulator::new(bad_gain).is_err());
    }

    #[test]
    fn test_bilateral_imbalance() {
        let pair = BilateralSimulator::with_imbalance(quiet_config(), 25.0).unwrap();
        let (mut left_sim, mut right_sim) = pair.into_parts();
        assert_eq!(right_sim.config().gain, 0.75);
        assert_eq!(right_sim.config().seed, Some(8));

        let (left, right) = (left_sim.generate(0.1), right_sim.generate(0.1));
        assert!((left[0] - 500.0).abs() < 1e-9);
        assert!((right[0] - 375.0).abs() < 1e-9);

        assert!(BilateralSimulator::with_imbalance(quiet_config(), 120.0).is_err());
    }
}
