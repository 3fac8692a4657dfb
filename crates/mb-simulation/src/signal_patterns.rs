//! Muscle activation patterns for simulated recordings
//!
//! Activation is a normalized level in `[0.0, 1.0]` over time in seconds.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Activation profile of one recorded contraction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SignalPattern {
    /// Constant activation level
    Constant { level: f64 },
    /// Linear change from one level to another
    Ramp {
        start_level: f64,
        end_level: f64,
        duration: f64,
    },
    /// Repeated contractions with rest in between
    Burst {
        on_duration: f64,
        off_duration: f64,
        amplitude: f64,
    },
    /// Exponentially decaying effort
    Fatigue {
        initial_amplitude: f64,
        decay_rate: f64,
    },
    /// Sustained contraction with physiological tremor
    Realistic {
        base_activation: f64,
        tremor_frequency: f64,
        tremor_amplitude: f64,
    },
}

impl SignalPattern {
    /// Activation level at `time` seconds, clamped to `[0.0, 1.0]`
    pub fn activation_at_time(&self, time: f64) -> f64 {
        let level = match *self {
            SignalPattern::Constant { level } => level,

            SignalPattern::Ramp { start_level, end_level, duration } => {
                if duration <= 0.0 || time >= duration {
                    end_level
                } else {
                    start_level + (end_level - start_level) * (time / duration)
                }
            }

            SignalPattern::Burst { on_duration, off_duration, amplitude } => {
                let cycle = on_duration + off_duration;
                if cycle <= 0.0 || time % cycle < on_duration {
                    amplitude
                } else {
                    0.0
                }
            }

            SignalPattern::Fatigue { initial_amplitude, decay_rate } => {
                initial_amplitude * (-decay_rate * time).exp()
            }

            SignalPattern::Realistic { base_activation, tremor_frequency, tremor_amplitude } => {
                base_activation + tremor_amplitude * (2.0 * PI * tremor_frequency * time).sin()
            }
        };

        level.clamp(0.0, 1.0)
    }

    /// Get pattern description
    pub fn description(&self) -> &'static str {
        match self {
            SignalPattern::Constant { .. } => "Constant activation",
            SignalPattern::Ramp { .. } => "Gradual ramp",
            SignalPattern::Burst { .. } => "Repeated curls",
            SignalPattern::Fatigue { .. } => "Muscle fatigue",
            SignalPattern::Realistic { .. } => "Sustained hold with tremor",
        }
    }

    /// Named patterns offered by the command line
    pub fn presets() -> Vec<(&'static str, SignalPattern)> {
        vec![
            ("rest", SignalPattern::Constant { level: 0.1 }),
            ("hold", SignalPattern::Constant { level: 0.8 }),
            ("warmup", SignalPattern::Ramp {
                start_level: 0.1, end_level: 0.7, duration: 3.0
            }),
            ("curls", SignalPattern::Burst {
                on_duration: 0.6, off_duration: 0.4, amplitude: 0.9
            }),
            ("fatigue", SignalPattern::Fatigue {
                initial_amplitude: 0.9, decay_rate: 0.1
            }),
            ("natural", SignalPattern::Realistic {
                base_activation: 0.6, tremor_frequency: 8.0, tremor_amplitude: 0.05
            }),
        ]
    }

    /// Look up a preset by name, ignoring case
    pub fn preset(name: &str) -> Option<SignalPattern> {
        Self::presets()
            .into_iter()
            .find(|(preset, _)| preset.eq_ignore_ascii_case(name))
            .map(|(_, pattern)| pattern)
    }
}

impl Default for SignalPattern {
    fn default() -> Self {
        SignalPattern::Realistic {
            base_activation: 0.6,
            tremor_frequency: 8.0,
            tremor_amplitude: 0.05,
        }
    }
}
