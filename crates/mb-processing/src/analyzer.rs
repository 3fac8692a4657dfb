//! Bilateral imbalance analyzer
//!
//! Holds the most recent left and right channel strengths. Percentage
//! difference and severity grade are recomputed from them on every query.

use crate::config::AnalyzerConfig;
use crate::report::ImbalanceReport;
use crate::strength::top_n_average;
use mb_core::{validate_readings, MbResult, SeverityGrade, Side};
use tracing::{debug, warn};

/// Compares the strengths of two EMG channels.
///
/// Strengths start at 0.0 and are replaced wholesale by each call to
/// [`process_readings`](Self::process_readings).
#[derive(Debug, Clone, PartialEq)]
pub struct ImbalanceAnalyzer {
    config: AnalyzerConfig,
    left_strength: f64,
    right_strength: f64,
}

impl ImbalanceAnalyzer {
    /// Analyzer with the standard configuration
    pub fn new() -> Self {
        Self::with_config(AnalyzerConfig::default())
    }

    /// Analyzer with an explicit configuration
    pub fn with_config(config: AnalyzerConfig) -> Self {
        ImbalanceAnalyzer {
            config,
            left_strength: 0.0,
            right_strength: 0.0,
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Replace both strengths with the peak averages of the given windows.
    ///
    /// Never fails. Empty windows yield 0.0 and the two windows may differ in
    /// length. Readings are not validated here.
    pub fn process_readings(&mut self, left: &[f64], right: &[f64]) {
        self.left_strength = top_n_average(left, self.config.top_n);
        self.right_strength = top_n_average(right, self.config.top_n);

        debug!(
            left_samples = left.len(),
            right_samples = right.len(),
            left_strength = self.left_strength,
            right_strength = self.right_strength,
            "channel strengths updated"
        );
    }

    /// Like [`process_readings`](Self::process_readings), but applies the
    /// configured validation policy first.
    ///
    /// On error the stored strengths are left untouched.
    pub fn try_process_readings(&mut self, left: &[f64], right: &[f64]) -> MbResult<()> {
        if self.config.validation.is_strict() {
            for (side, readings) in [(Side::Left, left), (Side::Right, right)] {
                if let Err(e) = validate_readings(side, readings) {
                    warn!(%side, error = %e, "rejected reading window");
                    return Err(e);
                }
            }
        }

        self.process_readings(left, right);
        Ok(())
    }

    pub fn left_strength(&self) -> f64 {
        self.left_strength
    }

    pub fn right_strength(&self) -> f64 {
        self.right_strength
    }

    /// Strength of one side
    pub fn strength(&self, side: Side) -> f64 {
        match side {
            Side::Left => self.left_strength,
            Side::Right => self.right_strength,
        }
    }

    /// Difference between the strengths relative to the stronger one, in percent.
    ///
    /// Returns 0.0 when the stronger side is exactly zero.
    pub fn percentage_difference(&self) -> f64 {
        let max_val = self.left_strength.max(self.right_strength);
        if max_val == 0.0 {
            return 0.0;
        }

        100.0 * (self.left_strength - self.right_strength).abs() / max_val
    }

    pub fn severity_grade(&self) -> SeverityGrade {
        self.config.thresholds.classify(self.percentage_difference())
    }

    /// Snapshot of the current strengths, difference and grade
    pub fn report(&self) -> ImbalanceReport {
        ImbalanceReport {
            left_bicep: self.left_strength,
            right_bicep: self.right_strength,
            percentage_difference: self.percentage_difference(),
            severity_grade: self.severity_grade(),
        }
    }

    /// Forget both strengths
    pub fn reset(&mut self) {
        self.left_strength = 0.0;
        self.right_strength = 0.0;
    }
}

impl Default for ImbalanceAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
