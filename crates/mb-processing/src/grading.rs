//! Percentage-difference thresholds for severity grading

use mb_core::{MbError, MbResult, SeverityGrade};
use serde::{Deserialize, Serialize};

/// Lower bounds (inclusive, in percent) of the non-safe grades
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityThresholds {
    /// Differences from here are MODERATE
    pub moderate: f64,
    /// Differences from here are SEVERE
    pub severe: f64,
    /// Differences from here are DANGEROUS
    pub dangerous: f64,
}

impl SeverityThresholds {
    pub const fn new(moderate: f64, severe: f64, dangerous: f64) -> Self {
        SeverityThresholds {
            moderate,
            severe,
            dangerous,
        }
    }

    /// Grade a percentage difference. First matching tier wins.
    ///
    /// A NaN difference fails every comparison and grades DANGEROUS.
    pub fn classify(&self, percentage_difference: f64) -> SeverityGrade {
        if percentage_difference < self.moderate {
            SeverityGrade::Safe
        } else if percentage_difference < self.severe {
            SeverityGrade::Moderate
        } else if percentage_difference < self.dangerous {
            SeverityGrade::Severe
        } else {
            SeverityGrade::Dangerous
        }
    }

    /// Thresholds must be finite, non-negative and strictly increasing
    pub fn validate(&self) -> MbResult<()> {
        let bounds = [self.moderate, self.severe, self.dangerous];

        if bounds.iter().any(|b| !b.is_finite() || *b < 0.0) {
            return Err(MbError::InvalidThresholds {
                reason: format!("thresholds must be finite and non-negative, got {:?}", bounds),
            });
        }

        if !(self.moderate < self.severe && self.severe < self.dangerous) {
            return Err(MbError::InvalidThresholds {
                reason: format!(
                    "thresholds must increase: moderate {} < severe {} < dangerous {}",
                    self.moderate, self.severe, self.dangerous
                ),
            });
        }

        Ok(())
    }
}

impl Default for SeverityThresholds {
    fn default() -> Self {
        SeverityThresholds::new(10.0, 15.0, 20.0)
    }
}
