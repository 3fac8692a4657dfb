//! Result payloads sent to display clients
//!
//! Field names match the JSON the band returns when a recording stops.

use mb_core::{MbError, MbResult, SeverityGrade, Side};
use serde::{Deserialize, Serialize};

/// Complete bilateral comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImbalanceReport {
    /// Left channel strength
    pub left_bicep: f64,
    /// Right channel strength
    pub right_bicep: f64,
    /// Difference relative to the stronger side, in percent
    pub percentage_difference: f64,
    pub severity_grade: SeverityGrade,
}

impl ImbalanceReport {
    /// Side with the higher strength, `None` when balanced
    pub fn dominant_side(&self) -> Option<Side> {
        if self.left_bicep > self.right_bicep {
            Some(Side::Left)
        } else if self.right_bicep > self.left_bicep {
            Some(Side::Right)
        } else {
            None
        }
    }

    pub fn to_json(&self) -> MbResult<String> {
        serde_json::to_string(self)
            .map_err(|e| MbError::config(format!("Failed to serialize report: {}", e)))
    }
}

impl std::fmt::Display for ImbalanceReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "left {:.2} | right {:.2} | difference {:.2}% | {}",
            self.left_bicep, self.right_bicep, self.percentage_difference, self.severity_grade
        )
    }
}

/// Response to stopping one side of a trial.
///
/// Carries whichever side strengths are known. Difference and grade appear
/// only once both sides have been recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrialUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_bicep: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_bicep: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage_difference: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity_grade: Option<SeverityGrade>,
}

impl TrialUpdate {
    /// Strength recorded for a side, if any
    pub fn strength(&self, side: Side) -> Option<f64> {
        match side {
            Side::Left => self.left_bicep,
            Side::Right => self.right_bicep,
        }
    }

    /// Both sides recorded and graded
    pub fn is_complete(&self) -> bool {
        self.report().is_some()
    }

    /// Full report once the trial is complete
    pub fn report(&self) -> Option<ImbalanceReport> {
        Some(ImbalanceReport {
            left_bicep: self.left_bicep?,
            right_bicep: self.right_bicep?,
            percentage_difference: self.percentage_difference?,
            severity_grade: self.severity_grade?,
        })
    }
}

impl From<ImbalanceReport> for TrialUpdate {
    fn from(report: ImbalanceReport) -> Self {
        TrialUpdate {
            left_bicep: Some(report.left_bicep),
            right_bicep: Some(report.right_bicep),
            percentage_difference: Some(report.percentage_difference),
            severity_grade: Some(report.severity_grade),
        }
    }
}
