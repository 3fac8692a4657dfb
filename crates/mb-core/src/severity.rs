//! Bilateral imbalance severity grades

use crate::error::MbError;
use serde::{Deserialize, Serialize};

/// Severity of the strength difference between left and right channels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SeverityGrade {
    /// Below the moderate threshold
    #[default]
    Safe,
    Moderate,
    Severe,
    /// At or above the dangerous threshold
    Dangerous,
}

impl SeverityGrade {
    /// All grades from least to most severe
    pub const ALL: [SeverityGrade; 4] = [
        SeverityGrade::Safe,
        SeverityGrade::Moderate,
        SeverityGrade::Severe,
        SeverityGrade::Dangerous,
    ];

    /// Upper-case label as sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityGrade::Safe => "SAFE",
            SeverityGrade::Moderate => "MODERATE",
            SeverityGrade::Severe => "SEVERE",
            SeverityGrade::Dangerous => "DANGEROUS",
        }
    }

    /// Lower-case name used for result pages
    pub fn route_name(&self) -> &'static str {
        match self {
            SeverityGrade::Safe => "safe",
            SeverityGrade::Moderate => "moderate",
            SeverityGrade::Severe => "severe",
            SeverityGrade::Dangerous => "dangerous",
        }
    }

    /// Hex colour used when displaying the grade
    pub fn display_color(&self) -> &'static str {
        match self {
            SeverityGrade::Safe => "#00cc44",
            SeverityGrade::Moderate => "#f4c542",
            SeverityGrade::Severe => "#ff6600",
            SeverityGrade::Dangerous => "#ff1a1a",
        }
    }
}

impl std::fmt::Display for SeverityGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SeverityGrade {
    type Err = MbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SeverityGrade::ALL
            .into_iter()
            .find(|grade| grade.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MbError::config(format!("Unknown severity grade '{}'", s)))
    }
}
