//! Configuration management for imbalance analysis

use crate::grading::SeverityThresholds;
use crate::strength::TOP_READINGS;
use mb_core::{MbError, MbResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Analyzer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Configuration name/profile
    pub name: String,
    /// Number of peak readings averaged into a channel strength
    pub top_n: usize,
    /// Severity grade boundaries
    pub thresholds: SeverityThresholds,
    /// How out-of-domain readings are treated
    pub validation: ReadingValidation,
}

/// Policy for negative, NaN and infinite readings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingValidation {
    /// Accept everything; odd values propagate through the arithmetic
    Lenient,
    /// Reject non-finite and negative readings
    Strict,
}

impl ReadingValidation {
    pub fn is_strict(&self) -> bool {
        matches!(self, ReadingValidation::Strict)
    }
}

/// Preset configurations
impl AnalyzerConfig {
    /// Field configuration matching the band firmware
    pub fn standard() -> Self {
        AnalyzerConfig {
            name: "Standard".to_string(),
            top_n: TOP_READINGS,
            thresholds: SeverityThresholds::default(),
            validation: ReadingValidation::Lenient,
        }
    }

    /// Same grading, but refuses readings outside the magnitude domain
    pub fn clinical() -> Self {
        AnalyzerConfig {
            name: "Clinical".to_string(),
            validation: ReadingValidation::Strict,
            ..Self::standard()
        }
    }

    /// Validate entire configuration
    pub fn validate(&self) -> MbResult<()> {
        if self.top_n == 0 {
            return Err(MbError::config("top_n must be greater than 0"));
        }

        self.thresholds
            .validate()
            .map_err(|e| MbError::config(format!("Configuration '{}' invalid: {}", self.name, e)))
    }

    /// Export configuration to JSON
    pub fn to_json(&self) -> MbResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| MbError::config(format!("Failed to serialize configuration: {}", e)))
    }

    /// Import and validate configuration from JSON
    pub fn from_json(json: &str) -> MbResult<Self> {
        let config: AnalyzerConfig = serde_json::from_str(json)
            .map_err(|e| MbError::config(format!("Failed to deserialize configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> MbResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            MbError::config(format!("Failed to read configuration {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self::standard()
    }
}
