//! Error handling for the MuscleBand crates
//!
//! One error type shared by analysis, trial recording and simulation.

use crate::emg_types::Side;
use thiserror::Error;

/// Result type alias for MuscleBand operations
pub type MbResult<T> = Result<T, MbError>;

/// Error type for all MuscleBand operations
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum MbError {
    /// A reading rejected by strict validation
    #[error("Invalid {side} reading at index {index}: {value}")]
    InvalidReading {
        /// Channel the reading belongs to
        side: Side,
        /// Position of the reading in its window
        index: usize,
        /// Offending value
        value: f64,
    },

    /// Severity thresholds that are not finite, non-negative and increasing
    #[error("Invalid severity thresholds: {reason}")]
    InvalidThresholds {
        /// Description of the threshold issue
        reason: String,
    },

    /// Configuration validation or (de)serialization failure
    #[error("Configuration error: {message}")]
    ConfigurationError {
        /// Description of the configuration error
        message: String,
    },

    /// Trial session used out of order
    #[error("Trial error: {reason}")]
    TrialError {
        /// Description of the misuse
        reason: String,
    },

    /// Simulator setup or streaming failure
    #[error("Simulation error: {message}")]
    SimulationError {
        /// Description of the simulation failure
        message: String,
    },
}

impl MbError {
    /// Shorthand for a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        MbError::ConfigurationError {
            message: message.into(),
        }
    }

    /// Shorthand for a trial error
    pub fn trial(reason: impl Into<String>) -> Self {
        MbError::TrialError {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = MbError::InvalidReading {
            side: Side::Left,
            index: 4,
            value: -1.5,
        };
        let display = format!("{}", error);
        assert!(display.contains("left"));
        assert!(display.contains("index 4"));
        assert!(display.contains("-1.5"));
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(MbError::trial("idle"), MbError::TrialError { reason: "idle".to_string() });
        assert_ne!(MbError::config("a"), MbError::config("b"));
    }
}
