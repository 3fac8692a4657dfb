//! EMG channel types shared across crates

use crate::error::{MbError, MbResult};
use serde::{Deserialize, Serialize};

/// Body side a channel is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

impl std::str::FromStr for Side {
    type Err = MbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "l" => Ok(Side::Left),
            "right" | "r" => Ok(Side::Right),
            other => Err(MbError::config(format!("Unknown side '{}'", other))),
        }
    }
}

/// Paired muscles the band is strapped around, one band per side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MuscleGroup {
    Biceps,
    Forearm,
    Quadriceps,
    Calf,
}

impl std::fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MuscleGroup::Biceps => write!(f, "biceps"),
            MuscleGroup::Forearm => write!(f, "forearm"),
            MuscleGroup::Quadriceps => write!(f, "quadriceps"),
            MuscleGroup::Calf => write!(f, "calf"),
        }
    }
}

impl std::str::FromStr for MuscleGroup {
    type Err = MbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "biceps" | "bicep" => Ok(MuscleGroup::Biceps),
            "forearm" => Ok(MuscleGroup::Forearm),
            "quadriceps" | "quad" => Ok(MuscleGroup::Quadriceps),
            "calf" => Ok(MuscleGroup::Calf),
            other => Err(MbError::config(format!("Unknown muscle group '{}'", other))),
        }
    }
}

/// One channel's readings captured over a recording window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingWindow {
    /// Side the readings came from
    pub side: Side,
    /// Muscle under the electrode
    pub muscle_group: MuscleGroup,
    /// Raw magnitudes in capture order
    pub readings: Vec<f64>,
}

impl ReadingWindow {
    /// Create an empty window for a side
    pub fn new(side: Side, muscle_group: MuscleGroup) -> Self {
        ReadingWindow {
            side,
            muscle_group,
            readings: Vec::new(),
        }
    }

    /// Append a chunk of readings
    pub fn extend_from_slice(&mut self, chunk: &[f64]) {
        self.readings.extend_from_slice(chunk);
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

/// Check that every reading is a finite, non-negative magnitude.
///
/// Reports the first offending reading with its index.
pub fn validate_readings(side: Side, readings: &[f64]) -> MbResult<()> {
    match readings
        .iter()
        .enumerate()
        .find(|(_, value)| !value.is_finite() || **value < 0.0)
    {
        Some((index, &value)) => Err(MbError::InvalidReading { side, index, value }),
        None => Ok(()),
    }
}
