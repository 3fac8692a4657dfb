//! MB-Core: Foundation types for bilateral EMG analysis
//!
//! Channel sides, reading windows, severity grades and the shared error type.

pub mod emg_types;
pub mod error;
pub mod severity;

pub use emg_types::*;
pub use error::{MbError, MbResult};
pub use severity::SeverityGrade;
