//! MB-Processing: Bilateral EMG imbalance analysis
//!
//! Peak-strength statistics, severity grading and one-side-at-a-time trials.

pub mod analyzer;
pub mod config;
pub mod grading;
pub mod report;
pub mod strength;
pub mod trial;

pub use analyzer::ImbalanceAnalyzer;
pub use config::{AnalyzerConfig, ReadingValidation};
pub use grading::SeverityThresholds;
pub use report::{ImbalanceReport, TrialUpdate};
pub use strength::{top_n_average, top_three_average, TOP_READINGS};
pub use trial::{TrialSession, TrialState};
