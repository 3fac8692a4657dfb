//! One-arm-at-a-time recording sessions
//!
//! The band records a single side per recording. A trial is complete once
//! both sides have been recorded; the analyzer then grades the pair.

use crate::analyzer::ImbalanceAnalyzer;
use crate::config::AnalyzerConfig;
use crate::report::{ImbalanceReport, TrialUpdate};
use crate::strength::top_n_average;
use mb_core::{MbError, MbResult, MuscleGroup, ReadingWindow, Side};
use tracing::{debug, info, warn};

/// Recording state of a trial
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialState {
    /// Waiting for `start`
    Idle,
    /// Collecting readings for one side
    Recording(Side),
}

/// Bilateral trial built from two sequential single-side recordings
#[derive(Debug, Clone)]
pub struct TrialSession {
    analyzer: ImbalanceAnalyzer,
    muscle_group: MuscleGroup,
    state: TrialState,
    active: Option<ReadingWindow>,
    left: Option<ReadingWindow>,
    right: Option<ReadingWindow>,
}

impl TrialSession {
    /// Biceps trial with the given analyzer configuration
    pub fn new(config: AnalyzerConfig) -> Self {
        Self::for_muscle(config, MuscleGroup::Biceps)
    }

    pub fn for_muscle(config: AnalyzerConfig, muscle_group: MuscleGroup) -> Self {
        TrialSession {
            analyzer: ImbalanceAnalyzer::with_config(config),
            muscle_group,
            state: TrialState::Idle,
            active: None,
            left: None,
            right: None,
        }
    }

    pub fn state(&self) -> TrialState {
        self.state
    }

    pub fn muscle_group(&self) -> MuscleGroup {
        self.muscle_group
    }

    /// Begin recording a side. Fails while another recording is running.
    pub fn start(&mut self, side: Side) -> MbResult<()> {
        if let TrialState::Recording(current) = self.state {
            return Err(MbError::trial(format!(
                "cannot start {} recording while {} recording is running",
                side, current
            )));
        }

        debug!(%side, muscle = %self.muscle_group, "recording started");
        self.state = TrialState::Recording(side);
        self.active = Some(ReadingWindow::new(side, self.muscle_group));
        Ok(())
    }

    /// Append readings to the running recording.
    ///
    /// Under strict validation a bad chunk is rejected as a whole and the
    /// recording keeps running.
    pub fn record(&mut self, readings: &[f64]) -> MbResult<()> {
        let strict = self.analyzer.config().validation.is_strict();
        let window = self
            .active
            .as_mut()
            .ok_or_else(|| MbError::trial("no recording in progress"))?;

        if strict {
            let offset = window.len();
            if let Err(e) = mb_core::validate_readings(window.side, readings) {
                warn!(side = %window.side, error = %e, "rejected reading chunk");
                return Err(match e {
                    MbError::InvalidReading { side, index, value } => MbError::InvalidReading {
                        side,
                        index: offset + index,
                        value,
                    },
                    other => other,
                });
            }
        }

        window.extend_from_slice(readings);
        Ok(())
    }

    /// Finish the running recording and report what is known so far.
    ///
    /// Re-recording a side replaces its earlier window.
    pub fn stop(&mut self) -> MbResult<TrialUpdate> {
        let window = self
            .active
            .take()
            .ok_or_else(|| MbError::trial("no recording in progress"))?;
        self.state = TrialState::Idle;

        debug!(side = %window.side, samples = window.len(), "recording stopped");
        match window.side {
            Side::Left => self.left = Some(window),
            Side::Right => self.right = Some(window),
        }

        if let (Some(left), Some(right)) = (&self.left, &self.right) {
            self.analyzer.process_readings(&left.readings, &right.readings);
            let report = self.analyzer.report();
            info!(
                left = report.left_bicep,
                right = report.right_bicep,
                difference = report.percentage_difference,
                grade = %report.severity_grade,
                "trial complete"
            );
        }

        Ok(self.update())
    }

    /// Current strengths, plus difference and grade when complete
    pub fn update(&self) -> TrialUpdate {
        if let Some(report) = self.report() {
            return TrialUpdate::from(report);
        }

        let top_n = self.analyzer.config().top_n;
        TrialUpdate {
            left_bicep: self.left.as_ref().map(|w| top_n_average(&w.readings, top_n)),
            right_bicep: self.right.as_ref().map(|w| top_n_average(&w.readings, top_n)),
            ..TrialUpdate::default()
        }
    }

    /// Graded result once both sides are recorded
    pub fn report(&self) -> Option<ImbalanceReport> {
        self.is_complete().then(|| self.analyzer.report())
    }

    pub fn is_complete(&self) -> bool {
        self.left.is_some() && self.right.is_some()
    }

    /// Drop all recordings and return to idle
    pub fn reset(&mut self) {
        self.state = TrialState::Idle;
        self.active = None;
        self.left = None;
        self.right = None;
        self.analyzer.reset();
    }
}

impl Default for TrialSession {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mb_core::SeverityGrade;

    fn record_side(session: &mut TrialSession, side: Side, readings: &[f64]) -> TrialUpdate {
        session.start(side).unwrap();
        session.record(readings).unwrap();
        session.stop().unwrap()
    }

    #[test]
    fn test_full_trial() {
        let mut session = TrialSession::default();
        assert_eq!(session.state(), TrialState::Idle);

        let update = record_side(&mut session, Side::Left, &[10.0, 9.0, 8.0, 1.0]);
        assert_eq!(update.left_bicep, Some(9.0));
        assert_eq!(update.right_bicep, None);
        assert!(!update.is_complete());

        let update = record_side(&mut session, Side::Right, &[5.0, 5.0, 5.0]);
        assert!(update.is_complete());
        assert!(session.is_complete());

        let report = update.report().unwrap();
        assert_eq!(report.left_bicep, 9.0);
        assert_eq!(report.right_bicep, 5.0);
        assert_eq!(report.severity_grade, SeverityGrade::Dangerous);
    }

    #[test]
    fn test_chunks_accumulate() {
        let mut session = TrialSession::default();
        session.start(Side::Right).unwrap();
        assert_eq!(session.state(), TrialState::Recording(Side::Right));
        session.record(&[1.0, 4.0]).unwrap();
        session.record(&[]).unwrap();
        session.record(&[2.0, 3.0]).unwrap();
        let update = session.stop().unwrap();

        assert_eq!(update.right_bicep, Some(3.0));
        assert_eq!(update.left_bicep, None);
        assert_eq!(session.muscle_group(), MuscleGroup::Biceps);
    }

    #[test]
    fn test_rerecording_replaces_side() {
        let mut session = TrialSession::default();
        record_side(&mut session, Side::Left, &[20.0]);
        record_side(&mut session, Side::Right, &[10.0]);
        assert_eq!(session.report().unwrap().severity_grade, SeverityGrade::Dangerous);

        let update = record_side(&mut session, Side::Left, &[10.5]);
        let report = update.report().unwrap();
        assert_eq!(report.left_bicep, 10.5);
        assert_eq!(report.severity_grade, SeverityGrade::Safe);
    }

    #[test]
    fn test_out_of_order_calls() {
        let mut session = TrialSession::default();
        assert!(matches!(session.record(&[1.0]), Err(MbError::TrialError { .. })));
        assert!(matches!(session.stop(), Err(MbError::TrialError { .. })));

        session.start(Side::Left).unwrap();
        assert!(session.start(Side::Right).is_err());
        assert_eq!(session.state(), TrialState::Recording(Side::Left));
    }

    #[test]
    fn test_empty_recordings() {
        let mut session = TrialSession::default();
        session.start(Side::Left).unwrap();
        session.stop().unwrap();
        session.start(Side::Right).unwrap();
        let report = session.stop().unwrap().report().unwrap();

        assert_eq!(report.percentage_difference, 0.0);
        assert_eq!(report.severity_grade, SeverityGrade::Safe);
    }

    #[test]
    fn test_strict_rejects_chunk() {
        let mut session = TrialSession::new(AnalyzerConfig::clinical());
        session.start(Side::Left).unwrap();
        session.record(&[1.0, 2.0]).unwrap();

        let err = session.record(&[3.0, f64::INFINITY]).unwrap_err();
        assert!(matches!(
            err,
            MbError::InvalidReading { side: Side::Left, index: 3, .. }
        ));

        // Recording continues with the valid readings only
        assert_eq!(session.state(), TrialState::Recording(Side::Left));
        assert_eq!(session.stop().unwrap().left_bicep, Some(1.5));
    }

    #[test]
    fn test_reset() {
        let mut session = TrialSession::for_muscle(AnalyzerConfig::default(), MuscleGroup::Quadriceps);
        record_side(&mut session, Side::Left, &[1.0]);
        session.start(Side::Right).unwrap();
        session.reset();

        assert_eq!(session.state(), TrialState::Idle);
        assert!(!session.is_complete());
        assert_eq!(session.update(), TrialUpdate::default());
        assert_eq!(session.muscle_group(), MuscleGroup::Quadriceps);
    }
}
