//! Basic usage of the imbalance analyzer and trial session

use mb_core::{MbResult, Side};
use mb_processing::{top_three_average, AnalyzerConfig, ImbalanceAnalyzer, TrialSession};

fn main() -> MbResult<()> {
    println!("=== MuscleBand Basic Usage ===\n");

    let left = [10.0, 9.0, 8.0, 1.0];
    let right = [5.0, 5.0, 5.0];

    // Direct analysis of two recorded windows
    println!("Peak average of left window: {:.2}", top_three_average(&left));
    let mut analyzer = ImbalanceAnalyzer::new();
    analyzer.process_readings(&left, &right);
    println!("Analyzer: {}", analyzer.report());

    // Same data through a one-side-at-a-time trial
    let mut session = TrialSession::new(AnalyzerConfig::clinical());
    for (side, readings) in [(Side::Left, &left[..]), (Side::Right, &right[..])] {
        session.start(side)?;
        session.record(readings)?;
        let update = session.stop()?;
        println!("Stopped {} recording: {}", side, serde_json::to_string(&update).unwrap_or_default());
    }

    if let Some(report) = session.report() {
        println!("\nGrade {} ({})", report.severity_grade, report.severity_grade.display_color());
    }

    Ok(())
}
