//! Subcommand implementations

use anyhow::{anyhow, Context, Result};
use mb_core::{MbError, MuscleGroup, Side};
use mb_processing::{AnalyzerConfig, ImbalanceAnalyzer, ImbalanceReport, TrialSession, TrialUpdate};
use mb_simulation::{BilateralSimulator, EmgConfig, ReadingStream, SignalPattern, StreamConfig};
use std::path::Path;
use tracing::{debug, info, warn};

/// Load a configuration file, or fall back to the standard configuration
pub fn load_config(path: Option<&Path>) -> Result<AnalyzerConfig> {
    match path {
        Some(path) => AnalyzerConfig::from_file(path)
            .with_context(|| format!("loading analyzer configuration from {}", path.display())),
        None => Ok(AnalyzerConfig::default()),
    }
}

pub fn analyze(config: AnalyzerConfig, left: &[f64], right: &[f64], json: bool) -> Result<()> {
    let mut analyzer = ImbalanceAnalyzer::with_config(config);
    analyzer
        .try_process_readings(left, right)
        .context("analyzing readings")?;

    print_report(&analyzer.report(), json)
}

/// Settings for a simulated trial
#[derive(Debug, Clone)]
pub struct TrialOptions {
    pub imbalance: f64,
    pub duration: f64,
    pub muscle: MuscleGroup,
    pub pattern: String,
    pub seed: Option<u64>,
    pub fast: bool,
    pub json: bool,
}

pub async fn trial(config: AnalyzerConfig, options: TrialOptions) -> Result<()> {
    let pattern = SignalPattern::preset(&options.pattern)
        .ok_or_else(|| anyhow!("unknown pattern '{}', see `muscleband presets`", options.pattern))?;

    let stream_config = StreamConfig {
        emg_config: EmgConfig {
            pattern,
            seed: options.seed,
            ..EmgConfig::default()
        },
        duration: options.duration,
        update_rate: if options.fast { 10_000.0 } else { StreamConfig::default().update_rate },
        ..StreamConfig::default()
    };

    let (left, right) =
        BilateralSimulator::with_imbalance(stream_config.emg_config.clone(), options.imbalance)?
            .into_parts();
    let mut session = TrialSession::for_muscle(config, options.muscle);

    info!(
        pattern = pattern.description(),
        muscle = %session.muscle_group(),
        imbalance = options.imbalance,
        duration = options.duration,
        "starting simulated trial"
    );

    let mut last_update = TrialUpdate::default();
    for (side, simulator) in [(Side::Left, left), (Side::Right, right)] {
        if !options.json {
            println!("Recording {} {} for {:.1}s...", side, session.muscle_group(), options.duration);
        }

        session.start(side)?;
        let stream = ReadingStream::with_simulator(stream_config.clone(), simulator)?;
        let (mut receiver, handle) = stream.spawn();
        while let Some(chunk) = receiver.recv().await {
            record_chunk(&mut session, &chunk)?;
        }
        let stats = handle.await.context("reading stream task failed")?;
        debug!(%side, samples = stats.samples_sent, wall_time = stats.wall_time, "side recorded");

        last_update = session.stop()?;
        if options.json {
            println!("{}", serde_json::to_string(&last_update)?);
        } else if let Some(strength) = last_update.strength(side) {
            println!("  {} strength: {:.2}", side, strength);
        }
    }

    let report = last_update
        .report()
        .ok_or_else(|| anyhow!("trial finished without both sides recorded"))?;
    if !options.json {
        println!();
        print_report(&report, false)?;
    }
    Ok(())
}

/// Record one streamed chunk. A chunk rejected under strict validation is
/// skipped and the side keeps recording.
fn record_chunk(session: &mut TrialSession, chunk: &[f64]) -> Result<()> {
    match session.record(chunk) {
        Ok(()) => Ok(()),
        Err(MbError::InvalidReading { side, index, value }) => {
            warn!(%side, index, value, "dropping chunk with invalid reading");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

pub fn presets() {
    println!("Available patterns:");
    for (name, pattern) in SignalPattern::presets() {
        println!("  {:<10} {}", name, pattern.description());
    }
}

fn print_report(report: &ImbalanceReport, json: bool) -> Result<()> {
    if json {
        println!("{}", report.to_json()?);
        return Ok(());
    }

    println!("Left strength:   {:.2}", report.left_bicep);
    println!("Right strength:  {:.2}", report.right_bicep);
    println!("Difference:      {:.2}%", report.percentage_difference);
    println!(
        "Severity grade:  {} ({})",
        report.severity_grade,
        report.severity_grade.display_color()
    );
    if let Some(side) = report.dominant_side() {
        println!("Stronger side:   {}", side);
    }
    Ok(())
}
