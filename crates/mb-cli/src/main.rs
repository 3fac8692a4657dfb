//! MuscleBand command line: bilateral EMG imbalance grading

mod commands;
mod logging;

use clap::{Parser, Subcommand};
use mb_core::MuscleGroup;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "muscleband", version, about = "Grade left/right muscle imbalance from EMG readings")]
struct Cli {
    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Grade two recorded windows given as comma-separated readings
    Analyze {
        /// Left channel readings, e.g. 10,9,8
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        left: Vec<f64>,

        /// Right channel readings
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        right: Vec<f64>,

        /// Analyzer configuration (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Record a simulated trial, left arm first, then right
    Trial {
        /// How much weaker the right arm is, in percent
        #[arg(long, default_value_t = 12.0)]
        imbalance: f64,

        /// Recording length per side in seconds
        #[arg(long, default_value_t = 3.0)]
        duration: f64,

        /// Muscle the bands are strapped around (biceps, forearm, quadriceps, calf)
        #[arg(long, default_value = "biceps")]
        muscle: MuscleGroup,

        /// Activation pattern preset (see `presets`)
        #[arg(long, default_value = "natural")]
        pattern: String,

        /// Random seed for reproducible recordings
        #[arg(long)]
        seed: Option<u64>,

        /// Deliver chunks as fast as possible instead of in real time
        #[arg(long)]
        fast: bool,

        /// Analyzer configuration (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print each stop response as JSON
        #[arg(long)]
        json: bool,
    },

    /// List simulator activation patterns
    Presets,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logger(&cli.log_level, cli.log_json);

    match cli.command {
        Command::Analyze { left, right, config, json } => {
            let config = commands::load_config(config.as_deref())?;
            commands::analyze(config, &left, &right, json)
        }
        Command::Trial { imbalance, duration, muscle, pattern, seed, fast, config, json } => {
            let config = commands::load_config(config.as_deref())?;
            let options = commands::TrialOptions {
                imbalance,
                duration,
                muscle,
                pattern,
                seed,
                fast,
                json,
            };
            commands::trial(config, options).await
        }
        Command::Presets => {
            commands::presets();
            Ok(())
        }
    }
}
