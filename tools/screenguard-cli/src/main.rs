//! ScreenGuard CLI: drive the proximity pipeline from the command line.
//!
//! Usage:
//!   screenguard run [PATH|-]     Feed a face-width trace through the pipeline
//!   screenguard simulate         Generate a synthetic face-width trace
//!   screenguard config           Show or initialize configuration

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use screenguard_common::{AppConfig, MonitorConfig};

mod commands;

#[derive(Parser)]
#[command(
    name = "screenguard",
    about = "Screen distance monitoring from face-size observations",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of the standard location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Feed observations (JSONL or one number per line) through the pipeline
    Run {
        /// Trace file, or "-" for stdin
        #[arg(default_value = "-")]
        input: String,

        /// Print events as JSON lines
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        overrides: MonitorOverrides,
    },

    /// Generate a synthetic approach-and-retreat trace
    Simulate {
        /// Face width during calibration and when sitting back
        #[arg(long, default_value = "0.2")]
        baseline: f64,

        /// Face width while leaning in
        #[arg(long, default_value = "0.4")]
        close: f64,

        /// Frames per second of the simulated camera
        #[arg(long, default_value = "30")]
        fps: u32,

        /// Relative jitter amplitude (0.02 = ±2%)
        #[arg(long, default_value = "0.02")]
        jitter: f64,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Calibration frames at the start of the trace
        #[arg(long)]
        calibration_samples: Option<usize>,
    },

    /// Print the effective configuration
    Config {
        /// Write the default configuration to the standard location
        #[arg(long)]
        init: bool,
    },
}

/// Command-line overrides for monitor parameters.
#[derive(Args, Debug, Default)]
struct MonitorOverrides {
    /// Observations averaged into the baseline
    #[arg(long)]
    calibration_samples: Option<usize>,

    /// Assumed distance during calibration (cm)
    #[arg(long)]
    reference_distance: Option<f64>,

    /// Moving-average window size
    #[arg(long)]
    window: Option<usize>,

    /// Distances below this raise the alert (cm)
    #[arg(long)]
    min_safe: Option<f64>,

    /// Distance required to clear the alert (cm); defaults to --min-safe
    #[arg(long)]
    safe_exit: Option<f64>,
}

impl MonitorOverrides {
    fn apply(&self, mut config: MonitorConfig) -> MonitorConfig {
        if let Some(count) = self.calibration_samples {
            config.calibration_sample_count = count;
        }
        if let Some(distance) = self.reference_distance {
            config.reference_distance_cm = distance;
        }
        if let Some(window) = self.window {
            config.smoothing_window_size = window;
        }
        if let Some(distance) = self.min_safe {
            config.min_safe_distance_cm = distance;
        }
        if let Some(distance) = self.safe_exit {
            config.safe_exit_distance_cm = Some(distance);
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut app_config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {e}", path.display()))?,
        None => AppConfig::load(),
    };

    // Initialize logging
    if cli.verbose {
        app_config.logging.level = "debug".to_string();
    }
    screenguard_common::logging::init_logging(&app_config.logging);

    match cli.command {
        Commands::Run {
            input,
            json,
            overrides,
        } => commands::run::run(input, json, overrides.apply(app_config.monitor)).await,
        Commands::Simulate {
            baseline,
            close,
            fps,
            jitter,
            output,
            calibration_samples,
        } => commands::simulate::run(
            baseline,
            close,
            fps,
            jitter,
            output,
            calibration_samples.unwrap_or(app_config.monitor.calibration_sample_count),
        ),
        Commands::Config { init } => commands::config::run(&app_config, init),
    }
}
