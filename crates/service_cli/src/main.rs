//! Polymc CLI - Monte-Carlo polygon area estimation
//!
//! Operational entry point for the estimator workspace.
//!
//! # Commands
//!
//! - `polymc estimate <polygon-file>` - Estimate the polygon's area
//! - `polymc check <polygon-file>` - Validate a polygon file without sampling
//!
//! # Architecture
//!
//! As the service layer of the workspace, this crate wires configuration
//! (file, environment, flags) into `estimator_engine` and renders its
//! results.

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use commands::estimate::EstimateOptions;
use config::FileConfig;

/// Polymc Monte-Carlo area estimator CLI
#[derive(Parser)]
#[command(name = "polymc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "polymc.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate the area of a polygon by Monte-Carlo sampling
    Estimate {
        /// Path to the polygon file (whitespace-separated `x y` pairs)
        polygon: String,

        /// Total number of sample points
        #[arg(short, long)]
        points: Option<usize>,

        /// Number of workers (defaults to available CPUs)
        #[arg(short, long)]
        workers: Option<usize>,

        /// Sampling mode (normal, verbose)
        #[arg(short, long)]
        mode: Option<String>,

        /// Base seed for reproducible runs
        #[arg(short, long)]
        seed: Option<u64>,

        /// Sampling region as `xmin,xmax,ymin,ymax`
        #[arg(short, long, default_value = "0,2,0,2")]
        region: String,

        /// Per-worker idle timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Results file receiving one `id;processed;inside` record per worker
        #[arg(short, long)]
        output: Option<String>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Run as a rayon batch instead of thread-per-worker
        #[arg(long)]
        batch: bool,
    },

    /// Validate a polygon file and report its extent
    Check {
        /// Path to the polygon file
        polygon: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let file_config = FileConfig::load_or_default(&cli.config).with_env_override();

    // Initialise tracing; RUST_LOG wins over config and flags.
    let default_level = if cli.verbose {
        "debug".to_string()
    } else {
        file_config.log_level.clone()
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Estimate {
            polygon,
            points,
            workers,
            mode,
            seed,
            region,
            timeout_secs,
            output,
            format,
            batch,
        } => commands::estimate::run(EstimateOptions {
            polygon_file: polygon,
            points,
            workers,
            mode,
            seed,
            region,
            timeout_secs,
            output,
            format,
            batch,
            file_config,
        }),
        Commands::Check { polygon } => commands::check::run(&polygon),
    }
}
