//! Estimate command implementation
//!
//! Runs the full pipeline: parse the polygon, build the run
//! configuration from file/env/flags, execute the engine and render the
//! results.

use std::io::Write;
use std::time::Duration;

use estimator_core::geometry::{BoundingRegion, Polygon};
use estimator_engine::aggregate::Estimate;
use estimator_engine::config::{EstimatorConfig, SampleMode};
use estimator_engine::error::EngineError;
use estimator_engine::runner::{run_batch, run_threaded_with, RunObservers};
use estimator_engine::transport::{wire, Message};
use tracing::{error, info, warn};

use crate::config::FileConfig;
use crate::{CliError, Result};

/// Collected inputs of one estimate invocation, flags layered over the
/// file configuration.
pub struct EstimateOptions {
    /// Polygon file path.
    pub polygon_file: String,
    /// Total sample points (flag).
    pub points: Option<usize>,
    /// Worker count (flag).
    pub workers: Option<usize>,
    /// Mode name (flag).
    pub mode: Option<String>,
    /// Base seed (flag).
    pub seed: Option<u64>,
    /// Region spec `xmin,xmax,ymin,ymax`.
    pub region: String,
    /// Per-worker idle timeout in seconds (flag).
    pub timeout_secs: Option<u64>,
    /// Optional results file.
    pub output: Option<String>,
    /// Output format (table, json).
    pub format: String,
    /// Use the rayon batch runner.
    pub batch: bool,
    /// File/environment configuration layer.
    pub file_config: FileConfig,
}

/// Run the estimate command
pub fn run(options: EstimateOptions) -> Result<()> {
    let polygon = load_polygon(&options.polygon_file)?;
    let region = parse_region(&options.region)?;
    let config = build_config(&options)?;

    info!("Starting estimation...");
    info!("  Polygon: {} ({} vertices)", options.polygon_file, polygon.vertex_count());
    info!("  Region area: {}", region.area());
    info!("  Points: {}", config.total_points());
    info!("  Workers: {}", config.worker_count());
    info!("  Seed: {}", config.seed());

    let verbose_points = config.mode() == SampleMode::Verbose;
    let result = if options.batch {
        if verbose_points {
            warn!("batch runner does not stream inside points; counts only");
        }
        run_batch(&config, &polygon, &region)
    } else {
        run_threaded_with(
            &config,
            &polygon,
            &region,
            RunObservers {
                on_progress: Some(Box::new(|percent| {
                    info!(percent, "progress");
                })),
                on_point: verbose_points.then(|| {
                    Box::new(|worker: usize, p: estimator_core::types::Point| {
                        println!("{};{};{}", worker, p.x, p.y);
                    }) as Box<dyn FnMut(usize, estimator_core::types::Point) + Send>
                }),
            },
        )
    };

    match result {
        Ok(estimate) => {
            render(&estimate, &options, false)?;
            info!("Estimation complete");
            Ok(())
        }
        Err(EngineError::PartialCoverage {
            expected,
            processed,
            failed_workers,
            estimate,
        }) => {
            error!(
                expected,
                processed,
                ?failed_workers,
                "partial coverage: not every worker reported"
            );
            render(&estimate, &options, true)?;
            Err(EngineError::PartialCoverage {
                expected,
                processed,
                failed_workers,
                estimate,
            }
            .into())
        }
        Err(err) => Err(err.into()),
    }
}

fn load_polygon(path: &str) -> Result<Polygon> {
    if !std::path::Path::new(path).exists() {
        return Err(CliError::FileNotFound(path.to_string()));
    }
    let text = std::fs::read_to_string(path)?;
    Ok(Polygon::parse(&text)?)
}

fn parse_region(spec: &str) -> Result<BoundingRegion> {
    let fields: Vec<f64> = spec
        .split(',')
        .map(|f| f.trim().parse::<f64>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| {
            CliError::InvalidArgument(format!(
                "Bad region '{}': expected xmin,xmax,ymin,ymax",
                spec
            ))
        })?;

    if fields.len() != 4 {
        return Err(CliError::InvalidArgument(format!(
            "Bad region '{}': expected 4 comma-separated values",
            spec
        )));
    }

    Ok(BoundingRegion::new(fields[0], fields[1], fields[2], fields[3])?)
}

fn build_config(options: &EstimateOptions) -> Result<EstimatorConfig> {
    let file = &options.file_config;

    let points = options
        .points
        .or(file.points)
        .ok_or_else(|| CliError::InvalidArgument("--points is required".to_string()))?;

    let mode = match options
        .mode
        .as_deref()
        .or(file.mode.as_deref())
        .unwrap_or("normal")
    {
        "normal" => SampleMode::Normal,
        "verbose" => SampleMode::Verbose,
        other => {
            return Err(CliError::InvalidArgument(format!(
                "Unknown mode: {}. Supported: normal, verbose",
                other
            )));
        }
    };

    let mut builder = EstimatorConfig::builder().total_points(points).mode(mode);
    if let Some(workers) = options.workers.or(file.workers) {
        builder = builder.worker_count(workers);
    }
    if let Some(seed) = options.seed.or(file.seed) {
        builder = builder.seed(seed);
    }
    if let Some(secs) = options.timeout_secs.or(file.timeout_secs) {
        builder = builder.worker_timeout(Duration::from_secs(secs));
    }

    Ok(builder.build()?)
}

fn render(estimate: &Estimate, options: &EstimateOptions, partial: bool) -> Result<()> {
    if let Some(path) = &options.output {
        write_results_file(path, estimate)?;
        info!("Per-worker results written to {}", path);
    }

    if partial {
        warn!("Output below covers only the points that were reported");
    }

    match options.format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(estimate)?);
        }
        "table" => {
            println!("\n┌────────────┬────────────┬────────────┐");
            println!("│ Worker     │ Processed  │ Inside     │");
            println!("├────────────┼────────────┼────────────┤");
            let mut partials = estimate.partials.clone();
            partials.sort_by_key(|p| p.worker_id);
            for p in &partials {
                println!(
                    "│ {:<10} │ {:>10} │ {:>10} │",
                    p.worker_id, p.processed, p.inside
                );
            }
            println!("└────────────┴────────────┴────────────┘");
            println!(
                "Estimated area: {:.2} square units ({}/{} points inside)",
                estimate.area, estimate.total_inside, estimate.total_processed
            );
        }
        other => {
            return Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: json, table",
                other
            )));
        }
    }

    Ok(())
}

/// Writes one wire record per worker, the same `id;processed;inside`
/// lines the workers put on their transports.
fn write_results_file(path: &str, estimate: &Estimate) -> Result<()> {
    let mut file = std::fs::File::create(path)?;
    for partial in &estimate.partials {
        file.write_all(wire::encode(&Message::Partial(*partial)).as_bytes())?;
    }
    Ok(())
}
