//! Check command implementation
//!
//! Validates a polygon file without running any sampling.

use estimator_core::geometry::Polygon;
use tracing::info;

use crate::{CliError, Result};

/// Run the check command
pub fn run(polygon_file: &str) -> Result<()> {
    if !std::path::Path::new(polygon_file).exists() {
        return Err(CliError::FileNotFound(polygon_file.to_string()));
    }

    let text = std::fs::read_to_string(polygon_file)?;
    let polygon = Polygon::parse(&text)?;
    let (lo, hi) = polygon.bounding_box();

    info!("Polygon file OK");
    println!("Vertices:     {}", polygon.vertex_count());
    println!("Bounding box: [{}, {}] x [{}, {}]", lo.x, hi.x, lo.y, hi.y);
    println!(
        "Suggested sampling region: {},{},{},{}",
        lo.x, hi.x, lo.y, hi.y
    );

    Ok(())
}
