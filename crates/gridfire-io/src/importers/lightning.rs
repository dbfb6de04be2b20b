use anyhow::{Context, Result};
use gridfire_core::LightningGrid;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// On-disk layout of the lightning grid: a JSON extraction of the monthly
/// flash-density climatology (month axis 1-indexed, density month-major).
#[derive(Debug, Deserialize)]
struct LightningGridFile {
    months: Vec<u32>,
    latitude: Vec<f64>,
    longitude: Vec<f64>,
    flash_density: Vec<Vec<Vec<f64>>>,
}

/// Load and validate a lightning flash-density grid. Dimension mismatches
/// between the axes and the density array are fatal.
pub fn load_lightning_grid(path: &Path) -> Result<LightningGrid> {
    let file = File::open(path)
        .with_context(|| format!("opening lightning grid '{}'", path.display()))?;
    let raw: LightningGridFile = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing lightning grid '{}'", path.display()))?;
    let grid = LightningGrid::new(raw.months, raw.latitude, raw.longitude, raw.flash_density)
        .with_context(|| format!("validating lightning grid '{}'", path.display()))?;
    Ok(grid)
}
