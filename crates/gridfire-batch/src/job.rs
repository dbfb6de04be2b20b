use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One geographic region's input tables: the unit of parallel ingestion.
#[derive(Debug, Clone)]
pub struct RegionJob {
    pub region: String,
    pub overload_table: PathBuf,
    pub coordinate_table: PathBuf,
}

/// Outcome record for one region, carried into the run manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionRecord {
    pub region: String,
    pub status: String,
    pub error: Option<String>,
    pub num_feeders: usize,
    pub num_unresolved: usize,
    pub num_skipped: usize,
}

/// Scan a data root for region directories and build one job per region.
///
/// A region directory starts with `prefix` (the dataset convention names
/// them `P1U`, `P2R`, ...) and must contain both `summary.csv` and
/// `coords.csv`; directories missing either table are ignored.
pub fn discover_region_jobs(root: &Path, prefix: &str) -> Result<Vec<RegionJob>> {
    let entries = fs::read_dir(root)
        .with_context(|| format!("scanning data root '{}'", root.display()))?;

    let mut jobs = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("reading data root '{}'", root.display()))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !name.starts_with(prefix) {
            continue;
        }
        let overload_table = path.join("summary.csv");
        let coordinate_table = path.join("coords.csv");
        if overload_table.exists() && coordinate_table.exists() {
            jobs.push(RegionJob {
                region: name.to_string(),
                overload_table,
                coordinate_table,
            });
        }
    }
    jobs.sort_by(|a, b| a.region.cmp(&b.region));
    Ok(jobs)
}
