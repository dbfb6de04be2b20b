use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::job::RegionRecord;

/// Run manifest written next to the deliverables, for downstream tooling
/// and for auditing skip rates.
#[derive(Debug, Serialize, Deserialize)]
pub struct RunManifest {
    pub created_at: DateTime<Utc>,
    pub num_regions: usize,
    pub num_feeders: usize,
    pub num_fused: usize,
    /// Per-record problems recovered by skip-and-continue.
    pub skipped_records: usize,
    /// Feeders scored at the sentinel coordinate.
    pub unresolved_feeders: usize,
    pub regions: Vec<RegionRecord>,
    pub outputs: Vec<String>,
}

pub fn write_run_manifest(path: &Path, manifest: &RunManifest) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating manifest directory '{}'", parent.display()))?;
    }
    let json =
        serde_json::to_string_pretty(manifest).context("serializing run manifest to JSON")?;
    fs::write(path, json)
        .with_context(|| format!("writing run manifest '{}'", path.display()))?;
    Ok(())
}

pub fn load_run_manifest(path: &Path) -> Result<RunManifest> {
    let file = fs::File::open(path)
        .with_context(|| format!("opening run manifest '{}'", path.display()))?;
    serde_json::from_reader(file)
        .with_context(|| format!("parsing run manifest '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn manifest_writes_and_reads_back() {
        let record = RegionRecord {
            region: "P1U".into(),
            status: "ok".into(),
            error: None,
            num_feeders: 12,
            num_unresolved: 1,
            num_skipped: 0,
        };
        let manifest = RunManifest {
            created_at: Utc::now(),
            num_regions: 1,
            num_feeders: 12,
            num_fused: 12,
            skipped_records: 0,
            unresolved_feeders: 1,
            regions: vec![record.clone()],
            outputs: vec!["out/fused_risk.json".into()],
        };
        let tmp = NamedTempFile::new().unwrap();
        write_run_manifest(tmp.path(), &manifest).unwrap();
        let parsed = load_run_manifest(tmp.path()).unwrap();
        assert_eq!(parsed.num_feeders, 12);
        assert_eq!(parsed.regions.first().unwrap().region, record.region);
    }
}
