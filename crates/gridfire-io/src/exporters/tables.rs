//! Tabular exports: the per-feeder structural risk table (inspection
//! output) and the fused risk table (primary deliverable).

use anyhow::{Context, Result};
use csv::Writer;
use gridfire_core::{FusedRisk, RiskTrait, StructuralRisk};
use serde_json::json;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Write the structural risk table: feeder id, coordinate, one column per
/// named trait in canonical order.
pub fn write_structural_risk_csv(path: &Path, risks: &[StructuralRisk]) -> Result<()> {
    ensure_parent(path)?;
    let mut wtr = Writer::from_path(path)
        .with_context(|| format!("creating structural risk table '{}'", path.display()))?;

    let mut header = vec![
        "feeder".to_string(),
        "latitude".to_string(),
        "longitude".to_string(),
    ];
    header.extend(RiskTrait::ALL.iter().map(|t| t.name().to_string()));
    wtr.write_record(&header)
        .context("writing structural risk header")?;

    for risk in risks {
        let mut record = vec![
            risk.feeder_id.clone(),
            risk.coordinate.lat.to_string(),
            risk.coordinate.lon.to_string(),
        ];
        record.extend(risk.vector.as_slice().iter().map(|s| s.to_string()));
        wtr.write_record(&record)
            .with_context(|| format!("writing structural risk row for '{}'", risk.feeder_id))?;
    }
    wtr.flush().context("flushing structural risk table")?;
    Ok(())
}

/// Write the fused risk table as JSON: feeder id → aggregate score and
/// `[longitude, latitude]` coordinate.
///
/// Feeder ids are the JSON keys, so a duplicate id (two regions claiming
/// the same feeder) keeps only the last record; the CSV exporter keeps
/// every row. Duplicates are logged so the two deliverables can't silently
/// disagree.
pub fn write_fused_risk_json(path: &Path, fused: &[FusedRisk]) -> Result<()> {
    ensure_parent(path)?;
    let mut map = serde_json::Map::new();
    for record in fused {
        let previous = map.insert(
            record.feeder_id.clone(),
            json!({
                "aggregate_score": record.aggregate_score,
                "coordinates": [record.coordinate.lon, record.coordinate.lat],
            }),
        );
        if previous.is_some() {
            warn!(feeder = %record.feeder_id, "duplicate feeder id in fused risk table, keeping the later record");
        }
    }
    let text = serde_json::to_string_pretty(&serde_json::Value::Object(map))
        .context("serializing fused risk table")?;
    fs::write(path, text)
        .with_context(|| format!("writing fused risk table '{}'", path.display()))?;
    Ok(())
}

/// Write the fused risk table as CSV for spreadsheet-side ranking.
pub fn write_fused_risk_csv(path: &Path, fused: &[FusedRisk]) -> Result<()> {
    ensure_parent(path)?;
    let mut wtr = Writer::from_path(path)
        .with_context(|| format!("creating fused risk table '{}'", path.display()))?;
    wtr.write_record(["feeder", "latitude", "longitude", "aggregate_score"])
        .context("writing fused risk header")?;
    for record in fused {
        wtr.write_record([
            record.feeder_id.as_str(),
            &record.coordinate.lat.to_string(),
            &record.coordinate.lon.to_string(),
            &record.aggregate_score.to_string(),
        ])
        .with_context(|| format!("writing fused risk row for '{}'", record.feeder_id))?;
    }
    wtr.flush().context("flushing fused risk table")?;
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory '{}'", parent.display()))?;
    }
    Ok(())
}
