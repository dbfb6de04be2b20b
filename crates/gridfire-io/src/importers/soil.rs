use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use csv::ReaderBuilder;
use gridfire_core::{GeoPoint, SoilObservation};
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Deserialize)]
struct RawSoilRow {
    date: String,
    time: String,
    latitude: f64,
    longitude: f64,
    moisture_fraction: f64,
}

/// Result of loading a soil-moisture table.
pub struct SoilImport {
    pub observations: Vec<SoilObservation>,
    pub skipped: usize,
}

/// Load the soil-moisture observation CSV
/// (`date, time, latitude, longitude, moisture_fraction`).
///
/// Timestamps are metadata only: unparseable date/time fields degrade to
/// `None` rather than skipping the observation. Non-finite values pass
/// through; the environmental index filters them with the rest of its
/// range checks.
pub fn load_soil_table(path: &Path) -> Result<SoilImport> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening soil moisture table '{}'", path.display()))?;

    let mut observations = Vec::new();
    let mut skipped = 0usize;
    for (idx, result) in rdr.deserialize::<RawSoilRow>().enumerate() {
        match result {
            Ok(raw) => {
                let observed_at = parse_timestamp(&raw.date, &raw.time);
                observations.push(SoilObservation {
                    coordinate: GeoPoint::new(raw.latitude, raw.longitude),
                    moisture_fraction: raw.moisture_fraction,
                    observed_at,
                });
            }
            Err(err) => {
                warn!(row = idx + 2, error = %err, "skipping malformed soil moisture row");
                skipped += 1;
            }
        }
    }
    Ok(SoilImport {
        observations,
        skipped,
    })
}

fn parse_timestamp(date: &str, time: &str) -> Option<chrono::NaiveDateTime> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time.trim(), "%H:%M"))
        .ok()?;
    Some(date.and_time(time))
}
