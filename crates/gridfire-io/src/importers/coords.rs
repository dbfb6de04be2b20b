use anyhow::{Context, Result};
use csv::ReaderBuilder;
use gridfire_core::GeoPoint;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

/// One entry of the feeder coordinate lookup, as exported by the upstream
/// circuit-model parser (already reprojected to WGS84).
#[derive(Debug, Deserialize)]
struct CoordinateRow {
    feeder: String,
    latitude: f64,
    longitude: f64,
}

/// Load the feeder → coordinate lookup CSV.
///
/// Entries with non-finite coordinates are dropped here: a garbage
/// coordinate is worse than no coordinate, because the sentinel given to
/// unlooked-up feeders is at least visibly off-region.
pub fn load_coordinate_lookup(path: &Path) -> Result<HashMap<String, GeoPoint>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening coordinate lookup '{}'", path.display()))?;

    let mut lookup = HashMap::new();
    for (idx, result) in rdr.deserialize::<CoordinateRow>().enumerate() {
        match result {
            Ok(row) => {
                let point = GeoPoint::new(row.latitude, row.longitude);
                if !point.is_finite() {
                    warn!(row = idx + 2, feeder = %row.feeder, "dropping non-finite coordinate");
                    continue;
                }
                lookup.insert(row.feeder, point);
            }
            Err(err) => {
                warn!(row = idx + 2, error = %err, "skipping malformed coordinate row");
            }
        }
    }
    Ok(lookup)
}
