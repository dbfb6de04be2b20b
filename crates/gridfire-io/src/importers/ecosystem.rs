use anyhow::{Context, Result};
use csv::ReaderBuilder;
use gridfire_core::{EcosystemSite, EcosystemState, EcosystemType, GeoPoint, LeafHabit};
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

/// Columns of the ecosystem classification table we consume. The table
/// carries more columns (Species, Soil_type, Soil_drainage); the csv
/// deserializer ignores those.
#[derive(Debug, Deserialize)]
struct RawEcosystemRow {
    #[serde(rename = "Region")]
    region: String,
    #[serde(rename = "Latitude")]
    latitude: f64,
    #[serde(rename = "Longitude")]
    longitude: f64,
    #[serde(rename = "Ecosystem_type")]
    ecosystem_type: String,
    #[serde(rename = "Ecosystem_state")]
    ecosystem_state: String,
    #[serde(rename = "Leaf_habit")]
    leaf_habit: String,
}

/// Result of loading an ecosystem classification table.
pub struct EcosystemImport {
    pub sites: Vec<EcosystemSite>,
    pub skipped: usize,
}

/// Load the ecosystem classification CSV, filtered to one region.
///
/// Categorical columns are tagged into enums here, at ingestion, so
/// downstream scoring never re-derives classes from label strings.
pub fn load_ecosystem_table(path: &Path, region: &str) -> Result<EcosystemImport> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening ecosystem table '{}'", path.display()))?;

    let mut sites = Vec::new();
    let mut skipped = 0usize;
    for (idx, result) in rdr.deserialize::<RawEcosystemRow>().enumerate() {
        match result {
            Ok(raw) => {
                if raw.region != region {
                    continue;
                }
                sites.push(EcosystemSite {
                    coordinate: GeoPoint::new(raw.latitude, raw.longitude),
                    state: EcosystemState::parse(&raw.ecosystem_state),
                    ecosystem_type: EcosystemType::parse(&raw.ecosystem_type),
                    leaf_habit: LeafHabit::parse(&raw.leaf_habit),
                });
            }
            Err(err) => {
                warn!(row = idx + 2, error = %err, "skipping malformed ecosystem row");
                skipped += 1;
            }
        }
    }
    Ok(EcosystemImport { sites, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "Region,Latitude,Longitude,Species,Soil_type,Soil_drainage,Ecosystem_type,Ecosystem_state,Leaf_habit\n";

    #[test]
    fn filters_to_region_and_tags_enums() {
        let mut file = NamedTempFile::new().unwrap();
        let content = format!(
            "{HEADER}California,37.1,-121.2,Quercus,loam,Dry,Savanna,Unmanaged,Deciduous\n\
             Oregon,44.0,-122.0,Pseudotsuga,loam,Wet,Forest,Natural,Evergreen\n"
        );
        file.write_all(content.as_bytes()).unwrap();
        let import = load_ecosystem_table(file.path(), "California").unwrap();
        assert_eq!(import.sites.len(), 1);
        assert_eq!(import.skipped, 0);
        let site = &import.sites[0];
        assert_eq!(site.state, EcosystemState::Unmanaged);
        assert_eq!(site.ecosystem_type, EcosystemType::Savanna);
        assert_eq!(site.leaf_habit, LeafHabit::Deciduous);
        assert_eq!(site.coordinate, GeoPoint::new(37.1, -121.2));
    }

    #[test]
    fn malformed_rows_are_counted() {
        let mut file = NamedTempFile::new().unwrap();
        let content =
            format!("{HEADER}California,not_a_lat,-121.2,x,y,z,Forest,Managed,Evergreen\n");
        file.write_all(content.as_bytes()).unwrap();
        let import = load_ecosystem_table(file.path(), "California").unwrap();
        assert!(import.sites.is_empty());
        assert_eq!(import.skipped, 1);
    }
}
