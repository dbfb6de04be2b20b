use anyhow::{Context, Result};
use csv::ReaderBuilder;
use gridfire_core::OverloadRow;
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

/// Raw row of the overload summary table. Column names match the upstream
/// load-flow analysis export.
#[derive(Debug, Deserialize)]
struct RawOverloadRow {
    #[serde(rename = "feeder")]
    feeder_id: String,
    #[serde(rename = "percentage overhead")]
    percent_overhead: f64,
    #[serde(rename = "percentage transformers overloaded")]
    percent_transformers_overloaded: f64,
    #[serde(rename = "percentage line length overloaded")]
    percent_line_overloaded: f64,
}

/// Result of loading an overload summary table.
pub struct OverloadImport {
    pub rows: Vec<OverloadRow>,
    pub skipped: usize,
}

/// Load the per-feeder overload summary CSV.
///
/// The `subtransmission` pseudo-feeder aggregates upstream assets and is
/// not a scorable feeder; its rows are ignored without counting as skips.
pub fn load_overload_table(path: &Path) -> Result<OverloadImport> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening overload summary '{}'", path.display()))?;

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for (idx, result) in rdr.deserialize::<RawOverloadRow>().enumerate() {
        match result {
            Ok(raw) => {
                if raw.feeder_id == "subtransmission" {
                    continue;
                }
                rows.push(OverloadRow {
                    feeder_id: raw.feeder_id,
                    percent_overhead: raw.percent_overhead,
                    percent_line_overloaded: raw.percent_line_overloaded,
                    percent_transformers_overloaded: raw.percent_transformers_overloaded,
                });
            }
            Err(err) => {
                warn!(row = idx + 2, error = %err, "skipping malformed overload row");
                skipped += 1;
            }
        }
    }
    Ok(OverloadImport { rows, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_rows_and_drops_subtransmission() {
        let file = write_csv(
            "feeder,percentage overhead,percentage transformers overloaded,percentage line length overloaded\n\
             p1uhs0_1247,50.0,0.1,0.2\n\
             subtransmission,0.0,0.0,0.0\n",
        );
        let import = load_overload_table(file.path()).unwrap();
        assert_eq!(import.rows.len(), 1);
        assert_eq!(import.skipped, 0);
        assert_eq!(import.rows[0].feeder_id, "p1uhs0_1247");
        assert_eq!(import.rows[0].percent_overhead, 50.0);
        assert_eq!(import.rows[0].percent_line_overloaded, 0.2);
    }

    #[test]
    fn malformed_rows_are_skipped_and_counted() {
        let file = write_csv(
            "feeder,percentage overhead,percentage transformers overloaded,percentage line length overloaded\n\
             p1uhs0_1247,50.0,0.1,0.2\n\
             p1ulv4837,not_a_number,0.0,0.0\n",
        );
        let import = load_overload_table(file.path()).unwrap();
        assert_eq!(import.rows.len(), 1);
        assert_eq!(import.skipped, 1);
    }

    #[test]
    fn missing_file_is_fatal() {
        assert!(load_overload_table(Path::new("/nonexistent/summary.csv")).is_err());
    }
}
