//! Loading the JSON risk-configuration override.

use anyhow::{Context, Result};
use gridfire_core::RiskConfig;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Load a [`RiskConfig`] from a JSON file. Fields absent from the file keep
/// their defaults, so a config override only needs to name what it changes.
pub fn load_risk_config(path: &Path) -> Result<RiskConfig> {
    let file =
        File::open(path).with_context(|| format!("opening risk config '{}'", path.display()))?;
    let config: RiskConfig = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing risk config '{}'", path.display()))?;
    Ok(config)
}
