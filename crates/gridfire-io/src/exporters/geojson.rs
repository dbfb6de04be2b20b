//! GeoJSON (RFC 7946) export of environmental point collections.
//!
//! One FeatureCollection per factor kind. Coordinates are emitted in
//! `[longitude, latitude]` order as the RFC requires.

use anyhow::{Context, Result};
use gridfire_core::{EnvironmentalPoint, TimeTag};
use serde_json::{json, Map, Value};
use std::fs;
use std::path::Path;

/// Build a FeatureCollection value from a sequence of environmental points.
pub fn feature_collection(points: &[EnvironmentalPoint]) -> Value {
    let features: Vec<Value> = points.iter().map(feature).collect();
    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

fn feature(point: &EnvironmentalPoint) -> Value {
    let mut properties = Map::new();
    properties.insert("factor".into(), json!(point.factor_kind.as_str()));
    properties.insert("risk".into(), json!(point.risk_score));
    match point.time_tag {
        Some(TimeTag::Month(month)) => {
            properties.insert("month".into(), json!(month));
        }
        Some(TimeTag::Timestamp(ts)) => {
            properties.insert("observed_at".into(), json!(ts.to_string()));
        }
        None => {}
    }
    json!({
        "type": "Feature",
        "geometry": {
            "type": "Point",
            "coordinates": [point.coordinate.lon, point.coordinate.lat],
        },
        "properties": Value::Object(properties),
    })
}

/// Serialize a point collection to a GeoJSON file.
pub fn write_feature_collection(path: &Path, points: &[EnvironmentalPoint]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory '{}'", parent.display()))?;
    }
    let collection = feature_collection(points);
    let text = serde_json::to_string_pretty(&collection)
        .context("serializing GeoJSON feature collection")?;
    fs::write(path, text).with_context(|| format!("writing GeoJSON '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridfire_core::{FactorKind, GeoPoint};
    use tempfile::tempdir;

    fn point(lat: f64, lon: f64, score: f64, month: Option<u8>) -> EnvironmentalPoint {
        EnvironmentalPoint {
            factor_kind: FactorKind::Vegetation,
            coordinate: GeoPoint::new(lat, lon),
            risk_score: score,
            time_tag: month.map(TimeTag::Month),
        }
    }

    #[test]
    fn collection_has_rfc_coordinate_order() {
        let value = feature_collection(&[point(37.0, -121.0, 4.0, Some(3))]);
        assert_eq!(value["type"], "FeatureCollection");
        let geometry = &value["features"][0]["geometry"];
        assert_eq!(geometry["coordinates"][0], -121.0); // longitude first
        assert_eq!(geometry["coordinates"][1], 37.0);
        let properties = &value["features"][0]["properties"];
        assert_eq!(properties["factor"], "vegetation");
        assert_eq!(properties["month"], 3);
    }

    #[test]
    fn month_omitted_when_absent() {
        let value = feature_collection(&[point(37.0, -121.0, 8.0, None)]);
        assert!(value["features"][0]["properties"].get("month").is_none());
    }

    #[test]
    fn writes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("veg_risk.geojson");
        write_feature_collection(&path, &[point(37.0, -121.0, 4.0, Some(1))]).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["features"].as_array().unwrap().len(), 1);
    }
}
