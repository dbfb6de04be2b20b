//! Run configuration: mitigation posture constants, the geographic bounding
//! region, the low-voltage classifier, and the correlation matrix.
//!
//! All of these are policy inputs, not computed data. They are loaded once
//! at startup (JSON override on top of defaults) and passed explicitly into
//! the extractor and fusion engine.

use crate::geo::GeoPoint;
use crate::risk::{CorrelationMatrix, RiskTrait, RiskVector};
use crate::VoltageClass;
use serde::{Deserialize, Serialize};

/// Regional mitigation posture: fixed policy scores for trait indices 10-14.
///
/// These describe deployed countermeasures (or their absence) rather than
/// measured circuit properties, so they are supplied as configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MitigationPosture {
    pub hif_detection: f64,
    pub powersafety_shutoff: f64,
    pub misting_fire_suppression: f64,
    pub response_team_coordination: f64,
    pub high_fidelity_tracking: f64,
}

impl Default for MitigationPosture {
    fn default() -> Self {
        // HIF detection is still a research area; power-safety shutoffs are
        // deployed in parts of California; misting nozzles have only seen
        // use near high-voltage lines in China; response coordination is
        // hard to quantify; most response teams have ~1 km satellite
        // tracking.
        MitigationPosture {
            hif_detection: 10.0,
            powersafety_shutoff: 4.0,
            misting_fire_suppression: 10.0,
            response_team_coordination: 4.0,
            high_fidelity_tracking: 1.0,
        }
    }
}

impl MitigationPosture {
    /// Write the posture constants into their trait slots.
    pub fn apply(&self, vector: &mut RiskVector) {
        vector.set(RiskTrait::HifDetection, self.hif_detection);
        vector.set(RiskTrait::PowersafetyShutoff, self.powersafety_shutoff);
        vector.set(
            RiskTrait::MistingFireSuppression,
            self.misting_fire_suppression,
        );
        vector.set(
            RiskTrait::ResponseTeamCoordination,
            self.response_team_coordination,
        );
        vector.set(RiskTrait::HighFidelityTracking, self.high_fidelity_tracking);
    }
}

/// Geographic acceptance window for environmental observations.
///
/// Edges are inclusive: an observation exactly on a boundary is kept.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingRegion {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl BoundingRegion {
    pub const fn new(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64) -> Self {
        BoundingRegion {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        }
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        point.lat >= self.lat_min
            && point.lat <= self.lat_max
            && point.lon >= self.lon_min
            && point.lon <= self.lon_max
    }
}

impl Default for BoundingRegion {
    /// Greater Bay Area window: north to Sacramento, south and east to
    /// Fresno. Tighten per deployment via config.
    fn default() -> Self {
        BoundingRegion::new(36.0, 39.0, -122.0, -118.0)
    }
}

/// Classifies feeders into voltage classes from their identifier, once, at
/// ingestion time. Downstream code branches on [`VoltageClass`], never on
/// the identifier string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoltageClassifier {
    /// Substring markers that denote a low-voltage segment.
    pub low_voltage_markers: Vec<String>,
}

impl Default for VoltageClassifier {
    fn default() -> Self {
        VoltageClassifier {
            low_voltage_markers: vec!["lv".to_string()],
        }
    }
}

impl VoltageClassifier {
    pub fn classify(&self, feeder_id: &str) -> VoltageClass {
        if self
            .low_voltage_markers
            .iter()
            .any(|marker| feeder_id.contains(marker.as_str()))
        {
            VoltageClass::Low
        } else {
            VoltageClass::Medium
        }
    }
}

/// Complete risk-model configuration, JSON-overridable field by field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    pub posture: MitigationPosture,
    pub region: BoundingRegion,
    pub classifier: VoltageClassifier,
    pub matrix: CorrelationMatrix,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::TerrainFactor;

    #[test]
    fn default_posture_matches_policy() {
        let p = MitigationPosture::default();
        assert_eq!(p.hif_detection, 10.0);
        assert_eq!(p.powersafety_shutoff, 4.0);
        assert_eq!(p.high_fidelity_tracking, 1.0);
    }

    #[test]
    fn posture_applies_to_trait_slots() {
        let mut v = RiskVector::new();
        MitigationPosture::default().apply(&mut v);
        assert_eq!(v.get(RiskTrait::HifDetection), 10.0);
        assert_eq!(v.get(RiskTrait::HighFidelityTracking), 1.0);
        assert_eq!(v.get(RiskTrait::Overhead), 0.0);
    }

    #[test]
    fn bounding_region_edges_are_inclusive() {
        let region = BoundingRegion::default();
        assert!(region.contains(GeoPoint::new(36.0, -122.0)));
        assert!(region.contains(GeoPoint::new(39.0, -118.0)));
        assert!(!region.contains(GeoPoint::new(35.999, -120.0)));
        assert!(!region.contains(GeoPoint::new(37.0, -117.999)));
    }

    #[test]
    fn classifier_flags_low_voltage_markers() {
        let c = VoltageClassifier::default();
        assert_eq!(c.classify("p1ulv4837"), VoltageClass::Low);
        assert_eq!(c.classify("p1uhs0_1247"), VoltageClass::Medium);
    }

    #[test]
    fn config_json_override_is_partial() {
        let json = r#"{ "posture": { "powersafety_shutoff": 9.0 } }"#;
        let config: RiskConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.posture.powersafety_shutoff, 9.0);
        // untouched fields keep their defaults
        assert_eq!(config.posture.hif_detection, 10.0);
        assert!(config
            .matrix
            .interrelates(RiskTrait::Overhead, TerrainFactor::Lightning));
    }
}
