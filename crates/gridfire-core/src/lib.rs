//! # gridfire-core: Feeder Ignition-Risk Data Model
//!
//! Fundamental data structures for feeder-level wildfire-ignition risk
//! scoring: feeder records, trait vectors, environmental observations, and
//! the static risk-policy tables.
//!
//! ## Pipeline shape
//!
//! - Overload tables + coordinate lookups become [`FeederRecord`]s.
//! - The structural extractor turns records into [`StructuralRisk`]
//!   (a [`RiskVector`] per feeder).
//! - Soil, lightning, and vegetation datasets become three independent
//!   [`EnvironmentalPoint`] sequences.
//! - The spatial matcher finds each feeder's nearest observation per
//!   factor, and the fusion engine combines everything through the
//!   [`CorrelationMatrix`] into one [`FusedRisk`] per feeder.
//!
//! ## Modules
//!
//! - [`config`] - mitigation posture, bounding region, classifier, matrix
//! - [`error`] - unified [`RiskError`] / [`RiskResult`]
//! - [`geo`] - WGS84 points and great-circle math
//! - [`lightning`] - validated flash-density climatology grid
//! - [`risk`] - trait enum, risk vector, correlation matrix
//!
//! The gridfire-io crate constructs these types from CSV/JSON sources;
//! gridfire-algo consumes them.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub mod config;
pub mod error;
pub mod geo;
pub mod lightning;
pub mod risk;

pub use config::{BoundingRegion, MitigationPosture, RiskConfig, VoltageClassifier};
pub use error::{RiskError, RiskResult};
pub use geo::{haversine_km, GeoPoint, EARTH_RADIUS_KM};
pub use lightning::LightningGrid;
pub use risk::{
    CorrelationMatrix, RiskTrait, RiskVector, TerrainFactor, DEFAULT_CORRELATION_MATRIX,
    NUM_TRAITS,
};

/// Voltage class of a feeder segment, tagged once at ingestion by the
/// [`VoltageClassifier`]. Low-voltage inner-city and underground segments
/// are insulated; medium-voltage overhead spans are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoltageClass {
    Medium,
    Low,
}

/// One row of the per-feeder overload summary table, before the coordinate
/// join. Percentages are 0-100; ratios are non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverloadRow {
    pub feeder_id: String,
    pub percent_overhead: f64,
    pub percent_line_overloaded: f64,
    pub percent_transformers_overloaded: f64,
}

/// One distribution feeder with its measured structural/loading fields,
/// immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeederRecord {
    pub feeder_id: String,
    pub voltage_class: VoltageClass,
    /// Feeder location; [`GeoPoint::UNRESOLVED`] when the feeder was absent
    /// from the coordinate lookup.
    pub coordinate: GeoPoint,
    pub percent_overhead: f64,
    pub percent_line_overloaded: f64,
    pub percent_transformers_overloaded: f64,
}

impl FeederRecord {
    /// Checks the numeric input constraints: all measured fields must be
    /// finite and non-negative.
    pub fn validate(&self) -> RiskResult<()> {
        let fields = [
            ("percent_overhead", self.percent_overhead),
            ("percent_line_overloaded", self.percent_line_overloaded),
            (
                "percent_transformers_overloaded",
                self.percent_transformers_overloaded,
            ),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(RiskError::Validation(format!(
                    "feeder '{}': {name} must be finite and non-negative, got {value}",
                    self.feeder_id
                )));
            }
        }
        Ok(())
    }
}

/// Which environmental dataset an observation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    SoilMoisture,
    Lightning,
    Vegetation,
}

impl FactorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FactorKind::SoilMoisture => "soil_moisture",
            FactorKind::Lightning => "lightning",
            FactorKind::Vegetation => "vegetation",
        }
    }
}

/// Temporal metadata on an observation. Lightning and vegetation points are
/// monthly climatology; soil observations carry instrument timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeTag {
    Month(u8),
    Timestamp(NaiveDateTime),
}

/// One observation of one environmental factor: a scalar risk score
/// (nominal 0-10) at a geographic coordinate.
///
/// Observations with non-finite coordinates or scores, or outside the
/// bounding region, are dropped at ingestion and never reach the matcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalPoint {
    pub factor_kind: FactorKind,
    pub coordinate: GeoPoint,
    pub risk_score: f64,
    pub time_tag: Option<TimeTag>,
}

/// Per-feeder structural risk table row: the extractor's output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralRisk {
    pub feeder_id: String,
    pub coordinate: GeoPoint,
    pub vector: RiskVector,
}

/// Terminal output record: one aggregate, unitless composite score per
/// feeder, for ranking. Produced once by the fusion engine, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusedRisk {
    pub feeder_id: String,
    pub coordinate: GeoPoint,
    pub aggregate_score: f64,
}

/// One soil-moisture observation, normalized: moisture fraction in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilObservation {
    pub coordinate: GeoPoint,
    pub moisture_fraction: f64,
    pub observed_at: Option<NaiveDateTime>,
}

/// Management state of an ecosystem site. "Unmanaged" means previously
/// managed or disturbed by people; untouched sites are "Natural".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EcosystemState {
    Managed,
    Unmanaged,
    Natural,
}

impl EcosystemState {
    /// Parse a classification-table label; anything unrecognised is treated
    /// as natural.
    pub fn parse(label: &str) -> Self {
        match label.trim() {
            "Managed" => EcosystemState::Managed,
            "Unmanaged" => EcosystemState::Unmanaged,
            _ => EcosystemState::Natural,
        }
    }
}

/// Broad ecosystem classification used for flammability scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EcosystemType {
    Desert,
    Savanna,
    Grassland,
    Shrubland,
    Forest,
    Agriculture,
    Unknown,
}

impl EcosystemType {
    pub fn parse(label: &str) -> Self {
        match label.trim() {
            "Desert" => EcosystemType::Desert,
            "Savanna" => EcosystemType::Savanna,
            "Grassland" => EcosystemType::Grassland,
            "Shrubland" => EcosystemType::Shrubland,
            "Forest" => EcosystemType::Forest,
            "Agriculture" => EcosystemType::Agriculture,
            _ => EcosystemType::Unknown,
        }
    }
}

/// Dominant leaf habit at a site. Anything that is not deciduous is scored
/// as evergreen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeafHabit {
    Deciduous,
    Evergreen,
}

impl LeafHabit {
    pub fn parse(label: &str) -> Self {
        match label.trim() {
            "Deciduous" => LeafHabit::Deciduous,
            _ => LeafHabit::Evergreen,
        }
    }
}

/// One row of the ecosystem classification table, with categorical fields
/// tagged at ingestion time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EcosystemSite {
    pub coordinate: GeoPoint,
    pub state: EcosystemState,
    pub ecosystem_type: EcosystemType,
    pub leaf_habit: LeafHabit,
}
