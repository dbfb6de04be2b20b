//! Risk traits, trait vectors, terrain factors, and the trait-to-factor
//! correlation matrix.
//!
//! The 15 structural traits and the 6 terrain factors are domain policy
//! with a fixed order; everything downstream (CSV headers, the fusion
//! accumulation, config overrides) indexes by this order.

use crate::error::{RiskError, RiskResult};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Number of structural risk traits per feeder. [`RiskVector`] always has
/// exactly this many entries.
pub const NUM_TRAITS: usize = 15;

/// One named structural/operational characteristic contributing to ignition
/// risk. Variant order is the canonical trait order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTrait {
    LineToVegDist,
    LineToLineDist,
    LineToGndDist,
    LineAge,
    TransformerAge,
    OilTypeTransformer,
    Overhead,
    Uninsulated,
    LinePeakLoad,
    TransformerPeakLoad,
    HifDetection,
    PowersafetyShutoff,
    MistingFireSuppression,
    ResponseTeamCoordination,
    HighFidelityTracking,
}

impl RiskTrait {
    /// All traits, in canonical order.
    pub const ALL: [RiskTrait; NUM_TRAITS] = [
        RiskTrait::LineToVegDist,
        RiskTrait::LineToLineDist,
        RiskTrait::LineToGndDist,
        RiskTrait::LineAge,
        RiskTrait::TransformerAge,
        RiskTrait::OilTypeTransformer,
        RiskTrait::Overhead,
        RiskTrait::Uninsulated,
        RiskTrait::LinePeakLoad,
        RiskTrait::TransformerPeakLoad,
        RiskTrait::HifDetection,
        RiskTrait::PowersafetyShutoff,
        RiskTrait::MistingFireSuppression,
        RiskTrait::ResponseTeamCoordination,
        RiskTrait::HighFidelityTracking,
    ];

    /// Position of this trait in the canonical order.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Stable snake_case name, used for CSV headers and config files.
    pub fn name(self) -> &'static str {
        match self {
            RiskTrait::LineToVegDist => "line_to_veg_dist",
            RiskTrait::LineToLineDist => "line_to_line_dist",
            RiskTrait::LineToGndDist => "line_to_gnd_dist",
            RiskTrait::LineAge => "line_age",
            RiskTrait::TransformerAge => "transformer_age",
            RiskTrait::OilTypeTransformer => "oil_type_transformer",
            RiskTrait::Overhead => "overhead",
            RiskTrait::Uninsulated => "uninsulated",
            RiskTrait::LinePeakLoad => "line_peak_load",
            RiskTrait::TransformerPeakLoad => "transformer_peak_load",
            RiskTrait::HifDetection => "hif_detection",
            RiskTrait::PowersafetyShutoff => "powersafety_shutoff",
            RiskTrait::MistingFireSuppression => "misting_fire_suppression",
            RiskTrait::ResponseTeamCoordination => "response_team_coordination",
            RiskTrait::HighFidelityTracking => "high_fidelity_tracking",
        }
    }
}

/// Fixed-length ordered vector of per-trait risk scores for one feeder.
///
/// Unset traits stay at 0, so a vector built from partial inputs is still
/// complete and fusable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskVector([f64; NUM_TRAITS]);

impl RiskVector {
    pub fn new() -> Self {
        RiskVector([0.0; NUM_TRAITS])
    }

    #[inline]
    pub fn get(&self, trait_: RiskTrait) -> f64 {
        self.0[trait_.index()]
    }

    #[inline]
    pub fn set(&mut self, trait_: RiskTrait, score: f64) {
        self.0[trait_.index()] = score;
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Iterate `(trait, score)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (RiskTrait, f64)> + '_ {
        RiskTrait::ALL.iter().map(move |t| (*t, self.0[t.index()]))
    }
}

impl Default for RiskVector {
    fn default() -> Self {
        RiskVector::new()
    }
}

/// One externally observed terrain condition that can interrelate with a
/// structural trait. `WindSpeed` and `AmbientTemp` are declared in the
/// correlation table but have no wired data source; they are reserved, not
/// silently dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainFactor {
    GroundVeg,
    SoilSaturation,
    VegMoisture,
    Lightning,
    WindSpeed,
    AmbientTemp,
}

/// Fixed mapping from each risk trait to the set of terrain factors that
/// interrelate with it.
///
/// This is static domain policy, loaded once and passed explicitly into the
/// fusion engine. The row order matches [`RiskTrait::ALL`]; serde input is
/// validated to exactly [`NUM_TRAITS`] rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<TerrainFactor>>", into = "Vec<Vec<TerrainFactor>>")]
pub struct CorrelationMatrix {
    rows: Vec<Vec<TerrainFactor>>,
}

impl CorrelationMatrix {
    /// Build from explicit rows; fails unless there is exactly one row per
    /// trait.
    pub fn from_rows(rows: Vec<Vec<TerrainFactor>>) -> RiskResult<Self> {
        if rows.len() != NUM_TRAITS {
            return Err(RiskError::Config(format!(
                "correlation matrix must have {} rows, got {}",
                NUM_TRAITS,
                rows.len()
            )));
        }
        Ok(CorrelationMatrix { rows })
    }

    /// Factors interrelating with the given trait.
    pub fn row(&self, trait_: RiskTrait) -> &[TerrainFactor] {
        &self.rows[trait_.index()]
    }

    /// Whether `factor` interrelates with `trait_`.
    pub fn interrelates(&self, trait_: RiskTrait, factor: TerrainFactor) -> bool {
        self.rows[trait_.index()].contains(&factor)
    }
}

impl TryFrom<Vec<Vec<TerrainFactor>>> for CorrelationMatrix {
    type Error = RiskError;

    fn try_from(rows: Vec<Vec<TerrainFactor>>) -> RiskResult<Self> {
        CorrelationMatrix::from_rows(rows)
    }
}

impl From<CorrelationMatrix> for Vec<Vec<TerrainFactor>> {
    fn from(matrix: CorrelationMatrix) -> Self {
        matrix.rows
    }
}

impl Default for CorrelationMatrix {
    fn default() -> Self {
        DEFAULT_CORRELATION_MATRIX.clone()
    }
}

/// The domain-defined distribution/terrain correlation table.
///
/// Mitigation-posture traits (HIF detection through high-fidelity tracking)
/// interrelate with every factor; physical clearance and loading traits
/// carry the narrower sets below.
pub static DEFAULT_CORRELATION_MATRIX: Lazy<CorrelationMatrix> = Lazy::new(|| {
    use TerrainFactor::*;
    let all_six = vec![
        GroundVeg,
        SoilSaturation,
        VegMoisture,
        Lightning,
        WindSpeed,
        AmbientTemp,
    ];
    let aging = vec![GroundVeg, SoilSaturation, VegMoisture, Lightning, AmbientTemp];
    let loading = vec![GroundVeg, SoilSaturation, VegMoisture, WindSpeed, AmbientTemp];
    let rows = vec![
        // line_to_veg_dist
        vec![GroundVeg, VegMoisture, WindSpeed, AmbientTemp],
        // line_to_line_dist
        vec![GroundVeg, WindSpeed, AmbientTemp],
        // line_to_gnd_dist
        vec![GroundVeg, SoilSaturation, WindSpeed, AmbientTemp],
        // line_age
        aging.clone(),
        // transformer_age
        aging.clone(),
        // oil_type_transformer
        aging,
        // overhead
        vec![GroundVeg, SoilSaturation, VegMoisture, Lightning, WindSpeed],
        // uninsulated
        vec![GroundVeg, SoilSaturation, VegMoisture, WindSpeed],
        // line_peak_load
        loading.clone(),
        // transformer_peak_load
        loading,
        // mitigation posture traits
        all_six.clone(),
        all_six.clone(),
        all_six.clone(),
        all_six.clone(),
        all_six,
    ];
    CorrelationMatrix::from_rows(rows).expect("default correlation matrix has 15 rows")
});
