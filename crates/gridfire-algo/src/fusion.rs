//! Risk Fusion Engine: combine each feeder's structural trait vector with
//! its nearest environmental observations through the correlation matrix.

use crate::spatial::MatchedTriplet;
use gridfire_core::{
    CorrelationMatrix, EnvironmentalPoint, FusedRisk, StructuralRisk, TerrainFactor,
};

/// The three matched environmental scores for one feeder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorScores {
    pub soil: f64,
    pub lightning: f64,
    pub vegetation: f64,
}

/// Summary statistics from a fusion pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FusionSummary {
    pub num_feeders: usize,
    pub max_score: f64,
}

/// Fuse one feeder: for each trait whose correlation row names a factor
/// with a wired data source, accumulate `trait_score × factor_score`.
///
/// `ground_veg` rows draw on the nearest vegetation observation,
/// `soil_saturation` on soil, `lightning` on lightning. The matrix also
/// declares `veg_moisture`, `wind_speed`, and `ambient_temp` terms; those
/// factors have no data source in this pipeline and contribute nothing —
/// a deliberate omission, kept visible in the matrix rather than deleted.
pub fn fuse_feeder(
    structural: &StructuralRisk,
    scores: &FactorScores,
    matrix: &CorrelationMatrix,
) -> FusedRisk {
    let mut aggregate = 0.0;
    for (trait_, trait_score) in structural.vector.iter() {
        if matrix.interrelates(trait_, TerrainFactor::GroundVeg) {
            aggregate += trait_score * scores.vegetation;
        }
        if matrix.interrelates(trait_, TerrainFactor::SoilSaturation) {
            aggregate += trait_score * scores.soil;
        }
        if matrix.interrelates(trait_, TerrainFactor::Lightning) {
            aggregate += trait_score * scores.lightning;
        }
    }
    FusedRisk {
        feeder_id: structural.feeder_id.clone(),
        coordinate: structural.coordinate,
        aggregate_score: aggregate,
    }
}

/// Fuse the whole feeder batch: resolve each matched triplet's indices back
/// to observation scores and produce one [`FusedRisk`] per feeder.
///
/// `triplets` must be parallel to `structural` (the matcher guarantees
/// this: one triplet per queried feeder coordinate, in order).
pub fn fuse_all(
    structural: &[StructuralRisk],
    triplets: &[MatchedTriplet],
    soil: &[EnvironmentalPoint],
    lightning: &[EnvironmentalPoint],
    vegetation: &[EnvironmentalPoint],
    matrix: &CorrelationMatrix,
) -> (Vec<FusedRisk>, FusionSummary) {
    let mut fused = Vec::with_capacity(structural.len());
    let mut max_score = f64::NEG_INFINITY;

    for (risk, triplet) in structural.iter().zip(triplets.iter()) {
        let scores = FactorScores {
            soil: soil[triplet.soil.index].risk_score,
            lightning: lightning[triplet.lightning.index].risk_score,
            vegetation: vegetation[triplet.vegetation.index].risk_score,
        };
        let record = fuse_feeder(risk, &scores, matrix);
        max_score = max_score.max(record.aggregate_score);
        fused.push(record);
    }

    let summary = FusionSummary {
        num_feeders: fused.len(),
        max_score: if fused.is_empty() { 0.0 } else { max_score },
    };
    (fused, summary)
}
