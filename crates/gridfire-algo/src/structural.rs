//! Structural Risk Extractor: per-feeder electrical/structural measurements
//! into fixed-length risk-trait vectors.

use gridfire_core::{
    FeederRecord, GeoPoint, MitigationPosture, OverloadRow, RiskTrait, RiskVector,
    StructuralRisk, VoltageClass, VoltageClassifier,
};
use std::collections::HashMap;
use tracing::warn;

/// All modeled distribution transformers are oil-filled; the trait is a
/// fleet-wide constant rather than a per-unit lookup.
const OIL_TRANSFORMER_SCORE: f64 = 10.0;

/// Overload ratio of a transformer population. Zero transformers means
/// nothing can be overloaded: the ratio is 0, not a division error.
///
/// The overload summary table arrives with these ratios already computed
/// by the upstream load-flow export; this helper pins the zero-denominator
/// convention that export follows, for callers deriving ratios from raw
/// counts themselves.
pub fn transformer_overload_ratio(overloaded: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        overloaded as f64 / total as f64
    }
}

/// Overloaded fraction of a feeder's line mileage. A feeder with no
/// measured line length gets ratio 0, mirroring the transformer guard.
/// Like [`transformer_overload_ratio`], this documents the upstream
/// export's convention rather than sitting on the pipeline path.
pub fn line_overload_ratio(overloaded_miles: f64, total_miles: f64) -> f64 {
    if total_miles <= 0.0 {
        0.0
    } else {
        overloaded_miles / total_miles
    }
}

/// Counts from assembling feeder records out of overload rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembleSummary {
    pub num_feeders: usize,
    /// Feeders absent from the coordinate lookup (given the sentinel).
    pub num_unresolved: usize,
    /// Rows dropped for non-finite or negative measurements.
    pub num_skipped: usize,
}

/// Join overload rows with the coordinate lookup into [`FeederRecord`]s.
///
/// A feeder missing from the lookup gets [`GeoPoint::UNRESOLVED`] and a
/// warning, never a hard failure, so the pipeline still produces partial
/// output. Rows with non-finite or negative measurements are skipped and
/// counted.
pub fn assemble_feeder_records(
    rows: &[OverloadRow],
    coords: &HashMap<String, GeoPoint>,
    classifier: &VoltageClassifier,
) -> (Vec<FeederRecord>, AssembleSummary) {
    let mut records = Vec::with_capacity(rows.len());
    let mut num_unresolved = 0usize;
    let mut num_skipped = 0usize;

    for row in rows {
        let coordinate = match coords.get(&row.feeder_id) {
            Some(point) => *point,
            None => {
                warn!(feeder = %row.feeder_id, "no coordinate for feeder, using sentinel");
                num_unresolved += 1;
                GeoPoint::UNRESOLVED
            }
        };
        let record = FeederRecord {
            feeder_id: row.feeder_id.clone(),
            voltage_class: classifier.classify(&row.feeder_id),
            coordinate,
            percent_overhead: row.percent_overhead,
            percent_line_overloaded: row.percent_line_overloaded,
            percent_transformers_overloaded: row.percent_transformers_overloaded,
        };
        if let Err(err) = record.validate() {
            warn!(feeder = %row.feeder_id, error = %err, "skipping feeder with invalid measurements");
            num_skipped += 1;
            continue;
        }
        records.push(record);
    }

    let summary = AssembleSummary {
        num_feeders: records.len(),
        num_unresolved,
        num_skipped,
    };
    (records, summary)
}

/// Summary statistics from structural extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractSummary {
    pub num_feeders: usize,
}

/// Produce one [`StructuralRisk`] per feeder record.
///
/// Trait assignments:
/// - `overhead` = percent_overhead / 10
/// - `uninsulated` = percent_overhead / 10, medium-voltage feeders only
///   (low-voltage inner-city and underground segments are insulated)
/// - `line_peak_load` = percent_line_overloaded
/// - `transformer_peak_load` = percent_transformers_overloaded
/// - `oil_type_transformer` = 10 (fleet assumption)
/// - traits 10-14 from the configured [`MitigationPosture`]
/// - everything else stays 0
pub fn extract_structural_risk(
    records: &[FeederRecord],
    posture: &MitigationPosture,
) -> (Vec<StructuralRisk>, ExtractSummary) {
    let mut risks = Vec::with_capacity(records.len());
    for record in records {
        let mut vector = RiskVector::new();
        vector.set(RiskTrait::Overhead, record.percent_overhead / 10.0);
        if record.voltage_class == VoltageClass::Medium {
            vector.set(RiskTrait::Uninsulated, record.percent_overhead / 10.0);
        }
        vector.set(RiskTrait::LinePeakLoad, record.percent_line_overloaded);
        vector.set(
            RiskTrait::TransformerPeakLoad,
            record.percent_transformers_overloaded,
        );
        vector.set(RiskTrait::OilTypeTransformer, OIL_TRANSFORMER_SCORE);
        posture.apply(&mut vector);

        risks.push(StructuralRisk {
            feeder_id: record.feeder_id.clone(),
            coordinate: record.coordinate,
            vector,
        });
    }
    let summary = ExtractSummary {
        num_feeders: risks.len(),
    };
    (risks, summary)
}
