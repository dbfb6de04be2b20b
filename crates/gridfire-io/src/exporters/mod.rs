//! Exporters for the pipeline's deliverables: GeoJSON factor collections,
//! the structural risk table, and the fused risk table.

pub mod geojson;
pub mod tables;

pub use geojson::{feature_collection, write_feature_collection};
pub use tables::{write_fused_risk_csv, write_fused_risk_json, write_structural_risk_csv};
