//! # gridfire-algo: The Risk-Fusion Core
//!
//! The four components of the feeder ignition-risk computation, in
//! dependency order:
//!
//! | Component | Module | Share of the job |
//! |-----------|--------|------------------|
//! | Structural Risk Extractor | [`structural`] | feeder measurements → [`gridfire_core::RiskVector`] |
//! | Environmental Observation Index | [`environment`] | raw datasets → three NaN-free point-sets |
//! | Spatial Matcher | [`spatial`] | batched nearest-neighbour per factor kind |
//! | Risk Fusion Engine | [`fusion`] | correlation-weighted aggregate per feeder |
//!
//! The crate is pure computation over `gridfire-core` types: no file IO
//! (that lives in gridfire-io) and no parallelism (the batch runner fans
//! out per region around these functions).

pub mod environment;
pub mod fusion;
pub mod spatial;
pub mod structural;

pub use environment::{
    lightning_points, soil_moisture_points, vegetation_points, IndexSummary,
};
pub use fusion::{fuse_all, fuse_feeder, FactorScores, FusionSummary};
pub use spatial::{match_environment, MatchedTriplet, NearestMatch, SpatialMatcher};
pub use structural::{
    assemble_feeder_records, extract_structural_risk, line_overload_ratio,
    transformer_overload_ratio, AssembleSummary, ExtractSummary,
};
