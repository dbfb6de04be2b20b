//! # gridfire-batch: Region Fan-Out and Pipeline Orchestration
//!
//! The risk computation is embarrassingly parallel on the structural side:
//! each geographic region's overload and coordinate tables can be ingested
//! independently. This crate fans regions out over a rayon pool, joins them
//! at an all-or-nothing barrier (the spatial matcher needs the complete
//! coordinate set before it builds its indexes), then runs the shared
//! environmental/match/fusion stages once and writes every deliverable
//! plus a run manifest.

pub mod job;
pub mod manifest;
pub mod pipeline;
pub mod runner;

pub use job::{discover_region_jobs, RegionJob, RegionRecord};
pub use manifest::{load_run_manifest, write_run_manifest, RunManifest};
pub use pipeline::{run_pipeline, PipelineConfig, PipelineSummary};
pub use runner::{ingest_regions, RegionIngest};
