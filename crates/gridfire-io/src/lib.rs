//! # gridfire-io: File formats for the ignition-risk pipeline
//!
//! Importers for the collaborator-produced tables the core consumes, and
//! exporters for the pipeline's deliverables.
//!
//! ## Importers
//!
//! | Source | Format | Produces |
//! |--------|--------|----------|
//! | Feeder overload summary | CSV | [`gridfire_core::OverloadRow`] |
//! | Circuit-model coordinate lookup | CSV | feeder → [`gridfire_core::GeoPoint`] |
//! | Soil moisture table | CSV | [`gridfire_core::SoilObservation`] |
//! | Ecosystem classification table | CSV | [`gridfire_core::EcosystemSite`] |
//! | Lightning flash-density grid | JSON | [`gridfire_core::LightningGrid`] |
//! | Risk configuration override | JSON | [`gridfire_core::RiskConfig`] |
//!
//! All CSV importers follow skip-and-continue: malformed rows are logged
//! via `tracing::warn!` and counted, missing or unreadable files abort.
//!
//! ## Exporters
//!
//! - GeoJSON FeatureCollections, one per environmental factor kind
//! - Per-feeder structural risk table (CSV, for inspection/debugging)
//! - Fused risk table (JSON and CSV) — the primary deliverable

pub mod config;
pub mod exporters;
pub mod importers;
