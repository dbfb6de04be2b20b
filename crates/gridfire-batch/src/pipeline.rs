use crate::job::RegionJob;
use crate::manifest::{write_run_manifest, RunManifest};
use crate::runner::ingest_regions;
use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use gridfire_algo::{
    extract_structural_risk, fuse_all, lightning_points, match_environment,
    soil_moisture_points, vegetation_points,
};
use gridfire_core::RiskConfig;
use gridfire_io::{exporters, importers};
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Everything one full run needs: region jobs, environmental sources,
/// output location, and the risk configuration.
pub struct PipelineConfig {
    pub jobs: Vec<RegionJob>,
    pub soil_table: PathBuf,
    pub ecosystem_table: PathBuf,
    /// Region label the ecosystem table is filtered to.
    pub ecosystem_region: String,
    pub lightning_grid: PathBuf,
    pub output_root: PathBuf,
    pub risk: RiskConfig,
    /// Rayon worker count; 0 auto-detects.
    pub threads: usize,
}

/// Counts returned to the caller so the CLI can log the shape of the run.
#[derive(Debug)]
pub struct PipelineSummary {
    pub num_regions: usize,
    pub num_feeders: usize,
    pub num_soil_points: usize,
    pub num_lightning_points: usize,
    pub num_vegetation_points: usize,
    pub num_fused: usize,
    pub skipped_records: usize,
    pub unresolved_feeders: usize,
    pub manifest_path: PathBuf,
}

/// Run the whole pipeline: parallel region ingestion, structural
/// extraction, the three environmental indexes, batched spatial matching,
/// fusion, and every export.
///
/// **Stages:**
/// 1. Fan regions out over the rayon pool; join at the barrier.
/// 2. Extract one risk vector per feeder.
/// 3. Build the soil/lightning/vegetation point-sets (NaN-filtered).
/// 4. Build one spatial index per factor kind, query the feeder batch.
/// 5. Fuse through the correlation matrix.
/// 6. Write deliverables and the run manifest.
///
/// Per-record problems are skipped and counted; an empty combined feeder
/// set or an empty environmental point-set aborts the run.
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineSummary> {
    fs::create_dir_all(&config.output_root).with_context(|| {
        format!(
            "creating pipeline output root '{}'",
            config.output_root.display()
        )
    })?;

    // stage 1: structural side, fanned out per region
    let ingest = ingest_regions(&config.jobs, &config.risk.classifier, config.threads)?;
    if ingest.feeders.is_empty() {
        return Err(anyhow!(
            "no feeder records survived ingestion across {} region(s)",
            config.jobs.len()
        ));
    }
    info!(
        feeders = ingest.feeders.len(),
        regions = config.jobs.len(),
        unresolved = ingest.unresolved,
        "region ingestion complete"
    );

    // stage 2: structural extraction
    let (structural, extract) = extract_structural_risk(&ingest.feeders, &config.risk.posture);
    let structural_path = config.output_root.join("dist_risk_scores.csv");
    exporters::write_structural_risk_csv(&structural_path, &structural)?;

    // stage 3: environmental indexes, independently NaN-filtered
    let soil_import = importers::load_soil_table(&config.soil_table)?;
    let (soil_pts, soil_summary) =
        soil_moisture_points(&soil_import.observations, &config.risk.region);

    let grid = importers::load_lightning_grid(&config.lightning_grid)?;
    let (light_pts, light_summary) = lightning_points(&grid, &config.risk.region);

    let eco_import =
        importers::load_ecosystem_table(&config.ecosystem_table, &config.ecosystem_region)?;
    let (veg_pts, veg_summary) = vegetation_points(&eco_import.sites, &config.risk.region);

    info!(
        soil = soil_summary.kept,
        lightning = light_summary.kept,
        vegetation = veg_summary.kept,
        "environmental indexes built"
    );

    let soil_path = config.output_root.join("soil_risk.geojson");
    exporters::write_feature_collection(&soil_path, &soil_pts)?;
    let lightning_path = config.output_root.join("lightning_risk.geojson");
    exporters::write_feature_collection(&lightning_path, &light_pts)?;
    let vegetation_path = config.output_root.join("vegetation_risk.geojson");
    exporters::write_feature_collection(&vegetation_path, &veg_pts)?;

    // stages 4-5: one index per factor kind, one batched query, then fusion
    let coords: Vec<_> = structural.iter().map(|r| r.coordinate).collect();
    let triplets = match_environment(&coords, &soil_pts, &light_pts, &veg_pts)?;
    let (fused, fusion) = fuse_all(
        &structural,
        &triplets,
        &soil_pts,
        &light_pts,
        &veg_pts,
        &config.risk.matrix,
    );

    let fused_json_path = config.output_root.join("fused_risk.json");
    exporters::write_fused_risk_json(&fused_json_path, &fused)?;
    let fused_csv_path = config.output_root.join("fused_risk.csv");
    exporters::write_fused_risk_csv(&fused_csv_path, &fused)?;

    // stage 6: manifest
    let skipped_records = ingest.skipped + soil_import.skipped + eco_import.skipped;
    let outputs = vec![
        structural_path,
        soil_path,
        lightning_path,
        vegetation_path,
        fused_json_path,
        fused_csv_path,
    ];
    let manifest = RunManifest {
        created_at: Utc::now(),
        num_regions: config.jobs.len(),
        num_feeders: extract.num_feeders,
        num_fused: fusion.num_feeders,
        skipped_records,
        unresolved_feeders: ingest.unresolved,
        regions: ingest.records,
        outputs: outputs.iter().map(|p| p.display().to_string()).collect(),
    };
    let manifest_path = config.output_root.join("run_manifest.json");
    write_run_manifest(&manifest_path, &manifest)?;

    info!(
        fused = fusion.num_feeders,
        max_score = fusion.max_score,
        skipped = skipped_records,
        "pipeline complete"
    );

    Ok(PipelineSummary {
        num_regions: config.jobs.len(),
        num_feeders: extract.num_feeders,
        num_soil_points: soil_summary.kept,
        num_lightning_points: light_summary.kept,
        num_vegetation_points: veg_summary.kept,
        num_fused: fusion.num_feeders,
        skipped_records,
        unresolved_feeders: ingest.unresolved,
        manifest_path,
    })
}
