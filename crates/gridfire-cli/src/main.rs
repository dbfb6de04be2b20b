use anyhow::{anyhow, Context, Result};
use clap::Parser;
use gridfire_algo::{
    assemble_feeder_records, extract_structural_risk, lightning_points, soil_moisture_points,
    vegetation_points,
};
use gridfire_batch::{discover_region_jobs, run_pipeline, PipelineConfig};
use gridfire_cli::cli::{Cli, Commands, TerrainKind};
use gridfire_core::RiskConfig;
use gridfire_io::{config::load_risk_config, exporters, importers};
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

fn risk_config(path: Option<&Path>) -> Result<RiskConfig> {
    match path {
        Some(p) => load_risk_config(p),
        None => Ok(RiskConfig::default()),
    }
}

fn run_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Run {
            data_root,
            region_prefix,
            soil,
            ecosystem,
            ecosystem_region,
            lightning,
            output,
            config,
            threads,
        } => {
            let jobs = discover_region_jobs(data_root, region_prefix)?;
            if jobs.is_empty() {
                return Err(anyhow!(
                    "no region directories matching prefix '{}' under '{}'",
                    region_prefix,
                    data_root.display()
                ));
            }
            info!(regions = jobs.len(), "discovered region jobs");
            let summary = run_pipeline(&PipelineConfig {
                jobs,
                soil_table: soil.clone(),
                ecosystem_table: ecosystem.clone(),
                ecosystem_region: ecosystem_region.clone(),
                lightning_grid: lightning.clone(),
                output_root: output.clone(),
                risk: risk_config(config.as_deref())?,
                threads: *threads,
            })?;
            println!(
                "Scored {} feeders across {} regions ({} fused, {} skipped records, {} unresolved)",
                summary.num_feeders,
                summary.num_regions,
                summary.num_fused,
                summary.skipped_records,
                summary.unresolved_feeders
            );
            println!("Manifest: {}", summary.manifest_path.display());
            Ok(())
        }
        Commands::Structural {
            overloads,
            coords,
            output,
            config,
        } => {
            let risk = risk_config(config.as_deref())?;
            let import = importers::load_overload_table(overloads)?;
            let lookup = importers::load_coordinate_lookup(coords)?;
            let (records, assemble) =
                assemble_feeder_records(&import.rows, &lookup, &risk.classifier);
            let (risks, extract) = extract_structural_risk(&records, &risk.posture);
            exporters::write_structural_risk_csv(output, &risks)?;
            println!(
                "Extracted {} structural risk vectors ({} unresolved, {} skipped) -> {}",
                extract.num_feeders,
                assemble.num_unresolved,
                assemble.num_skipped + import.skipped,
                output.display()
            );
            Ok(())
        }
        Commands::Terrain {
            factor,
            input,
            ecosystem_region,
            output,
            config,
        } => {
            let risk = risk_config(config.as_deref())?;
            let (points, summary) = match factor {
                TerrainKind::Soil => {
                    let import = importers::load_soil_table(input)?;
                    soil_moisture_points(&import.observations, &risk.region)
                }
                TerrainKind::Lightning => {
                    let grid = importers::load_lightning_grid(input)?;
                    lightning_points(&grid, &risk.region)
                }
                TerrainKind::Vegetation => {
                    let import = importers::load_ecosystem_table(input, ecosystem_region)?;
                    vegetation_points(&import.sites, &risk.region)
                }
            };
            exporters::write_feature_collection(output, &points)
                .with_context(|| format!("writing terrain index '{}'", output.display()))?;
            println!(
                "Indexed {} points ({} dropped) -> {}",
                summary.kept,
                summary.dropped,
                output.display()
            );
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    if let Err(err) = run_command(&cli) {
        error!("{err:#}");
        std::process::exit(1);
    }
}
