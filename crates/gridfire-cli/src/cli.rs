use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full ignition-risk pipeline over every region under a data root
    Run {
        /// Root directory containing one subdirectory per region
        #[arg(long)]
        data_root: PathBuf,
        /// Region directories must start with this prefix
        #[arg(long, default_value = "P")]
        region_prefix: String,
        /// Soil-moisture observation CSV
        #[arg(long)]
        soil: PathBuf,
        /// Ecosystem classification CSV
        #[arg(long)]
        ecosystem: PathBuf,
        /// Region label to keep from the ecosystem table
        #[arg(long, default_value = "California")]
        ecosystem_region: String,
        /// Gridded lightning flash-density JSON
        #[arg(long)]
        lightning: PathBuf,
        /// Directory the deliverables are written to
        #[arg(short, long)]
        output: PathBuf,
        /// Optional JSON risk configuration (partial overrides)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Worker threads for region ingestion (0 = auto-detect)
        #[arg(long, default_value_t = 0)]
        threads: usize,
    },
    /// Extract structural risk vectors for a single region pair of tables
    Structural {
        /// Overload summary CSV for the region
        #[arg(long)]
        overloads: PathBuf,
        /// Feeder coordinate lookup CSV
        #[arg(long)]
        coords: PathBuf,
        /// Output CSV of per-feeder risk vectors
        #[arg(short, long)]
        output: PathBuf,
        /// Optional JSON risk configuration (partial overrides)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Build one environmental index and export it as GeoJSON
    Terrain {
        /// Which factor to index
        #[arg(long, value_enum)]
        factor: TerrainKind,
        /// Source table: soil CSV, ecosystem CSV, or lightning grid JSON
        #[arg(long)]
        input: PathBuf,
        /// Region label for the ecosystem table (vegetation only)
        #[arg(long, default_value = "California")]
        ecosystem_region: String,
        /// Output GeoJSON feature collection
        #[arg(short, long)]
        output: PathBuf,
        /// Optional JSON risk configuration (partial overrides)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerrainKind {
    Soil,
    Lightning,
    Vegetation,
}
