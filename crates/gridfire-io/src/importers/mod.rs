//! CSV/JSON importers for the pipeline's input tables.
//!
//! Each importer returns its parsed records plus a count of skipped rows so
//! callers can report the skip rate at the end of the run. A row is skipped
//! (with a `warn!`) when it fails to deserialize; range/NaN filtering of
//! parsed values is the environmental index's job, not the importers'.

mod coords;
mod ecosystem;
mod lightning;
mod overloads;
mod soil;

pub use coords::load_coordinate_lookup;
pub use ecosystem::{load_ecosystem_table, EcosystemImport};
pub use lightning::load_lightning_grid;
pub use overloads::{load_overload_table, OverloadImport};
pub use soil::{load_soil_table, SoilImport};
