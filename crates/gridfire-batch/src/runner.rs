use crate::job::{RegionJob, RegionRecord};
use anyhow::{Context, Result};
use gridfire_algo::assemble_feeder_records;
use gridfire_core::{FeederRecord, VoltageClassifier};
use gridfire_io::importers;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use tracing::warn;

/// Combined result of the parallel region fan-out, after the join barrier.
pub struct RegionIngest {
    /// All regions' feeder records, concatenated in region order.
    pub feeders: Vec<FeederRecord>,
    pub records: Vec<RegionRecord>,
    /// Total rows skipped across importers and assembly.
    pub skipped: usize,
    pub unresolved: usize,
}

/// Ingest every region in parallel and join before the matcher stage.
///
/// One rayon task per region, no shared mutable state; `collect` is the
/// all-or-nothing barrier — the spatial matcher needs the complete
/// coordinate set, so there is no streaming merge. A region whose tables
/// fail to load is recorded as failed without aborting its siblings; a run
/// in which *no* region yields feeders is an error for the caller to raise.
pub fn ingest_regions(
    jobs: &[RegionJob],
    classifier: &VoltageClassifier,
    threads: usize,
) -> Result<RegionIngest> {
    // auto-detect CPU count if threads=0, otherwise use the requested count
    let thread_count = if threads == 0 {
        num_cpus::get()
    } else {
        threads
    };
    let pool = ThreadPoolBuilder::new()
        .num_threads(thread_count)
        .build()
        .context("building rayon thread pool for region ingestion")?;

    let results: Vec<(Vec<FeederRecord>, RegionRecord, usize)> = pool.install(|| {
        jobs.par_iter()
            .map(|job| ingest_region(job, classifier))
            .collect()
    });

    let mut feeders = Vec::new();
    let mut records = Vec::new();
    let mut skipped = 0usize;
    let mut unresolved = 0usize;
    for (region_feeders, record, region_skipped) in results {
        skipped += region_skipped;
        unresolved += record.num_unresolved;
        feeders.extend(region_feeders);
        records.push(record);
    }

    Ok(RegionIngest {
        feeders,
        records,
        skipped,
        unresolved,
    })
}

/// Load and assemble one region's feeder records.
fn ingest_region(
    job: &RegionJob,
    classifier: &VoltageClassifier,
) -> (Vec<FeederRecord>, RegionRecord, usize) {
    let loaded = (|| -> Result<(Vec<FeederRecord>, usize, usize, usize)> {
        let overloads = importers::load_overload_table(&job.overload_table)?;
        let coords = importers::load_coordinate_lookup(&job.coordinate_table)?;
        let (records, summary) = assemble_feeder_records(&overloads.rows, &coords, classifier);
        Ok((
            records,
            summary.num_unresolved,
            summary.num_skipped + overloads.skipped,
            summary.num_feeders,
        ))
    })();

    match loaded {
        Ok((records, num_unresolved, num_skipped, num_feeders)) => (
            records,
            RegionRecord {
                region: job.region.clone(),
                status: "ok".to_string(),
                error: None,
                num_feeders,
                num_unresolved,
                num_skipped,
            },
            num_skipped,
        ),
        Err(err) => {
            warn!(region = %job.region, error = %err, "region ingestion failed");
            (
                Vec::new(),
                RegionRecord {
                    region: job.region.clone(),
                    status: "error".to_string(),
                    error: Some(err.to_string()),
                    num_feeders: 0,
                    num_unresolved: 0,
                    num_skipped: 0,
                },
                0,
            )
        }
    }
}
