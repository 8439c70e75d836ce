//! Geo range containment.
//!
//! Reads IP ranges tagged with geolocation metadata, removes duplicate
//! ranges and reports which ranges contain other ranges.
//!
//! # Modules
//!
//! - [`models`] - Domain data structures (IpRange, GeoRecord, findings)
//! - [`processing`] - De-duplication, prefix trie and containment engine
//! - [`input`] - JSON record file loading
//! - [`output`] - Terminal, CSV and JSON output
//! - [`config`] - Engine configuration
//! - [`error`] - Error types

pub mod config;
pub mod error;
pub mod input;
pub mod models;
pub mod output;
pub mod processing;

use config::EngineConfig;
use models::GeoRecord;
use processing::{de_duplicate_records, find_containments, ReportCollector, RunReport};

/// Run de-duplication and containment detection over `records`.
///
/// Always produces a report, even when no record holds a valid range.
pub fn run_pipeline(records: Vec<GeoRecord>, config: &EngineConfig) -> RunReport {
    run_pipeline_with(ReportCollector::start(), records, config)
}

/// Same as [`run_pipeline`], timed by a collector started by the caller.
pub fn run_pipeline_with(
    mut collector: ReportCollector,
    records: Vec<GeoRecord>,
    config: &EngineConfig,
) -> RunReport {
    log::info!("#Start run_pipeline() records={}", records.len());

    let total_records = records.len();
    let mut dedup = de_duplicate_records(records);
    collector.record_dedup(total_records, &mut dedup);

    collector.record_engine(find_containments(&dedup.records, config));
    collector.finish()
}

/// Read `path` and run the pipeline on its records.
///
/// The clock starts before the file is read, so the elapsed time covers
/// loading as well as detection.
pub async fn run_file(
    path: &str,
    config: &EngineConfig,
) -> Result<RunReport, Box<dyn std::error::Error>> {
    let collector = ReportCollector::start();
    let records = input::read_records(path).await?;
    Ok(run_pipeline_with(collector, records, config))
}
