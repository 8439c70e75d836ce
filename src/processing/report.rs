//! End-of-run statistics.
//!
//! [`ReportCollector`] is fed by each pipeline phase and turned into an
//! immutable [`RunReport`] by [`ReportCollector::finish`].

use super::containment::EngineOutcome;
use super::dedup::{DedupOutcome, DuplicateConflict};
use crate::models::{ContainmentFinding, ParseFailure};
use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};

/// Counts and timing for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunStats {
    pub started_at: DateTime<Utc>,
    /// From [`ReportCollector::start`] to [`ReportCollector::finish`]. When the
    /// run starts from a file this includes reading and decoding it.
    pub elapsed: Duration,
    /// Records handed to the pipeline, duplicates included.
    pub total_records: usize,
    pub duplicates_removed: usize,
    /// Unique records whose range parsed.
    pub unique_range_count: usize,
    pub finding_count: usize,
    pub parse_failure_count: usize,
    /// Trie nodes walked or, for the naive strategy, range pairs compared.
    pub detection_steps: usize,
}

/// Immutable snapshot of a finished run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub stats: RunStats,
    pub findings: Vec<ContainmentFinding>,
    pub parse_failures: Vec<ParseFailure>,
    pub duplicate_conflicts: Vec<DuplicateConflict>,
}

#[derive(Debug)]
pub struct ReportCollector {
    started: Instant,
    started_at: DateTime<Utc>,
    total_records: usize,
    duplicates_removed: usize,
    duplicate_conflicts: Vec<DuplicateConflict>,
    engine: EngineOutcome,
}

impl ReportCollector {
    /// Start the clock.
    pub fn start() -> ReportCollector {
        ReportCollector {
            started: Instant::now(),
            started_at: Utc::now(),
            total_records: 0,
            duplicates_removed: 0,
            duplicate_conflicts: Vec::new(),
            engine: EngineOutcome::default(),
        }
    }

    /// Take the dedup counts. `outcome.records` is left in place for the engine.
    pub fn record_dedup(&mut self, total_records: usize, outcome: &mut DedupOutcome) {
        self.total_records = total_records;
        self.duplicates_removed = outcome.duplicates_removed;
        self.duplicate_conflicts = std::mem::take(&mut outcome.conflicts);
    }

    pub fn record_engine(&mut self, outcome: EngineOutcome) {
        self.engine = outcome;
    }

    /// Stop the clock and produce the report.
    pub fn finish(self) -> RunReport {
        let stats = RunStats {
            started_at: self.started_at,
            elapsed: self.started.elapsed(),
            total_records: self.total_records,
            duplicates_removed: self.duplicates_removed,
            unique_range_count: self.engine.unique_range_count,
            finding_count: self.engine.finding_count,
            parse_failure_count: self.engine.parse_failures.len(),
            detection_steps: self.engine.steps,
        };
        log::info!(
            "Run finished in {:?}: {} unique ranges, {} findings, {} parse failures",
            stats.elapsed,
            stats.unique_range_count,
            stats.finding_count,
            stats.parse_failure_count
        );
        RunReport {
            stats,
            findings: self.engine.findings,
            parse_failures: self.engine.parse_failures,
            duplicate_conflicts: self.duplicate_conflicts,
        }
    }
}
