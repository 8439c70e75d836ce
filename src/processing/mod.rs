//! Range processing logic.
//!
//! - [`dedup`] - De-duplication of input records
//! - [`trie`] - Binary prefix trie per address family
//! - [`containment`] - Containment detection (trie and naive)
//! - [`report`] - End-of-run statistics

mod containment;
mod dedup;
mod report;
mod trie;

// Re-export public functions
pub use containment::{
    detect_naive, detect_with_trie, find_containments, parse_records, EngineOutcome,
    FindingSink, ParsedRange,
};
pub use dedup::{de_duplicate_records, DedupOutcome, DuplicateConflict};
pub use report::{ReportCollector, RunReport, RunStats};
pub use trie::PrefixTrie;
