//! Containment detection between unique ranges.
//!
//! Runs in two phases. First every record is parsed and the malformed ones
//! are set aside as [`ParseFailure`]s. Then the valid ranges are visited once
//! in input order; each range is compared only with ranges visited before it
//! and is inserted afterwards, so a range is never matched against itself or
//! against a later one.

use crate::config::{EngineConfig, Strategy};
use crate::models::{AddressFamily, ContainmentFinding, GeoRecord, IpRange, ParseFailure, Relation};
use crate::processing::trie::PrefixTrie;

/// A record that parsed successfully.
#[derive(Debug, Clone, Copy)]
pub struct ParsedRange<'a> {
    pub text: &'a str,
    pub range: IpRange,
}

/// Everything the engine produced for one run.
#[derive(Debug, Default)]
pub struct EngineOutcome {
    /// Findings in discovery order; empty when findings are only counted.
    pub findings: Vec<ContainmentFinding>,
    pub finding_count: usize,
    pub parse_failures: Vec<ParseFailure>,
    /// Number of records that parsed into a range.
    pub unique_range_count: usize,
    /// Work done by detection: trie nodes walked, or range pairs compared
    /// by the naive strategy.
    pub steps: usize,
}

/// Parse every record, splitting valid ranges from failures.
pub fn parse_records(records: &[GeoRecord]) -> (Vec<ParsedRange<'_>>, Vec<ParseFailure>) {
    let mut parsed = Vec::with_capacity(records.len());
    let mut failures = Vec::new();

    for record in records {
        match IpRange::parse(&record.ip_range) {
            Ok(range) => parsed.push(ParsedRange {
                text: &record.ip_range,
                range,
            }),
            Err(error) => {
                log::warn!("Skipping record: {error}");
                failures.push(ParseFailure {
                    ip_range: record.ip_range.clone(),
                    error,
                });
            }
        }
    }
    (parsed, failures)
}

/// Find every pair of records where one range contains the other.
///
/// # Arguments
/// * `records` - De-duplicated records in input order
/// * `config` - Strategy and whether to keep the finding list
pub fn find_containments(records: &[GeoRecord], config: &EngineConfig) -> EngineOutcome {
    let (ranges, parse_failures) = parse_records(records);
    log::info!(
        "Parsed {} ranges, {} parse failures, strategy={}",
        ranges.len(),
        parse_failures.len(),
        config.strategy
    );

    let mut sink = FindingSink::new(config.collect_findings);
    let steps = match config.strategy {
        Strategy::Trie => detect_with_trie(&ranges, &mut sink),
        Strategy::Naive => detect_naive(&ranges, &mut sink),
    };
    log::info!(
        "Found {} containment relationships in {steps} steps",
        sink.count
    );

    EngineOutcome {
        findings: sink.findings,
        finding_count: sink.count,
        parse_failures,
        unique_range_count: ranges.len(),
        steps,
    }
}

/// Trie walk: cost per range follows its prefix length and the number of
/// related ranges, not the size of the working set.
///
/// Returns the number of trie nodes walked.
pub fn detect_with_trie(ranges: &[ParsedRange<'_>], sink: &mut FindingSink) -> usize {
    let mut v4 = PrefixTrie::new(AddressFamily::V4);
    let mut v6 = PrefixTrie::new(AddressFamily::V6);

    for (id, current) in ranges.iter().enumerate() {
        let trie = match current.range.family() {
            AddressFamily::V4 => &mut v4,
            AddressFamily::V6 => &mut v6,
        };
        for outer in trie.ancestors(&current.range) {
            sink.emit(&ranges[outer], current);
        }
        for inner in trie.descendants(&current.range) {
            sink.emit(current, &ranges[inner]);
        }
        trie.insert(&current.range, id);
    }
    log::debug!(
        "Trie nodes: v4={} v6={}",
        v4.node_count(),
        v6.node_count()
    );
    v4.visits() + v6.visits()
}

/// Quadratic baseline: compare each range with every earlier one.
///
/// Returns the number of pairs compared.
pub fn detect_naive(ranges: &[ParsedRange<'_>], sink: &mut FindingSink) -> usize {
    let mut compared = 0;
    for (i, current) in ranges.iter().enumerate() {
        for earlier in &ranges[..i] {
            compared += 1;
            if earlier.range.contains(&current.range) {
                sink.emit(earlier, current);
            } else if current.range.contains(&earlier.range) {
                sink.emit(current, earlier);
            }
        }
    }
    compared
}

/// Collects or counts findings as they are discovered.
#[derive(Debug, Default)]
pub struct FindingSink {
    collect: bool,
    count: usize,
    findings: Vec<ContainmentFinding>,
}

impl FindingSink {
    pub fn new(collect: bool) -> FindingSink {
        FindingSink {
            collect,
            ..Default::default()
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn findings(&self) -> &[ContainmentFinding] {
        &self.findings
    }

    fn emit(&mut self, outer: &ParsedRange<'_>, inner: &ParsedRange<'_>) {
        let relation = if outer.range == inner.range {
            Relation::Equivalent
        } else {
            Relation::Proper
        };
        log::debug!("Contained! {} -> {} ({:?})", outer.text, inner.text, relation);

        self.count += 1;
        if self.collect {
            self.findings.push(ContainmentFinding {
                outer: outer.text.to_string(),
                inner: inner.text.to_string(),
                outer_range: outer.range,
                inner_range: inner.range,
                relation,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    fn records(ranges: &[&str]) -> Vec<GeoRecord> {
        ranges.iter().map(|r| GeoRecord::new(r)).collect()
    }

    fn pairs(outcome: &EngineOutcome) -> Vec<(&str, &str)> {
        outcome
            .findings
            .iter()
            .map(|f| (f.outer.as_str(), f.inner.as_str()))
            .collect()
    }

    fn run(ranges: &[&str], strategy: Strategy) -> EngineOutcome {
        let config = EngineConfig {
            strategy,
            collect_findings: true,
        };
        find_containments(&records(ranges), &config)
    }

    #[test]
    fn test_single_finding() {
        for strategy in [Strategy::Trie, Strategy::Naive] {
            let outcome = run(&["10.0.0.0/8", "10.1.0.0/16", "192.168.0.0/24"], strategy);
            assert_eq!(outcome.unique_range_count, 3);
            assert_eq!(pairs(&outcome), vec![("10.0.0.0/8", "10.1.0.0/16")]);
            assert_eq!(outcome.finding_count, 1);
            assert_eq!(outcome.findings[0].relation, Relation::Proper);
        }
    }

    #[test]
    fn test_narrow_first() {
        for strategy in [Strategy::Trie, Strategy::Naive] {
            let outcome = run(&["10.0.0.0/16", "10.0.0.0/8"], strategy);
            assert_eq!(pairs(&outcome), vec![("10.0.0.0/8", "10.0.0.0/16")]);
        }
    }

    #[test]
    fn test_no_self_finding() {
        let outcome = run(&["10.0.0.0/8"], Strategy::Trie);
        assert_eq!(outcome.finding_count, 0);
    }

    #[test]
    fn test_transitive_pairs_all_reported() {
        let outcome = run(&["10.0.0.0/8", "10.1.0.0/16", "10.1.1.0/24"], Strategy::Trie);
        assert_eq!(
            pairs(&outcome),
            vec![
                ("10.0.0.0/8", "10.1.0.0/16"),
                ("10.0.0.0/8", "10.1.1.0/24"),
                ("10.1.0.0/16", "10.1.1.0/24"),
            ]
        );

        let reversed = run(&["10.1.1.0/24", "10.1.0.0/16", "10.0.0.0/8"], Strategy::Trie);
        assert_eq!(
            pairs(&reversed),
            vec![
                ("10.1.0.0/16", "10.1.1.0/24"),
                ("10.0.0.0/8", "10.1.0.0/16"),
                ("10.0.0.0/8", "10.1.1.0/24"),
            ]
        );
    }

    #[test]
    fn test_equivalent_text() {
        for strategy in [Strategy::Trie, Strategy::Naive] {
            let outcome = run(&["10.0.0.0/8", "10.0.0.1/8"], strategy);
            assert_eq!(pairs(&outcome), vec![("10.0.0.0/8", "10.0.0.1/8")]);
            assert_eq!(outcome.findings[0].relation, Relation::Equivalent);
        }
    }

    #[test]
    fn test_zero_prefix_contains_family_only() {
        let outcome = run(
            &["10.0.0.0/8", "2001:db8::/32", "0.0.0.0/0", "::/0"],
            Strategy::Trie,
        );
        assert_eq!(
            pairs(&outcome),
            vec![("0.0.0.0/0", "10.0.0.0/8"), ("::/0", "2001:db8::/32")]
        );
    }

    #[test]
    fn test_parse_failures_are_skipped() {
        let outcome = run(&["not-a-cidr", "10.0.0.0/8", "10.0.0.0/33"], Strategy::Trie);
        assert_eq!(outcome.unique_range_count, 1);
        assert_eq!(outcome.finding_count, 0);
        let failed: Vec<&str> = outcome
            .parse_failures
            .iter()
            .map(|f| f.ip_range.as_str())
            .collect();
        assert_eq!(failed, vec!["not-a-cidr", "10.0.0.0/33"]);
    }

    #[test]
    fn test_count_only() {
        let config = EngineConfig {
            strategy: Strategy::Trie,
            collect_findings: false,
        };
        let outcome = find_containments(&records(&["10.0.0.0/8", "10.1.0.0/16"]), &config);
        assert_eq!(outcome.finding_count, 1);
        assert!(outcome.findings.is_empty());
    }

    #[test]
    fn test_strategies_agree() {
        let input = [
            "10.0.0.0/8",
            "10.20.0.0/16",
            "172.16.0.0/12",
            "10.20.30.0/24",
            "0.0.0.0/0",
            "172.16.5.0/24",
            "10.0.0.0/9",
            "192.168.1.0/24",
            "10.20.30.40/32",
            "2001:db8::/32",
            "2001:db8:abcd::/48",
            "::/0",
            "10.20.0.1/16",
            "192.168.0.0/16",
        ];
        let trie = run(&input, Strategy::Trie);
        let naive = run(&input, Strategy::Naive);
        assert_eq!(trie.finding_count, naive.finding_count);
        let sorted = |o: &EngineOutcome| o.findings.iter().cloned().sorted().collect::<Vec<_>>();
        assert_eq!(sorted(&trie), sorted(&naive));
    }

    #[test]
    fn test_disjoint_ranges_scale_with_prefix_length() {
        let n = 2000usize;
        let input: Vec<String> = (0..n)
            .map(|i| format!("10.{}.{}.0/24", i / 256, i % 256))
            .collect();
        let refs: Vec<&str> = input.iter().map(String::as_str).collect();
        // insert, ancestors and descendants each walk at most prefix + 1 nodes
        let bound = n * 3 * (24 + 1);

        let trie = run(&refs, Strategy::Trie);
        assert_eq!(trie.unique_range_count, n);
        assert_eq!(trie.finding_count, 0);
        assert!(trie.steps <= bound, "trie steps={} bound={bound}", trie.steps);

        let naive = run(&refs, Strategy::Naive);
        assert_eq!(naive.finding_count, 0);
        assert_eq!(naive.steps, n * (n - 1) / 2);
        assert!(naive.steps > bound);
    }

    #[test]
    fn test_sink_accessors() {
        let ranges = [
            ParsedRange {
                text: "10.0.0.0/8",
                range: IpRange::parse("10.0.0.0/8").unwrap(),
            },
            ParsedRange {
                text: "10.9.0.0/16",
                range: IpRange::parse("10.9.0.0/16").unwrap(),
            },
        ];
        let mut sink = FindingSink::new(true);
        assert_eq!(detect_naive(&ranges, &mut sink), 1);
        assert_eq!(sink.count(), 1);
        assert_eq!(sink.findings()[0].to_string(), "10.0.0.0/8 contains 10.9.0.0/16");
    }
}
