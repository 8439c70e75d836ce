//! Terminal output of the run report.

use crate::models::Relation;
use crate::processing::RunReport;
use colored::Colorize;
use itertools::Itertools;

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let quoted = format!("\"{}\"", value.to_string().replace('"', "\"\""));
    format!("{quoted:>width$}")
}

/// Summary lines for a finished run, without colors.
pub fn summary_lines(report: &RunReport) -> Vec<String> {
    let stats = &report.stats;
    let by_relation = report.findings.iter().counts_by(|f| f.relation);

    let mut lines = vec![
        format!("Time taken: {:?}", stats.elapsed),
        format!("Number of IP ranges: {}", stats.unique_range_count),
        format!(
            "Records read: {} ({} duplicates removed)",
            stats.total_records, stats.duplicates_removed
        ),
        format!("Containment findings: {}", stats.finding_count),
    ];
    if !report.findings.is_empty() {
        lines.push(format!(
            "  proper: {}, equivalent text: {}",
            by_relation.get(&Relation::Proper).copied().unwrap_or(0),
            by_relation.get(&Relation::Equivalent).copied().unwrap_or(0)
        ));
    }
    lines.push(format!("Parse failures: {}", stats.parse_failure_count));
    lines
}

/// Print the run summary, parse failures and (optionally) each finding.
pub fn print_report(report: &RunReport, list_findings: bool) {
    log::info!(
        "#Start print_report() started_at={}",
        report.stats.started_at.to_rfc3339()
    );

    for line in summary_lines(report) {
        println!("{line}");
    }

    for failure in &report.parse_failures {
        println!("{} {}", "INVALID".on_red(), failure);
    }

    if !report.duplicate_conflicts.is_empty() {
        println!(
            "{} {} duplicate ranges with mismatched info: {}",
            "WARN".yellow(),
            report.duplicate_conflicts.len(),
            report
                .duplicate_conflicts
                .iter()
                .map(|c| c.kept.ip_range.as_str())
                .unique()
                .join(", ")
        );
    }

    if list_findings {
        for finding in &report.findings {
            match finding.relation {
                Relation::Proper => println!("{} {}", "Contained!".green(), finding),
                Relation::Equivalent => println!("{} {}", "Equivalent!".cyan(), finding),
            }
        }
    }
}
