//! CSV and JSON output of containment findings.

use super::terminal::format_field;
use crate::models::ContainmentFinding;
use std::error::Error;

/// CSV header matching [`finding_csv_row`].
pub const CSV_HEADER: &str = r#""cnt","outer","inner","outer_network","inner_network","relation""#;

/// Format one finding as a CSV row.
pub fn finding_csv_row(j: usize, finding: &ContainmentFinding) -> String {
    format!(
        "{j},{outer},{inner},{outer_network},{inner_network},{relation}",
        j = format_field(j, 6),
        outer = format_field(&finding.outer, 20),
        inner = format_field(&finding.inner, 20),
        outer_network = format_field(finding.outer_range, 20),
        inner_network = format_field(finding.inner_range, 20),
        relation = format_field(format!("{:?}", finding.relation).to_lowercase(), 12),
    )
}

/// Print findings as CSV to stdout.
pub fn print_findings_csv(findings: &[ContainmentFinding]) {
    log::info!("#Start print_findings_csv() rows={}", findings.len());
    println!("{CSV_HEADER}");
    for (i, finding) in findings.iter().enumerate() {
        println!("{}", finding_csv_row(i + 1, finding));
    }
}

/// Print findings as a pretty JSON array to stdout.
pub fn print_findings_json(findings: &[ContainmentFinding]) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(findings)
        .map_err(|e| format!("Error serializing findings: {e}"))?;
    println!("{json}");
    Ok(())
}
