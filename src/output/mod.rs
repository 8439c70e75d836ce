//! Output formatting for run reports.
//!
//! - [`csv`] - CSV and JSON finding rows
//! - [`terminal`] - Terminal summary with colors

mod csv;
mod terminal;

pub use csv::{finding_csv_row, print_findings_csv, print_findings_json, CSV_HEADER};
pub use terminal::{format_field, print_report, summary_lines};
