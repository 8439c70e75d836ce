//! Input loading.
//!
//! - [`file`] - JSON record file reading

mod file;

pub use file::{parse_records_json, read_records};
