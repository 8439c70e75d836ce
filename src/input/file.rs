//! JSON record file loading.

use crate::error::InputError;
use crate::models::GeoRecord;

/// Read a JSON array of [`GeoRecord`]s from `path`.
///
/// # Returns
/// * `Ok(Vec<GeoRecord>)` - Records in file order
/// * `Err` - If the file cannot be read or is not a JSON array of records
pub async fn read_records(path: &str) -> Result<Vec<GeoRecord>, InputError> {
    log::info!("Reading records from: {path}");
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| InputError::Read {
            path: path.to_string(),
            source,
        })?;
    parse_records_json(&json, path)
}

/// Decode a JSON array of records. `path` is only used in error messages.
pub fn parse_records_json(json: &str, path: &str) -> Result<Vec<GeoRecord>, InputError> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    let records: Vec<GeoRecord> =
        serde_path_to_error::deserialize(&mut deserializer).map_err(|e| InputError::Decode {
            path: path.to_string(),
            json_path: e.path().to_string(),
            message: e.inner().to_string(),
        })?;
    log::info!("Decoded {} records from {path}", records.len());
    Ok(records)
}
