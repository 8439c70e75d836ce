//! Geolocation record data model.

use serde::{Deserialize, Deserializer, Serialize};

/// One input row: a raw CIDR string plus pass-through geolocation metadata.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct GeoRecord {
    /// CIDR text exactly as supplied (not validated here).
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ip_range: String,
    /// ISO country code.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub country_code: String,
    /// ISO 3166-2 subdivision code.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub subdivision_1_iso_code: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub city: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub postal_code: String,
}

impl GeoRecord {
    /// Record with only the range set; metadata left empty.
    pub fn new(ip_range: &str) -> GeoRecord {
        GeoRecord {
            ip_range: ip_range.to_string(),
            ..Default::default()
        }
    }

    /// True when the geolocation fields match, ignoring the range text.
    pub fn same_metadata(&self, other: &GeoRecord) -> bool {
        self.country_code == other.country_code
            && self.subdivision_1_iso_code == other.subdivision_1_iso_code
            && self.city == other.city
            && self.postal_code == other.postal_code
    }
}

// JSON null decodes to "" for string fields.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
