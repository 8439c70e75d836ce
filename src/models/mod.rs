//! Domain models for range containment.
//!
//! - [`IpRange`] - canonical CIDR block for IPv4 or IPv6
//! - [`GeoRecord`] - input row with pass-through geolocation metadata
//! - [`ContainmentFinding`] and [`ParseFailure`] - engine results

mod finding;
mod geo_record;
mod ip_range;

// Re-export public types
pub use finding::{ContainmentFinding, ParseFailure, Relation};
pub use geo_record::GeoRecord;
pub use ip_range::{
    broadcast_addr, contains, cut_addr, get_cidr_mask, AddressFamily, IpRange, MAX_LENGTH_V4,
    MAX_LENGTH_V6,
};
