//! IP range (CIDR block) model.
//!
//! Provides [`IpRange`], a canonical network/prefix pair for either address
//! family, along with the mask helpers used to build and compare ranges.

use crate::error::{InvalidReason, RangeError};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Maximum prefix length for an IPv4 range (32 bits).
pub const MAX_LENGTH_V4: u8 = 32;
/// Maximum prefix length for an IPv6 range (128 bits).
pub const MAX_LENGTH_V6: u8 = 128;

/// Address family of an [`IpRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AddressFamily {
    V4,
    V6,
}

impl AddressFamily {
    /// Bit width of an address in this family.
    pub fn max_length(self) -> u8 {
        match self {
            AddressFamily::V4 => MAX_LENGTH_V4,
            AddressFamily::V6 => MAX_LENGTH_V6,
        }
    }

    fn all_bits(self) -> u128 {
        match self {
            AddressFamily::V4 => u32::MAX as u128,
            AddressFamily::V6 => u128::MAX,
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressFamily::V4 => write!(f, "IPv4"),
            AddressFamily::V6 => write!(f, "IPv6"),
        }
    }
}

/// Network mask for a prefix length, right-aligned in a `u128`.
///
/// Returns `None` when `len` is longer than the family allows.
///
/// # Examples
/// ```
/// use geo_range_containment::models::{get_cidr_mask, AddressFamily};
/// assert_eq!(get_cidr_mask(AddressFamily::V4, 24), Some(0xFFFFFF00));
/// ```
pub fn get_cidr_mask(family: AddressFamily, len: u8) -> Option<u128> {
    let max = family.max_length();
    if len > max {
        None
    } else if len == 0 {
        Some(0)
    } else {
        let right_len = u32::from(max - len);
        Some((family.all_bits() >> right_len) << right_len)
    }
}

/// Zero the host bits of `bits` for the given prefix length.
pub fn cut_addr(family: AddressFamily, bits: u128, len: u8) -> Option<u128> {
    get_cidr_mask(family, len).map(|mask| bits & mask)
}

/// Highest address bits covered by `bits`/`len`.
pub fn broadcast_addr(family: AddressFamily, bits: u128, len: u8) -> Option<u128> {
    get_cidr_mask(family, len).map(|mask| (bits & mask) | (!mask & family.all_bits()))
}

/// A canonical CIDR block: family, network address and prefix length.
///
/// The stored address always has its host bits cleared, so two ranges are
/// equal exactly when they cover the same addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IpRange {
    family: AddressFamily,
    addr: u128,
    prefix: u8,
}

impl IpRange {
    /// Build a range from an address and prefix length, clearing host bits.
    pub fn new(addr: IpAddr, prefix: u8) -> Result<IpRange, RangeError> {
        let (family, bits) = match addr {
            IpAddr::V4(v4) => (AddressFamily::V4, u128::from(u32::from(v4))),
            IpAddr::V6(v6) => (AddressFamily::V6, u128::from(v6)),
        };
        let addr = cut_addr(family, bits, prefix).ok_or_else(|| {
            RangeError::invalid(
                &format!("{addr}/{prefix}"),
                InvalidReason::PrefixOutOfRange {
                    prefix: u32::from(prefix),
                    max: family.max_length(),
                },
            )
        })?;
        Ok(IpRange {
            family,
            addr,
            prefix,
        })
    }

    /// Parse CIDR text such as `10.0.0.0/8` or `2001:db8::/32`.
    ///
    /// Host bits set in the address are accepted and cleared. Whitespace is
    /// not trimmed.
    pub fn parse(cidr: &str) -> Result<IpRange, RangeError> {
        let (addr_text, prefix_text) = cidr
            .split_once('/')
            .ok_or_else(|| RangeError::invalid(cidr, InvalidReason::MissingPrefixSeparator))?;

        let addr: IpAddr = addr_text
            .parse()
            .map_err(|_| RangeError::invalid(cidr, InvalidReason::InvalidAddress))?;

        // u32::from_str would also take a leading '+'
        if prefix_text.is_empty() || !prefix_text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RangeError::invalid(cidr, InvalidReason::InvalidPrefixLength));
        }
        let prefix: u32 = prefix_text
            .parse()
            .map_err(|_| RangeError::invalid(cidr, InvalidReason::InvalidPrefixLength))?;

        let max = match addr {
            IpAddr::V4(_) => MAX_LENGTH_V4,
            IpAddr::V6(_) => MAX_LENGTH_V6,
        };
        if prefix > u32::from(max) {
            return Err(RangeError::invalid(
                cidr,
                InvalidReason::PrefixOutOfRange { prefix, max },
            ));
        }

        IpRange::new(addr, prefix as u8).map_err(|_| {
            RangeError::invalid(cidr, InvalidReason::PrefixOutOfRange { prefix, max })
        })
    }

    pub fn family(&self) -> AddressFamily {
        self.family
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    /// Network address bits, right-aligned.
    pub fn bits(&self) -> u128 {
        self.addr
    }

    pub fn max_prefix(&self) -> u8 {
        self.family.max_length()
    }

    /// The `i`-th most significant address bit (0-based).
    ///
    /// `i` must be below [`max_prefix`](Self::max_prefix); the trie only asks
    /// for bits `0..prefix`.
    pub(crate) fn bit(&self, i: u8) -> u8 {
        debug_assert!(i < self.max_prefix(), "bit {i} out of range for {self}");
        let shift = u32::from(self.max_prefix() - 1 - i);
        ((self.addr >> shift) & 1) as u8
    }

    /// Lowest (network) address in the range.
    pub fn network(&self) -> IpAddr {
        self.to_ip_addr(self.addr)
    }

    /// Highest (broadcast) address in the range.
    pub fn broadcast(&self) -> IpAddr {
        let bits = broadcast_addr(self.family, self.addr, self.prefix).unwrap_or(self.addr);
        self.to_ip_addr(bits)
    }

    /// Number of addresses covered, saturating at `u128::MAX` for `::/0`.
    pub fn address_count(&self) -> u128 {
        let host_bits = u32::from(self.max_prefix() - self.prefix);
        1u128.checked_shl(host_bits).unwrap_or(u128::MAX)
    }

    /// True when every address of `inner` is also in `self`.
    ///
    /// Inclusive: a range contains itself. Ranges of different families never
    /// contain each other.
    pub fn contains(&self, inner: &IpRange) -> bool {
        if self.family != inner.family || self.prefix > inner.prefix {
            return false;
        }
        cut_addr(self.family, inner.addr, self.prefix) == Some(self.addr)
    }

    fn to_ip_addr(&self, bits: u128) -> IpAddr {
        match self.family {
            AddressFamily::V4 => IpAddr::V4(Ipv4Addr::from(bits as u32)),
            AddressFamily::V6 => IpAddr::V6(Ipv6Addr::from(bits)),
        }
    }
}

/// Free-function form of [`IpRange::contains`].
pub fn contains(outer: &IpRange, inner: &IpRange) -> bool {
    outer.contains(inner)
}

impl FromStr for IpRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IpRange::parse(s)
    }
}

impl fmt::Display for IpRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.network(), self.prefix)
    }
}

impl Serialize for IpRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for IpRange {
    fn deserialize<D>(deserializer: D) -> Result<IpRange, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        IpRange::parse(&s).map_err(de::Error::custom)
    }
}
