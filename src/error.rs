//! Error types for range parsing and input loading.

use std::fmt;
use thiserror::Error;

/// Why a piece of CIDR text was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    /// No `/` between address and prefix length.
    MissingPrefixSeparator,
    /// The address part is not an IPv4 or IPv6 literal.
    InvalidAddress,
    /// The prefix part is empty or not a plain decimal number.
    InvalidPrefixLength,
    /// The prefix is larger than the address family allows.
    PrefixOutOfRange { prefix: u32, max: u8 },
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::MissingPrefixSeparator => write!(f, "missing '/' prefix separator"),
            InvalidReason::InvalidAddress => write!(f, "invalid IP address"),
            InvalidReason::InvalidPrefixLength => write!(f, "invalid prefix length"),
            InvalidReason::PrefixOutOfRange { prefix, max } => {
                write!(f, "prefix length /{prefix} exceeds /{max}")
            }
        }
    }
}

/// Errors produced while turning CIDR text into an [`crate::models::IpRange`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("{cidr} is not a valid CIDR notation: {reason}")]
    InvalidRangeFormat { cidr: String, reason: InvalidReason },
}

impl RangeError {
    pub(crate) fn invalid(cidr: &str, reason: InvalidReason) -> Self {
        RangeError::InvalidRangeFormat {
            cidr: cidr.to_string(),
            reason,
        }
    }

    /// The reason the text was rejected.
    pub fn reason(&self) -> InvalidReason {
        match self {
            RangeError::InvalidRangeFormat { reason, .. } => *reason,
        }
    }
}

/// Errors from reading the JSON record file.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Error reading {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Error while unmarshalling JSON file {path}: path={json_path} error={message}")]
    Decode {
        path: String,
        json_path: String,
        message: String,
    },
}
