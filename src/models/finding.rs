//! Containment findings and per-record failures.

use super::IpRange;
use crate::error::RangeError;
use serde::Serialize;
use std::fmt;

/// How the outer range relates to the inner one.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    /// Outer is strictly larger than inner.
    Proper,
    /// Same network, written with different text.
    Equivalent,
}

/// `outer` contains `inner`. Both are identified by their original CIDR text.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainmentFinding {
    pub outer: String,
    pub inner: String,
    pub outer_range: IpRange,
    pub inner_range: IpRange,
    pub relation: Relation,
}

impl fmt::Display for ContainmentFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.relation {
            Relation::Proper => write!(f, "{} contains {}", self.outer, self.inner),
            Relation::Equivalent => write!(
                f,
                "{} is equivalent to {} ({})",
                self.outer, self.inner, self.outer_range
            ),
        }
    }
}

/// A record whose CIDR text could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub ip_range: String,
    pub error: RangeError,
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}
