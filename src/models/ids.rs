//! Record identifiers
//!
//! Ids are positive integers assigned by the store. They are never reused
//! after deletion, so a newtype keeps them from being mixed up with counts
//! or list positions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Store-assigned record identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    /// The id handed out by an empty store
    pub const FIRST: RecordId = RecordId(1);

    /// Wrap a raw id value
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw id value
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Ids start at 1
    pub const fn is_valid(&self) -> bool {
        self.0 > 0
    }

    /// The id that follows this one, or `None` once `u64::MAX` is taken
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for RecordId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        Ok(Self(s.parse()?))
    }
}
