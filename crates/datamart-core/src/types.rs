//! Strong type definitions for the datamart registry.
//!
//! Identifiers are newtypes to prevent misuse at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unix timestamp in milliseconds.
///
/// All timestamps in the system use this unit. Grant durations arrive in
/// whole seconds and are converted exactly once, at grant issuance.
pub type Timestamp = i64;

/// Identifier of a registered data record.
///
/// Allocated sequentially by the store starting at 0. Never reused, even
/// across process restarts with a durable backend.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DataId(pub u64);

impl DataId {
    /// Create a DataId from a raw integer.
    pub const fn from_u64(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw integer value.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// The identifier of the first record ever registered.
    pub const FIRST: Self = Self(0);
}

impl fmt::Debug for DataId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DataId({})", self.0)
    }
}

impl fmt::Display for DataId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for DataId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// An opaque identity string naming a caller: a data owner, a grant
/// recipient, a buyer, or the scoring authority.
///
/// The registry does not interpret principals beyond equality; identity
/// verification happens outside the core.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Principal(String);

impl Principal {
    /// Create a principal from an identity string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identity string is empty. Empty principals are rejected
    /// at registration; records never carry an empty owner.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Principal({})", self.0)
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Principal {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Principal {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for Principal {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
