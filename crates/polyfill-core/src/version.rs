//! Protocol version type

use serde::{Deserialize, Serialize};
use std::fmt;

/// A revision of the wire message format.
///
/// Versions are totally ordered by their numeric value. A polyfiller
/// registered at version `N` bridges revision `N` and revision `N + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProtocolVersion(pub u32);

impl ProtocolVersion {
    /// Create a version from its numeric value
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Numeric value of this version
    pub const fn get(self) -> u32 {
        self.0
    }

    /// The revision that follows this one, saturating at `u32::MAX`
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl From<u32> for ProtocolVersion {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<ProtocolVersion> for u32 {
    fn from(version: ProtocolVersion) -> Self {
        version.0
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}
