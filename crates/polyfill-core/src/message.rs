//! Message title type

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Opaque label naming a wire-message type.
///
/// Only ever compared for equality; nothing in the dispatch path looks
/// inside it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageTitle(String);

impl MessageTitle {
    /// Create a title from anything string-like
    pub fn new(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    /// Borrow the title as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MessageTitle {
    fn from(title: &str) -> Self {
        Self(title.to_string())
    }
}

impl From<String> for MessageTitle {
    fn from(title: String) -> Self {
        Self(title)
    }
}

impl AsRef<str> for MessageTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for MessageTitle {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for MessageTitle {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for MessageTitle {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for MessageTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
