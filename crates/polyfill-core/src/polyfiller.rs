//! Polyfiller capability trait

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;
use crate::message::MessageTitle;

/// Which way a payload is flowing relative to the local code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Received from a peer speaking an older revision
    Incoming,
    /// About to be sent to a peer speaking an older revision
    Outgoing,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Incoming => f.write_str("incoming"),
            Direction::Outgoing => f.write_str("outgoing"),
        }
    }
}

/// A transformation registered at one protocol version.
///
/// A polyfiller registered at version `N` knows the difference between
/// revision `N` and revision `N + 1` for the messages it [`handles`]:
/// `incoming` rewrites an `N`-shaped payload into the `N + 1` shape, and
/// `outgoing` rewrites an `N + 1`-shaped payload for an `N` peer.
///
/// Instances are built fresh for every dispatch call and must not carry
/// state between calls.
///
/// [`handles`]: Polyfiller::handles
pub trait Polyfiller: Send + Sync {
    /// Short name used in logs and listings
    fn name(&self) -> &str;

    /// Whether this polyfiller transforms the given message
    fn handles(&self, title: &MessageTitle) -> bool;

    /// Transform a payload received from an older peer
    fn incoming(&self, title: &MessageTitle, payload: &[u8]) -> Result<Vec<u8>>;

    /// Transform a payload bound for an older peer
    fn outgoing(&self, title: &MessageTitle, payload: &[u8]) -> Result<Vec<u8>>;

    /// Transform a payload in the given direction
    fn transform(
        &self,
        direction: Direction,
        title: &MessageTitle,
        payload: &[u8],
    ) -> Result<Vec<u8>> {
        match direction {
            Direction::Incoming => self.incoming(title, payload),
            Direction::Outgoing => self.outgoing(title, payload),
        }
    }
}
