//! Lobby protocol versioning.
//!
//! # Version History
//!
//! | Version | Changes |
//! |---------|---------|
//! | 1 | Initial protocol version |
//! | 2 | `ChatMessage` gained `Channel` (older peers only had `"global"`) |
//! | 3 | `PlayerMove` nests `X`/`Y` under `Position` |
//! | 4 | `JoinRoom`/`RoomJoined` renamed `RoomName` to `RoomId` |
//!
//! # Adding a Revision
//!
//! 1. Bump `PROTOCOL_VERSION`
//! 2. Add a polyfiller registered at the *previous* version that rewrites
//!    the affected messages in both directions
//! 3. Register it in `default_registry()`

use polyfill_core::ProtocolVersion;

/// Current protocol version spoken by this build
pub const PROTOCOL_VERSION: ProtocolVersion = ProtocolVersion::new(4);

/// Oldest protocol version the bundled polyfills can bridge
pub const MIN_SUPPORTED_VERSION: ProtocolVersion = ProtocolVersion::new(1);

/// Supported version window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolInfo {
    /// Version spoken natively
    pub current: ProtocolVersion,
    /// Oldest version that can still be bridged
    pub min_supported: ProtocolVersion,
}

impl Default for ProtocolInfo {
    fn default() -> Self {
        Self {
            current: PROTOCOL_VERSION,
            min_supported: MIN_SUPPORTED_VERSION,
        }
    }
}

impl ProtocolInfo {
    /// Whether a peer at `version` can be served.
    ///
    /// Informational only: the dispatcher never rejects a version.
    pub fn is_supported(&self, version: ProtocolVersion) -> bool {
        version >= self.min_supported && version <= self.current
    }

    /// Whether a peer at `version` needs any translation at all
    pub fn needs_polyfill(&self, version: ProtocolVersion) -> bool {
        version < self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_window() {
        let info = ProtocolInfo::default();
        assert!(!info.is_supported(ProtocolVersion(0)));
        assert!(info.is_supported(ProtocolVersion(1)));
        assert!(info.is_supported(ProtocolVersion(4)));
        assert!(!info.is_supported(ProtocolVersion(5)));
    }

    #[test]
    fn test_needs_polyfill() {
        let info = ProtocolInfo::default();
        assert!(info.needs_polyfill(ProtocolVersion(3)));
        assert!(!info.needs_polyfill(PROTOCOL_VERSION));
    }
}
