//! Error types for polyfill dispatch

use thiserror::Error;

use crate::message::MessageTitle;
use crate::version::ProtocolVersion;

/// Result type for polyfill operations
pub type Result<T> = std::result::Result<T, PolyfillError>;

/// Polyfill error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolyfillError {
    /// A polyfiller could not parse the payload it claimed to handle
    #[error("Malformed {message} payload at {version}: {reason}")]
    MalformedPayload {
        message: MessageTitle,
        version: ProtocolVersion,
        reason: String,
    },

    /// Two polyfillers registered for the same version
    #[error("Polyfiller already registered for {0}")]
    DuplicateVersion(ProtocolVersion),

    /// A transformed payload could not be re-encoded
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PolyfillError {
    /// Build a malformed-payload error for a message at a version
    pub fn malformed(
        message: &MessageTitle,
        version: ProtocolVersion,
        reason: impl Into<String>,
    ) -> Self {
        PolyfillError::MalformedPayload {
            message: message.clone(),
            version,
            reason: reason.into(),
        }
    }

    /// Whether this error came from an unparseable payload
    pub fn is_malformed(&self) -> bool {
        matches!(self, PolyfillError::MalformedPayload { .. })
    }
}

impl From<serde_json::Error> for PolyfillError {
    fn from(err: serde_json::Error) -> Self {
        PolyfillError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display() {
        let err = PolyfillError::malformed(
            &MessageTitle::from("PlayerMove"),
            ProtocolVersion(2),
            "missing field `X`",
        );
        assert!(err.is_malformed());
        assert_eq!(
            err.to_string(),
            "Malformed PlayerMove payload at v2: missing field `X`"
        );
    }

    #[test]
    fn test_duplicate_is_not_malformed() {
        let err = PolyfillError::DuplicateVersion(ProtocolVersion(3));
        assert!(!err.is_malformed());
        assert_eq!(err.to_string(), "Polyfiller already registered for v3");
    }
}
