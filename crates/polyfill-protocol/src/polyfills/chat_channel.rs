//! Revision 1 -> 2: chat channels

use polyfill_core::{MessageTitle, PolyfillError, Polyfiller, ProtocolVersion, Result};
use serde_json::Value;
use tracing::debug;

use super::{decode_object, encode_object, take_field};
use crate::protocol::titles;

/// Channel every revision-1 chat line implicitly belonged to
pub const DEFAULT_CHANNEL: &str = "global";

/// Adds `Channel` to revision-1 chat lines and strips it for revision-1 peers.
///
/// Revision 1 had a single shared channel. Lines sent on any other channel
/// are delivered to old peers with the channel name prefixed to the text.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChatChannelPolyfill;

impl ChatChannelPolyfill {
    pub const VERSION: ProtocolVersion = ProtocolVersion::new(1);
}

impl Polyfiller for ChatChannelPolyfill {
    fn name(&self) -> &str {
        "chat-channel"
    }

    fn handles(&self, title: &MessageTitle) -> bool {
        title == titles::CHAT_MESSAGE
    }

    fn incoming(&self, title: &MessageTitle, payload: &[u8]) -> Result<Vec<u8>> {
        let mut msg = decode_object(title, Self::VERSION, payload)?;
        if !msg.get("Text").is_some_and(Value::is_string) {
            return Err(PolyfillError::malformed(
                title,
                Self::VERSION,
                "missing string field `Text`",
            ));
        }

        msg.entry("Channel")
            .or_insert_with(|| Value::from(DEFAULT_CHANNEL));
        encode_object(msg)
    }

    fn outgoing(&self, title: &MessageTitle, payload: &[u8]) -> Result<Vec<u8>> {
        let mut msg = decode_object(title, Self::VERSION, payload)?;
        let channel = take_field(&mut msg, "Channel", title, Self::VERSION)?;
        let channel = channel.as_str().ok_or_else(|| {
            PolyfillError::malformed(title, Self::VERSION, "`Channel` is not a string")
        })?;

        if channel != DEFAULT_CHANNEL {
            let text = msg
                .get("Text")
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    PolyfillError::malformed(title, Self::VERSION, "missing string field `Text`")
                })?;
            debug!(channel, "Folding chat channel into text for old peer");
            let folded = format!("[{}] {}", channel, text);
            msg.insert("Text".into(), Value::from(folded));
        }

        encode_object(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn title() -> MessageTitle {
        MessageTitle::from(titles::CHAT_MESSAGE)
    }

    fn run_incoming(value: Value) -> Result<Value> {
        let bytes = ChatChannelPolyfill.incoming(&title(), &serde_json::to_vec(&value).unwrap())?;
        Ok(serde_json::from_slice(&bytes).unwrap())
    }

    fn run_outgoing(value: Value) -> Result<Value> {
        let bytes = ChatChannelPolyfill.outgoing(&title(), &serde_json::to_vec(&value).unwrap())?;
        Ok(serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_handles_only_chat() {
        assert!(ChatChannelPolyfill.handles(&title()));
        assert!(!ChatChannelPolyfill.handles(&MessageTitle::from(titles::PLAYER_MOVE)));
    }

    #[test]
    fn test_incoming_adds_global_channel() {
        let out = run_incoming(json!({"Type": "ChatMessage", "From": "a", "Text": "hi"})).unwrap();
        assert_eq!(out["Channel"], "global");
        assert_eq!(out["Text"], "hi");
    }

    #[test]
    fn test_incoming_keeps_existing_channel() {
        let out = run_incoming(json!({"From": "a", "Text": "hi", "Channel": "team"})).unwrap();
        assert_eq!(out["Channel"], "team");
    }

    #[test]
    fn test_incoming_requires_text() {
        let err = run_incoming(json!({"From": "a", "Text": 5})).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_outgoing_global_drops_channel() {
        let out = run_outgoing(json!({"From": "a", "Channel": "global", "Text": "hi"})).unwrap();
        assert_eq!(out, json!({"From": "a", "Text": "hi"}));
    }

    #[test]
    fn test_outgoing_other_channel_folds_into_text() {
        let out = run_outgoing(json!({"From": "a", "Channel": "team", "Text": "push mid"})).unwrap();
        assert_eq!(out, json!({"From": "a", "Text": "[team] push mid"}));
    }

    #[test]
    fn test_outgoing_requires_channel() {
        let err = run_outgoing(json!({"From": "a", "Text": "hi"})).unwrap_err();
        assert_eq!(
            err,
            PolyfillError::malformed(&title(), ChatChannelPolyfill::VERSION, "missing field `Channel`")
        );
    }
}
