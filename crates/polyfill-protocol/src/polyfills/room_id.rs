//! Revision 3 -> 4: room identifiers

use polyfill_core::{MessageTitle, PolyfillError, Polyfiller, ProtocolVersion, Result};

use super::{decode_object, encode_object, take_field};
use crate::protocol::titles;

/// Renames `RoomName` to `RoomId` on room messages and back.
#[derive(Debug, Default, Clone, Copy)]
pub struct RoomIdPolyfill;

impl RoomIdPolyfill {
    pub const VERSION: ProtocolVersion = ProtocolVersion::new(3);

    fn rename(&self, title: &MessageTitle, payload: &[u8], from: &str, to: &str) -> Result<Vec<u8>> {
        let mut msg = decode_object(title, Self::VERSION, payload)?;
        let room = take_field(&mut msg, from, title, Self::VERSION)?;
        if !room.is_string() {
            return Err(PolyfillError::malformed(
                title,
                Self::VERSION,
                format!("`{}` is not a string", from),
            ));
        }
        msg.insert(to.into(), room);
        encode_object(msg)
    }
}

impl Polyfiller for RoomIdPolyfill {
    fn name(&self) -> &str {
        "room-id"
    }

    fn handles(&self, title: &MessageTitle) -> bool {
        title == titles::JOIN_ROOM || title == titles::ROOM_JOINED
    }

    fn incoming(&self, title: &MessageTitle, payload: &[u8]) -> Result<Vec<u8>> {
        self.rename(title, payload, "RoomName", "RoomId")
    }

    fn outgoing(&self, title: &MessageTitle, payload: &[u8]) -> Result<Vec<u8>> {
        self.rename(title, payload, "RoomId", "RoomName")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn test_handles_both_room_messages() {
        assert!(RoomIdPolyfill.handles(&MessageTitle::from(titles::JOIN_ROOM)));
        assert!(RoomIdPolyfill.handles(&MessageTitle::from(titles::ROOM_JOINED)));
        assert!(!RoomIdPolyfill.handles(&MessageTitle::from(titles::CHAT_MESSAGE)));
    }

    #[test]
    fn test_incoming_renames_field() {
        let title = MessageTitle::from(titles::ROOM_JOINED);
        let out = RoomIdPolyfill
            .incoming(&title, br#"{"Type":"RoomJoined","RoomName":"r9","Players":[]}"#)
            .unwrap();
        let value: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value, json!({"Type": "RoomJoined", "RoomId": "r9", "Players": []}));
    }

    #[test]
    fn test_missing_room_is_malformed() {
        let title = MessageTitle::from(titles::JOIN_ROOM);
        let err = RoomIdPolyfill
            .outgoing(&title, br#"{"Type":"JoinRoom","RoomName":"r9"}"#)
            .unwrap_err();
        assert_eq!(
            err,
            PolyfillError::malformed(&title, RoomIdPolyfill::VERSION, "missing field `RoomId`")
        );
    }

    #[test]
    fn test_non_string_room_is_malformed() {
        let title = MessageTitle::from(titles::JOIN_ROOM);
        let err = RoomIdPolyfill
            .incoming(&title, br#"{"RoomName":42}"#)
            .unwrap_err();
        assert!(err.is_malformed());
    }
}
