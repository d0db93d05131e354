//! Revision 2 -> 3: nested player position

use polyfill_core::{MessageTitle, PolyfillError, Polyfiller, ProtocolVersion, Result};
use serde_json::{Map, Value};

use super::{decode_object, encode_object, take_field};
use crate::protocol::titles;

/// Moves `X`/`Y` of `PlayerMove` under `Position` and back.
#[derive(Debug, Default, Clone, Copy)]
pub struct NestedPositionPolyfill;

impl NestedPositionPolyfill {
    pub const VERSION: ProtocolVersion = ProtocolVersion::new(2);
}

fn coordinate(value: Value, axis: &str, title: &MessageTitle) -> Result<Value> {
    if value.is_number() {
        Ok(value)
    } else {
        Err(PolyfillError::malformed(
            title,
            NestedPositionPolyfill::VERSION,
            format!("`{}` is not a number", axis),
        ))
    }
}

impl Polyfiller for NestedPositionPolyfill {
    fn name(&self) -> &str {
        "nested-position"
    }

    fn handles(&self, title: &MessageTitle) -> bool {
        title == titles::PLAYER_MOVE
    }

    fn incoming(&self, title: &MessageTitle, payload: &[u8]) -> Result<Vec<u8>> {
        let mut msg = decode_object(title, Self::VERSION, payload)?;
        let x = coordinate(take_field(&mut msg, "X", title, Self::VERSION)?, "X", title)?;
        let y = coordinate(take_field(&mut msg, "Y", title, Self::VERSION)?, "Y", title)?;

        let mut position = Map::new();
        position.insert("X".into(), x);
        position.insert("Y".into(), y);
        msg.insert("Position".into(), Value::Object(position));
        encode_object(msg)
    }

    fn outgoing(&self, title: &MessageTitle, payload: &[u8]) -> Result<Vec<u8>> {
        let mut msg = decode_object(title, Self::VERSION, payload)?;
        let Value::Object(mut position) = take_field(&mut msg, "Position", title, Self::VERSION)?
        else {
            return Err(PolyfillError::malformed(
                title,
                Self::VERSION,
                "`Position` is not an object",
            ));
        };

        let x = coordinate(take_field(&mut position, "X", title, Self::VERSION)?, "X", title)?;
        let y = coordinate(take_field(&mut position, "Y", title, Self::VERSION)?, "Y", title)?;
        msg.insert("X".into(), x);
        msg.insert("Y".into(), y);
        encode_object(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn title() -> MessageTitle {
        MessageTitle::from(titles::PLAYER_MOVE)
    }

    #[test]
    fn test_incoming_nests_coordinates() {
        let payload = br#"{"Type":"PlayerMove","PlayerId":1,"X":3,"Y":-1.25}"#;
        let out = NestedPositionPolyfill.incoming(&title(), payload).unwrap();
        let value: Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(
            value,
            json!({"Type": "PlayerMove", "PlayerId": 1, "Position": {"X": 3, "Y": -1.25}})
        );
    }

    #[test]
    fn test_incoming_rejects_string_coordinate() {
        let err = NestedPositionPolyfill
            .incoming(&title(), br#"{"X":"3","Y":1}"#)
            .unwrap_err();
        assert_eq!(
            err,
            PolyfillError::malformed(&title(), NestedPositionPolyfill::VERSION, "`X` is not a number")
        );
    }

    #[test]
    fn test_outgoing_flattens_position() {
        let payload = br#"{"Type":"PlayerMove","PlayerId":1,"Position":{"X":0.5,"Y":2}}"#;
        let out = NestedPositionPolyfill.outgoing(&title(), payload).unwrap();
        let value: Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value, json!({"Type": "PlayerMove", "PlayerId": 1, "X": 0.5, "Y": 2}));
    }

    #[test]
    fn test_outgoing_rejects_flat_payload() {
        let err = NestedPositionPolyfill
            .outgoing(&title(), br#"{"Position":[1,2]}"#)
            .unwrap_err();
        assert!(err.is_malformed());
    }
}
