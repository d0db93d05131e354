//! Polyfillers bridging older lobby revisions
//!
//! Each polyfiller is registered at the revision it upgrades *from*, so a
//! peer at version `N` is served by every polyfiller at `N` and above.

mod chat_channel;
mod nested_position;
mod room_id;

pub use chat_channel::ChatChannelPolyfill;
pub use nested_position::NestedPositionPolyfill;
pub use room_id::RoomIdPolyfill;

use polyfill_core::{MessageTitle, PolyfillError, ProtocolVersion, Result};
use polyfill_dispatch::{Dispatcher, PolyfillRegistry};
use serde_json::{Map, Value};

/// Registry holding every bundled polyfiller
pub fn default_registry() -> Result<PolyfillRegistry> {
    let mut registry = PolyfillRegistry::new();
    registry.register_default::<ChatChannelPolyfill>(ChatChannelPolyfill::VERSION)?;
    registry.register_default::<NestedPositionPolyfill>(NestedPositionPolyfill::VERSION)?;
    registry.register_default::<RoomIdPolyfill>(RoomIdPolyfill::VERSION)?;
    Ok(registry)
}

/// Dispatcher over [`default_registry`]
pub fn default_dispatcher() -> Result<Dispatcher> {
    Ok(Dispatcher::new(default_registry()?))
}

/// Parse a payload as a JSON object
pub(crate) fn decode_object(
    title: &MessageTitle,
    version: ProtocolVersion,
    payload: &[u8],
) -> Result<Map<String, Value>> {
    let value: Value = serde_json::from_slice(payload)
        .map_err(|e| PolyfillError::malformed(title, version, e.to_string()))?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(PolyfillError::malformed(
            title,
            version,
            format!("expected a JSON object, found {}", kind(&other)),
        )),
    }
}

/// Re-encode a JSON object
pub(crate) fn encode_object(map: Map<String, Value>) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(&Value::Object(map))?)
}

/// Remove a required field from an object
pub(crate) fn take_field(
    map: &mut Map<String, Value>,
    field: &str,
    title: &MessageTitle,
    version: ProtocolVersion,
) -> Result<Value> {
    map.remove(field)
        .ok_or_else(|| PolyfillError::malformed(title, version, format!("missing field `{}`", field)))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
