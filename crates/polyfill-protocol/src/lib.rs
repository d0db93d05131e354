//! Lobby wire protocol and its polyfills
//!
//! This crate provides:
//! - Current-revision lobby messages and their JSON codec
//! - The protocol's version history and supported window
//! - Polyfillers bridging every older revision to the current one
//! - `default_registry()` wiring those polyfillers up for a `Dispatcher`

pub mod polyfills;
pub mod protocol;
pub mod version;

pub use polyfills::{
    ChatChannelPolyfill, NestedPositionPolyfill, RoomIdPolyfill, default_dispatcher,
    default_registry,
};
pub use protocol::{LobbyMessage, Position, deserialize, serialize, titles};
pub use version::{MIN_SUPPORTED_VERSION, PROTOCOL_VERSION, ProtocolInfo};
