//! Wire protocol for lobby server <-> game client communication
//!
//! Messages are serialized as JSON with internally-tagged enums.
//! Format: {"Type": "MessageType", ...fields}
//!
//! The types here describe the current revision only. Payloads from older
//! peers go through the polyfills before they are deserialized.

use polyfill_core::{MessageTitle, ProtocolVersion};
use serde::{Deserialize, Serialize};

/// Message titles as they appear in the `Type` tag
pub mod titles {
    pub const HELLO: &str = "Hello";
    pub const WELCOME: &str = "Welcome";
    pub const JOIN_ROOM: &str = "JoinRoom";
    pub const ROOM_JOINED: &str = "RoomJoined";
    pub const CHAT_MESSAGE: &str = "ChatMessage";
    pub const PLAYER_MOVE: &str = "PlayerMove";
    pub const ERROR: &str = "Error";
    pub const DISCONNECT: &str = "Disconnect";
}

/// Player position on the map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Messages exchanged between the lobby server and game clients
///
/// Note: `rename_all` on enums only affects variant names, not field names inside variants.
/// Each field must be explicitly renamed using `#[serde(rename = "...")]` for PascalCase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "Type", rename_all = "PascalCase")]
pub enum LobbyMessage {
    // === Client -> Server ===
    /// Client greeting, announcing the revision it speaks
    Hello {
        #[serde(rename = "PlayerName")]
        player_name: String,
        #[serde(rename = "Protocol")]
        protocol: ProtocolVersion,
    },

    /// Join or create a room
    JoinRoom {
        #[serde(rename = "RoomId")]
        room_id: String,
    },

    /// Move the player
    PlayerMove {
        #[serde(rename = "PlayerId")]
        player_id: u64,
        #[serde(rename = "Position")]
        position: Position,
    },

    /// Leave the lobby
    Disconnect,

    // === Server -> Client ===
    /// Greeting accepted
    Welcome {
        #[serde(rename = "PlayerId")]
        player_id: u64,
        #[serde(rename = "Protocol")]
        protocol: ProtocolVersion,
    },

    /// Room membership confirmed
    RoomJoined {
        #[serde(rename = "RoomId")]
        room_id: String,
        #[serde(rename = "Players")]
        players: Vec<String>,
    },

    /// Error response
    Error {
        #[serde(rename = "Code")]
        code: i32,
        #[serde(rename = "Message")]
        message: String,
    },

    // === Both directions ===
    /// Chat line
    ChatMessage {
        #[serde(rename = "From")]
        from: String,
        #[serde(rename = "Channel")]
        channel: String,
        #[serde(rename = "Text")]
        text: String,
    },
}

impl LobbyMessage {
    /// Title carried in this message's `Type` tag
    pub fn title(&self) -> MessageTitle {
        let title = match self {
            LobbyMessage::Hello { .. } => titles::HELLO,
            LobbyMessage::JoinRoom { .. } => titles::JOIN_ROOM,
            LobbyMessage::PlayerMove { .. } => titles::PLAYER_MOVE,
            LobbyMessage::Disconnect => titles::DISCONNECT,
            LobbyMessage::Welcome { .. } => titles::WELCOME,
            LobbyMessage::RoomJoined { .. } => titles::ROOM_JOINED,
            LobbyMessage::Error { .. } => titles::ERROR,
            LobbyMessage::ChatMessage { .. } => titles::CHAT_MESSAGE,
        };
        MessageTitle::from(title)
    }
}

/// Serialize a message to JSON bytes
pub fn serialize(msg: &LobbyMessage) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(msg)
}

/// Deserialize a message from JSON bytes
pub fn deserialize(bytes: &[u8]) -> Result<LobbyMessage, serde_json::Error> {
    serde_json::from_slice(bytes)
}
