//! Inbound and outbound WebSocket event definitions.
//!
//! Every frame on the wire is JSON of the shape
//! `{"event": "<name>", "data": <payload>}`. Event names and payload
//! fields are camelCase.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events sent by the client to the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    /// Join the global chat room.
    JoinGlobalChat,
    /// Leave the global chat room.
    LeaveGlobalChat,
    /// Join the room for a learning language.
    JoinLanguageChat(String),
    /// Leave the room for a learning language.
    LeaveLanguageChat(String),
    /// Typing indicator for the global room.
    #[serde(rename_all = "camelCase")]
    Typing {
        /// The typing user.
        user_id: Uuid,
        /// Display name to show next to the indicator.
        username: String,
        /// Whether typing started or stopped.
        is_typing: bool,
    },
    /// Typing indicator for a language room.
    #[serde(rename_all = "camelCase")]
    LanguageTyping {
        /// The typing user.
        user_id: Uuid,
        /// Display name to show next to the indicator.
        username: String,
        /// The learning language naming the room.
        language: String,
        /// Whether typing started or stopped.
        is_typing: bool,
    },
}

/// Events originated by the real-time engine itself.
///
/// Message broadcasts (`newGlobalMessage`, `messageDeleted`, ...) are
/// produced by the chat service through the [`RoomBroadcaster`] seam and
/// arrive as [`EventFrame`]s; both serialize to the same wire shape.
///
/// [`RoomBroadcaster`]: linguahub_core::traits::RoomBroadcaster
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    /// Someone's typing state changed in the global room.
    #[serde(rename_all = "camelCase")]
    UserTyping {
        /// The typing user.
        user_id: Uuid,
        /// Display name.
        username: String,
        /// Whether typing started or stopped.
        is_typing: bool,
    },
    /// Someone's typing state changed in a language room.
    #[serde(rename_all = "camelCase")]
    UserLanguageTyping {
        /// The typing user.
        user_id: Uuid,
        /// Display name.
        username: String,
        /// Whether typing started or stopped.
        is_typing: bool,
        /// The learning language naming the room.
        language: String,
    },
    /// The last inbound frame could not be processed.
    #[serde(rename_all = "camelCase")]
    Error {
        /// Machine-readable error code.
        code: String,
        /// Human-readable description.
        message: String,
    },
}

/// A generic outbound frame carrying an event name and payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventFrame {
    /// Event name, e.g. `newGlobalMessage`.
    pub event: String,
    /// Event payload.
    pub data: serde_json::Value,
}

impl EventFrame {
    /// Creates a new event frame.
    pub fn new(event: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            event: event.into(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_event_wire_names() {
        let event: ClientEvent = serde_json::from_str(r#"{"event":"joinGlobalChat"}"#).unwrap();
        assert!(matches!(event, ClientEvent::JoinGlobalChat));

        let event: ClientEvent =
            serde_json::from_str(r#"{"event":"joinLanguageChat","data":"Spanish"}"#).unwrap();
        assert!(matches!(event, ClientEvent::JoinLanguageChat(l) if l == "Spanish"));
    }

    #[test]
    fn test_typing_payload_is_camel_case() {
        let raw = r#"{
            "event": "languageTyping",
            "data": {
                "userId": "7f8a6e0e-b9a3-4c5f-9f60-0a2f4f6d9d3a",
                "username": "Maria",
                "language": "Spanish",
                "isTyping": true
            }
        }"#;
        let event: ClientEvent = serde_json::from_str(raw).unwrap();
        match event {
            ClientEvent::LanguageTyping {
                username,
                language,
                is_typing,
                ..
            } => {
                assert_eq!(username, "Maria");
                assert_eq!(language, "Spanish");
                assert!(is_typing);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_server_event_serializes_with_event_tag() {
        let event = ServerEvent::UserTyping {
            user_id: Uuid::new_v4(),
            username: "Alice".to_string(),
            is_typing: true,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["event"], "userTyping");
        assert_eq!(value["data"]["isTyping"], true);
    }

    #[test]
    fn test_event_frame_matches_tagged_shape() {
        let frame = EventFrame::new("messageDeleted", serde_json::json!({"messageId": "abc"}));
        let value = serde_json::to_value(&frame).unwrap();
        assert_eq!(value["event"], "messageDeleted");
        assert_eq!(value["data"]["messageId"], "abc");
    }
}
