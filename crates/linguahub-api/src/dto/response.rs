//! Response DTOs.

use serde::{Deserialize, Serialize};

use linguahub_entity::chat::ChatMessageView;
use linguahub_service::chat::service::MessagePage;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// One page of room history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagesResponse {
    /// Whether the request was successful.
    pub success: bool,
    /// Messages, oldest first.
    pub messages: Vec<ChatMessageView>,
    /// Whether an older page likely exists.
    pub has_more: bool,
    /// The caller's learning language (language rooms only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl From<MessagePage> for MessagesResponse {
    fn from(page: MessagePage) -> Self {
        Self {
            success: true,
            messages: page.messages,
            has_more: page.has_more,
            language: page.language,
        }
    }
}

/// Response to a successful send.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageSentResponse {
    /// Whether the request was successful.
    pub success: bool,
    /// The persisted message with server-assigned id and timestamp.
    pub message: ChatMessageView,
}

/// Response carrying a plain confirmation message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusMessageResponse {
    /// Whether the request was successful.
    pub success: bool,
    /// Confirmation text.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

/// Detailed health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// Overall status.
    pub status: String,
    /// Database status.
    pub database: String,
    /// WebSocket connections.
    pub ws_connections: usize,
    /// Users with at least one live connection.
    pub online_users: usize,
    /// Active chat rooms.
    pub active_rooms: usize,
}
