//! Chat message entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::user::UserRef;

use super::flavor::RoomFlavor;
use super::room::RoomId;

/// A persisted chat room message.
///
/// Messages are immutable after creation except for the one-shot soft
/// delete (`is_deleted`/`deleted_at`); there is no edit operation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Unique message identifier.
    pub id: Uuid,
    /// The user who sent the message.
    pub sender_id: Uuid,
    /// Which kind of room the message belongs to.
    pub flavor: RoomFlavor,
    /// Lower-cased learning language; present iff `flavor` is `Language`.
    pub language: Option<String>,
    /// Trimmed message text.
    pub body: String,
    /// Whether the sender has deleted the message.
    pub is_deleted: bool,
    /// When the message was deleted.
    pub deleted_at: Option<DateTime<Utc>>,
    /// When the message was created.
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// The room this message was posted to.
    pub fn room(&self) -> RoomId {
        match self.flavor {
            RoomFlavor::Global => RoomId::global(),
            RoomFlavor::Language => RoomId::language(self.language.as_deref().unwrap_or_default()),
        }
    }

    /// Attach the resolved sender profile for delivery to clients.
    ///
    /// Language-room views carry the sender's learning language; global
    /// views do not.
    pub fn into_view(self, sender: &UserRef) -> ChatMessageView {
        let sender = MessageSender {
            id: sender.id,
            full_name: sender.full_name.clone(),
            avatar_url: sender.avatar_url.clone(),
            learning_language: match self.flavor {
                RoomFlavor::Language => sender.learning_language.clone(),
                RoomFlavor::Global => None,
            },
        };
        ChatMessageView {
            id: self.id,
            sender,
            flavor: self.flavor,
            language: self.language,
            body: self.body,
            is_deleted: self.is_deleted,
            deleted_at: self.deleted_at,
            created_at: self.created_at,
        }
    }
}

/// Data required to persist a new chat message.
#[derive(Debug, Clone)]
pub struct NewChatMessage {
    /// The sending user.
    pub sender_id: Uuid,
    /// Target room flavor.
    pub flavor: RoomFlavor,
    /// Lower-cased language for language-room messages.
    pub language: Option<String>,
    /// Trimmed, validated message text.
    pub body: String,
}

/// A chat message with its sender profile resolved, as delivered to
/// clients over HTTP and WebSocket.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageView {
    /// Unique message identifier.
    pub id: Uuid,
    /// Resolved sender profile.
    pub sender: MessageSender,
    /// Which kind of room the message belongs to.
    pub flavor: RoomFlavor,
    /// Lower-cased language for language-room messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Message text.
    pub body: String,
    /// Whether the message has been deleted.
    pub is_deleted: bool,
    /// When the message was deleted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    /// When the message was created.
    pub created_at: DateTime<Utc>,
}

/// Sender profile embedded in a [`ChatMessageView`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSender {
    /// Sender user ID.
    pub id: Uuid,
    /// Display name.
    pub full_name: String,
    /// Avatar image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Learning language (language-room views only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_language: Option<String>,
}
