//! Persistent message store interface.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use linguahub_core::result::AppResult;
use linguahub_core::types::pagination::PageRequest;

use super::flavor::RoomFlavor;
use super::model::{ChatMessage, NewChatMessage};

/// CRUD + query interface over the persistent chat message store.
///
/// The service layer only ever talks to this trait; the production
/// implementation is the PostgreSQL repository in `linguahub-database`.
/// Each insert is a single independent row creation, so the store's
/// per-row atomicity is the only isolation the chat core relies on.
#[async_trait]
pub trait ChatMessageStore: Send + Sync {
    /// Persist a new message and return it with server-assigned id and
    /// timestamp.
    async fn insert(&self, new: NewChatMessage) -> AppResult<ChatMessage>;

    /// Look up a message by id, deleted or not.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ChatMessage>>;

    /// Fetch one history page for a room, newest first, excluding deleted
    /// rows. `language` must be `Some` iff `flavor` is `Language`.
    async fn find_page(
        &self,
        flavor: RoomFlavor,
        language: Option<&str>,
        page: &PageRequest,
    ) -> AppResult<Vec<ChatMessage>>;

    /// Soft-delete a message. The row is kept; only the deletion flag and
    /// timestamp are set.
    async fn mark_deleted(&self, id: Uuid, deleted_at: DateTime<Utc>) -> AppResult<()>;
}
