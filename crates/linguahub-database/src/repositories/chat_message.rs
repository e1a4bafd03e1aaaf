//! Chat message repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use linguahub_core::error::{AppError, ErrorKind};
use linguahub_core::result::AppResult;
use linguahub_core::types::pagination::PageRequest;
use linguahub_entity::chat::{ChatMessage, ChatMessageStore, NewChatMessage, RoomFlavor};

/// PostgreSQL-backed chat message store.
#[derive(Debug, Clone)]
pub struct ChatMessageRepository {
    pool: PgPool,
}

impl ChatMessageRepository {
    /// Create a new chat message repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatMessageStore for ChatMessageRepository {
    async fn insert(&self, new: NewChatMessage) -> AppResult<ChatMessage> {
        sqlx::query_as::<_, ChatMessage>(
            "INSERT INTO chat_messages (id, sender_id, flavor, language, body) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(new.sender_id)
        .bind(new.flavor)
        .bind(&new.language)
        .bind(&new.body)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert message", e))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ChatMessage>> {
        sqlx::query_as::<_, ChatMessage>("SELECT * FROM chat_messages WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find message", e))
    }

    async fn find_page(
        &self,
        flavor: RoomFlavor,
        language: Option<&str>,
        page: &PageRequest,
    ) -> AppResult<Vec<ChatMessage>> {
        let rows = match language {
            Some(language) => {
                sqlx::query_as::<_, ChatMessage>(
                    "SELECT * FROM chat_messages \
                     WHERE flavor = $1 AND language = $2 AND is_deleted = FALSE \
                     ORDER BY created_at DESC LIMIT $3 OFFSET $4",
                )
                .bind(flavor)
                .bind(language)
                .bind(page.limit() as i64)
                .bind(page.offset() as i64)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, ChatMessage>(
                    "SELECT * FROM chat_messages \
                     WHERE flavor = $1 AND is_deleted = FALSE \
                     ORDER BY created_at DESC LIMIT $2 OFFSET $3",
                )
                .bind(flavor)
                .bind(page.limit() as i64)
                .bind(page.offset() as i64)
                .fetch_all(&self.pool)
                .await
            }
        };

        rows.map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list messages", e))
    }

    async fn mark_deleted(&self, id: Uuid, deleted_at: DateTime<Utc>) -> AppResult<()> {
        sqlx::query("UPDATE chat_messages SET is_deleted = TRUE, deleted_at = $2 WHERE id = $1")
            .bind(id)
            .bind(deleted_at)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete message", e))?;
        Ok(())
    }
}
