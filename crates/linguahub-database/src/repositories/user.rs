//! User repository implementation.
//!
//! Read-only: account rows are written by the external identity provider.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use linguahub_core::error::{AppError, ErrorKind};
use linguahub_core::result::AppResult;
use linguahub_entity::user::{User, UserDirectory, UserRef};

/// Repository for looking up user profiles.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user", e))
    }
}

#[async_trait]
impl UserDirectory for UserRepository {
    async fn find_ref(&self, id: Uuid) -> AppResult<Option<UserRef>> {
        Ok(self.find_by_id(id).await?.as_ref().map(UserRef::from))
    }
}
