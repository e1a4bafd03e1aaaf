//! Identity provider lookup interface.

use async_trait::async_trait;
use uuid::Uuid;

use linguahub_core::result::AppResult;

use super::model::UserRef;

/// Read-only lookup into the identity provider's user records.
///
/// The chat core resolves sender display profiles through this trait and
/// never writes identity data.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Resolve a user's display profile, if the user exists.
    async fn find_ref(&self, id: Uuid) -> AppResult<Option<UserRef>>;
}
