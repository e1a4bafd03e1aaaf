//! `Identity` extractor — resolves the authenticated caller.
//!
//! Authentication itself terminates upstream at the identity provider's
//! gateway, which forwards the verified user id in the `x-user-id` header.
//! The extractor loads the caller's current profile on every request, so
//! room addressing always reflects the latest learning language.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use linguahub_core::error::AppError;
use linguahub_entity::user::UserRef;
use linguahub_service::context::RequestContext;

use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct Identity(pub RequestContext);

impl std::ops::Deref for Identity {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Unauthorized - no user identity provided"))?;

        let user_id = Uuid::parse_str(header)
            .map_err(|_| AppError::unauthorized("Unauthorized - invalid user identity"))?;

        let user = state
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("Unauthorized - user not found"))?;

        Ok(Identity(RequestContext::new(UserRef::from(&user))))
    }
}
