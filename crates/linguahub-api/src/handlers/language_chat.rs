//! Language chat room handlers.
//!
//! The target room is never taken from the request: it is always derived
//! from the caller's current learning language.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use linguahub_core::error::AppError;

use crate::dto::request::SendMessageRequest;
use crate::dto::response::{MessageSentResponse, MessagesResponse, StatusMessageResponse};
use crate::extractors::{Identity, PaginationParams};
use crate::state::AppState;

/// GET /api/language-chat/messages
pub async fn list_messages(
    State(state): State<AppState>,
    identity: Identity,
    Query(params): Query<PaginationParams>,
) -> Result<Json<MessagesResponse>, AppError> {
    let page = state
        .language_chat
        .list_messages(&identity, params.into_page_request())
        .await?;
    Ok(Json(MessagesResponse::from(page)))
}

/// POST /api/language-chat/messages
pub async fn send_message(
    State(state): State<AppState>,
    identity: Identity,
    Json(req): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<MessageSentResponse>), AppError> {
    let message = state
        .language_chat
        .send_message(&identity, &req.message)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageSentResponse {
            success: true,
            message,
        }),
    ))
}

/// DELETE /api/language-chat/messages/{message_id}
pub async fn delete_message(
    State(state): State<AppState>,
    identity: Identity,
    Path(message_id): Path<Uuid>,
) -> Result<Json<StatusMessageResponse>, AppError> {
    state
        .language_chat
        .delete_message(&identity, message_id)
        .await?;
    Ok(Json(StatusMessageResponse {
        success: true,
        message: "Message deleted successfully".to_string(),
    }))
}
