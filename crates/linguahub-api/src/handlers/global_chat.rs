//! Global chat room handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use linguahub_core::error::AppError;

use crate::dto::request::SendMessageRequest;
use crate::dto::response::{MessageSentResponse, MessagesResponse, StatusMessageResponse};
use crate::extractors::{Identity, PaginationParams};
use crate::state::AppState;

/// GET /api/global-chat/messages
pub async fn list_messages(
    State(state): State<AppState>,
    identity: Identity,
    Query(params): Query<PaginationParams>,
) -> Result<Json<MessagesResponse>, AppError> {
    let page = state
        .global_chat
        .list_messages(&identity, params.into_page_request())
        .await?;
    Ok(Json(MessagesResponse::from(page)))
}

/// POST /api/global-chat/messages
pub async fn send_message(
    State(state): State<AppState>,
    identity: Identity,
    Json(req): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<MessageSentResponse>), AppError> {
    let message = state.global_chat.send_message(&identity, &req.message).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageSentResponse {
            success: true,
            message,
        }),
    ))
}

/// DELETE /api/global-chat/messages/{message_id}
pub async fn delete_message(
    State(state): State<AppState>,
    identity: Identity,
    Path(message_id): Path<Uuid>,
) -> Result<Json<StatusMessageResponse>, AppError> {
    state.global_chat.delete_message(&identity, message_id).await?;
    Ok(Json(StatusMessageResponse {
        success: true,
        message: "Message deleted successfully".to_string(),
    }))
}
