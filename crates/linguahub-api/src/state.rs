//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use linguahub_core::config::AppConfig;
use linguahub_database::repositories::user::UserRepository;
use linguahub_realtime::server::RealtimeEngine;
use linguahub_service::chat::service::ChatService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool
    pub db_pool: PgPool,
    /// User profile lookup (identity read-model)
    pub user_repo: Arc<UserRepository>,
    /// WebSocket realtime engine
    pub realtime: Arc<RealtimeEngine>,
    /// Chat service for the global room
    pub global_chat: Arc<ChatService>,
    /// Chat service for the per-language rooms
    pub language_chat: Arc<ChatService>,
}
