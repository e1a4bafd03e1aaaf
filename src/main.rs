//! LinguaHub Server — real-time chat rooms for language exchange.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use linguahub_core::config::AppConfig;
use linguahub_core::error::AppError;
use linguahub_entity::chat::RoomFlavor;

#[tokio::main]
async fn main() {
    let env = std::env::var("LINGUAHUB_ENV").unwrap_or_else(|_| "default".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting LinguaHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    tracing::info!("Connecting to database...");
    let db = linguahub_database::connection::DatabasePool::connect(&config.database).await?;
    let db_pool = db.into_pool();

    linguahub_database::migration::run_migrations(&db_pool).await?;

    // ── Step 2: Repositories ─────────────────────────────────────
    let user_repo = Arc::new(linguahub_database::repositories::user::UserRepository::new(
        db_pool.clone(),
    ));
    let chat_repo = Arc::new(
        linguahub_database::repositories::chat_message::ChatMessageRepository::new(db_pool.clone()),
    );

    // ── Step 3: Realtime engine ──────────────────────────────────
    tracing::info!("Initializing realtime engine...");
    let realtime = Arc::new(linguahub_realtime::server::RealtimeEngine::new(
        config.realtime.clone(),
    ));

    // ── Step 4: Chat services (one per room flavor) ──────────────
    let global_chat = Arc::new(linguahub_service::chat::service::ChatService::new(
        RoomFlavor::Global,
        chat_repo.clone(),
        user_repo.clone(),
        realtime.connections.clone(),
        config.chat.clone(),
    ));
    let language_chat = Arc::new(linguahub_service::chat::service::ChatService::new(
        RoomFlavor::Language,
        chat_repo.clone(),
        user_repo.clone(),
        realtime.connections.clone(),
        config.chat.clone(),
    ));
    tracing::info!("Services initialized");

    // ── Step 5: Build and start HTTP server ──────────────────────
    let app_state = linguahub_api::state::AppState {
        config: Arc::new(config.clone()),
        db_pool: db_pool.clone(),
        user_repo,
        realtime: Arc::clone(&realtime),
        global_chat,
        language_chat,
    };

    let app = linguahub_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("LinguaHub server listening on {}", addr);

    // ── Step 6: Graceful shutdown ────────────────────────────────
    let shutdown_realtime = Arc::clone(&realtime);
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        shutdown_realtime.shutdown();
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    db_pool.close().await;
    tracing::info!("LinguaHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
