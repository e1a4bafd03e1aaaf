//! # linguahub-api
//!
//! HTTP API layer for LinguaHub built on Axum.
//!
//! Provides the chat REST endpoints, the WebSocket upgrade, the identity
//! extractor, DTOs, and middleware.

pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
