//! # linguahub-realtime
//!
//! Real-time WebSocket engine for LinguaHub chat rooms. Provides:
//!
//! - Connection lifecycle management with a permissive user binding
//! - Room registry with idempotent join/leave and disconnect cleanup
//! - Room-scoped event fan-out (new messages, deletions)
//! - Ephemeral typing-presence relay
//!
//! Single-process by design: fan-out never leaves this process.

pub mod connection;
pub mod message;
pub mod presence;
pub mod room;
pub mod server;

pub use connection::manager::ConnectionManager;
pub use presence::typing::TypingTracker;
pub use room::registry::RoomRegistry;
pub use server::RealtimeEngine;
