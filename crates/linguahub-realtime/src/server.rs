//! Top-level real-time engine that ties together all subsystems.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::info;

use linguahub_core::config::realtime::RealtimeConfig;

use crate::connection::manager::ConnectionManager;
use crate::presence::typing::TypingTracker;
use crate::room::registry::RoomRegistry;

/// Central real-time engine that coordinates all WebSocket subsystems.
///
/// Constructed once per server process; the room registry and typing
/// tracker have no ambient/global access — everything goes through this
/// engine's connection manager.
#[derive(Clone)]
pub struct RealtimeEngine {
    /// Connection manager.
    pub connections: Arc<ConnectionManager>,
    /// Room registry.
    pub rooms: Arc<RoomRegistry>,
    /// Typing tracker.
    pub typing: Arc<TypingTracker>,
    /// Shutdown signal sender.
    shutdown_tx: broadcast::Sender<()>,
}

impl std::fmt::Debug for RealtimeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealtimeEngine").finish()
    }
}

impl RealtimeEngine {
    /// Creates a new real-time engine with all subsystems.
    pub fn new(config: RealtimeConfig) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        let rooms = Arc::new(RoomRegistry::new());
        let typing = Arc::new(TypingTracker::new());
        let connections = Arc::new(ConnectionManager::new(config, rooms.clone(), typing.clone()));

        info!("Real-time engine initialized");

        Self {
            connections,
            rooms,
            typing,
            shutdown_tx,
        }
    }

    /// Returns a shutdown receiver for graceful shutdown coordination.
    pub fn shutdown_receiver(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Initiates a graceful shutdown of the real-time engine.
    pub fn shutdown(&self) {
        info!("Shutting down real-time engine");
        let _ = self.shutdown_tx.send(());
    }
}
