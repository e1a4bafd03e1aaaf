//! Room-scoped event fan-out trait.

/// Sink for pushing a named event to every connection currently joined
/// to a room.
///
/// Implemented by the real-time engine; consumed by the chat service so
/// that persistence logic never touches connection state directly.
/// Delivery is best-effort and non-blocking: an unreachable recipient is
/// skipped, never surfaced to the caller.
pub trait RoomBroadcaster: Send + Sync {
    /// Deliver `payload` under `event` to every connection in `room`.
    fn broadcast(&self, room: &str, event: &str, payload: serde_json::Value);
}
