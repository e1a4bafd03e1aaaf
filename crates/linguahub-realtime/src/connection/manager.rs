//! Connection manager — handles connection lifecycle, room membership,
//! inbound event dispatch, and room-scoped fan-out.
//!
//! All membership mutations for one connection (joins, leaves, disconnect
//! cleanup) are issued from that connection's own socket task, so they are
//! naturally serialized per connection: a join can never race a disconnect
//! that has already begun for the same connection.

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use linguahub_core::config::realtime::RealtimeConfig;
use linguahub_core::traits::RoomBroadcaster;
use linguahub_entity::chat::{GLOBAL_ROOM, RoomId};

use crate::message::types::{ClientEvent, EventFrame, ServerEvent};
use crate::presence::typing::TypingTracker;
use crate::room::registry::RoomRegistry;

use super::handle::{ConnectionHandle, ConnectionId};
use super::pool::ConnectionPool;

/// Manages all active WebSocket connections and their room memberships.
#[derive(Debug)]
pub struct ConnectionManager {
    /// Connection pool.
    pool: Arc<ConnectionPool>,
    /// Room registry.
    rooms: Arc<RoomRegistry>,
    /// Typing tracker.
    typing: Arc<TypingTracker>,
    /// Configuration.
    config: RealtimeConfig,
}

impl ConnectionManager {
    /// Creates a new connection manager.
    pub fn new(
        config: RealtimeConfig,
        rooms: Arc<RoomRegistry>,
        typing: Arc<TypingTracker>,
    ) -> Self {
        Self {
            pool: Arc::new(ConnectionPool::new()),
            rooms,
            typing,
            config,
        }
    }

    /// Registers a new connection.
    ///
    /// The user binding is permissive: `None` (missing or unparseable
    /// handshake `user_id`) still yields a live connection — it just has no
    /// entry in the user index. Returns the connection handle and the
    /// receiver draining its outbound frames.
    pub fn register(
        &self,
        user_id: Option<Uuid>,
    ) -> (Arc<ConnectionHandle>, tokio::sync::mpsc::Receiver<String>) {
        let (tx, rx) = tokio::sync::mpsc::channel(self.config.outbound_buffer_size);
        let handle = Arc::new(ConnectionHandle::new(user_id, tx));
        self.pool.add(handle.clone());

        info!(
            conn_id = %handle.id,
            user_id = ?user_id,
            "WebSocket connection registered"
        );

        (handle, rx)
    }

    /// Unregisters a connection, removing it from every room.
    pub fn unregister(&self, conn_id: &ConnectionId) {
        if let Some(handle) = self.pool.remove(conn_id) {
            handle.mark_dead();
            self.rooms.remove_connection(*conn_id);

            info!(
                conn_id = %conn_id,
                user_id = ?handle.user_id,
                "WebSocket connection unregistered"
            );
        }
    }

    /// Processes an inbound frame from a client.
    ///
    /// Malformed frames get an error event back and never close the
    /// connection.
    pub fn handle_inbound(&self, conn_id: &ConnectionId, raw: &str) {
        let event: ClientEvent = match serde_json::from_str(raw) {
            Ok(event) => event,
            Err(e) => {
                debug!(conn_id = %conn_id, error = %e, "Unparseable client event");
                self.send_to(
                    conn_id,
                    &ServerEvent::Error {
                        code: "INVALID_EVENT".to_string(),
                        message: format!("Failed to parse event: {e}"),
                    },
                );
                return;
            }
        };

        match event {
            ClientEvent::JoinGlobalChat => {
                self.rooms.join(*conn_id, GLOBAL_ROOM);
                debug!(conn_id = %conn_id, room = GLOBAL_ROOM, "Joined room");
            }
            ClientEvent::LeaveGlobalChat => {
                self.rooms.leave(*conn_id, GLOBAL_ROOM);
                debug!(conn_id = %conn_id, room = GLOBAL_ROOM, "Left room");
            }
            ClientEvent::JoinLanguageChat(language) => {
                if language.trim().is_empty() {
                    return;
                }
                let room = RoomId::language(&language);
                self.rooms.join(*conn_id, room.as_str());
                debug!(conn_id = %conn_id, room = %room, "Joined room");
            }
            ClientEvent::LeaveLanguageChat(language) => {
                if language.trim().is_empty() {
                    return;
                }
                let room = RoomId::language(&language);
                self.rooms.leave(*conn_id, room.as_str());
                debug!(conn_id = %conn_id, room = %room, "Left room");
            }
            ClientEvent::Typing {
                user_id,
                username,
                is_typing,
            } => {
                self.typing
                    .set_typing(GLOBAL_ROOM, user_id, &username, is_typing);
                self.relay(
                    GLOBAL_ROOM,
                    conn_id,
                    &ServerEvent::UserTyping {
                        user_id,
                        username,
                        is_typing,
                    },
                );
            }
            ClientEvent::LanguageTyping {
                user_id,
                username,
                language,
                is_typing,
            } => {
                if language.trim().is_empty() {
                    return;
                }
                let room = RoomId::language(&language);
                self.typing
                    .set_typing(room.as_str(), user_id, &username, is_typing);
                self.relay(
                    room.as_str(),
                    conn_id,
                    &ServerEvent::UserLanguageTyping {
                        user_id,
                        username,
                        is_typing,
                        language,
                    },
                );
            }
        }
    }

    /// Fan a serialized frame out to a room, optionally excluding one
    /// connection. Best-effort: unreachable members are skipped.
    pub fn broadcast_frame(&self, room: &str, frame: &str, except: Option<ConnectionId>) {
        for member in self.rooms.members_of(room) {
            if Some(member) == except {
                continue;
            }
            if let Some(handle) = self.pool.get(&member) {
                handle.send(frame.to_string());
            }
        }
    }

    /// Relay an engine-originated event to a room, excluding the sender.
    fn relay(&self, room: &str, sender: &ConnectionId, event: &ServerEvent) {
        match serde_json::to_string(event) {
            Ok(frame) => self.broadcast_frame(room, &frame, Some(*sender)),
            Err(e) => warn!(error = %e, "Failed to serialize server event"),
        }
    }

    /// Send an event to one connection.
    fn send_to(&self, conn_id: &ConnectionId, event: &ServerEvent) {
        if let Some(handle) = self.pool.get(conn_id) {
            if let Ok(frame) = serde_json::to_string(event) {
                handle.send(frame);
            }
        }
    }

    /// Returns the total connection count.
    pub fn connection_count(&self) -> usize {
        self.pool.connection_count()
    }

    /// Returns the number of unique bound users.
    pub fn user_count(&self) -> usize {
        self.pool.user_count()
    }

    /// Checks if a user has at least one live connection.
    pub fn is_user_connected(&self, user_id: &Uuid) -> bool {
        !self.pool.get_user_connections(user_id).is_empty()
    }
}

impl RoomBroadcaster for ConnectionManager {
    /// Room fan-out used by the chat service: every member receives the
    /// event, the originating user's own connections included.
    fn broadcast(&self, room: &str, event: &str, payload: serde_json::Value) {
        let frame = EventFrame::new(event, payload);
        match serde_json::to_string(&frame) {
            Ok(frame) => self.broadcast_frame(room, &frame, None),
            Err(e) => warn!(error = %e, "Failed to serialize broadcast frame"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;
    use tokio::sync::mpsc::Receiver;

    fn manager() -> ConnectionManager {
        ConnectionManager::new(
            RealtimeConfig::default(),
            Arc::new(RoomRegistry::new()),
            Arc::new(TypingTracker::new()),
        )
    }

    fn recv_frame(rx: &mut Receiver<String>) -> serde_json::Value {
        let frame = rx.try_recv().expect("expected a frame");
        serde_json::from_str(&frame).unwrap()
    }

    #[tokio::test]
    async fn test_broadcast_reaches_room_members_only() {
        let manager = manager();
        let (a, mut rx_a) = manager.register(Some(Uuid::new_v4()));
        let (b, mut rx_b) = manager.register(Some(Uuid::new_v4()));
        let (_c, mut rx_c) = manager.register(None);

        manager.handle_inbound(&a.id, r#"{"event":"joinGlobalChat"}"#);
        manager.handle_inbound(&b.id, r#"{"event":"joinGlobalChat"}"#);

        manager.broadcast(
            "global-chat",
            "newGlobalMessage",
            serde_json::json!({"body": "hello"}),
        );

        assert_eq!(recv_frame(&mut rx_a)["event"], "newGlobalMessage");
        assert_eq!(recv_frame(&mut rx_b)["data"]["body"], "hello");
        assert!(rx_c.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_sender_receives_own_message_broadcast() {
        let manager = manager();
        let (a, mut rx_a) = manager.register(Some(Uuid::new_v4()));
        manager.handle_inbound(&a.id, r#"{"event":"joinLanguageChat","data":"Spanish"}"#);

        manager.broadcast(
            "spanish-chat",
            "newLanguageMessage",
            serde_json::json!({"body": "hola"}),
        );

        assert_eq!(recv_frame(&mut rx_a)["event"], "newLanguageMessage");
    }

    #[tokio::test]
    async fn test_typing_relay_excludes_sender() {
        let manager = manager();
        let user_a = Uuid::new_v4();
        let (a, mut rx_a) = manager.register(Some(user_a));
        let (b, mut rx_b) = manager.register(Some(Uuid::new_v4()));

        manager.handle_inbound(&a.id, r#"{"event":"joinGlobalChat"}"#);
        manager.handle_inbound(&b.id, r#"{"event":"joinGlobalChat"}"#);

        let typing = json!({
            "event": "typing",
            "data": {"userId": user_a, "username": "Alice", "isTyping": true}
        });
        manager.handle_inbound(&a.id, &typing.to_string());

        let frame = recv_frame(&mut rx_b);
        assert_eq!(frame["event"], "userTyping");
        assert_eq!(frame["data"]["username"], "Alice");
        assert!(rx_a.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_unregister_removes_all_memberships() {
        let manager = manager();
        let (a, mut rx_a) = manager.register(Some(Uuid::new_v4()));

        manager.handle_inbound(&a.id, r#"{"event":"joinGlobalChat"}"#);
        manager.handle_inbound(&a.id, r#"{"event":"joinLanguageChat","data":"French"}"#);
        manager.unregister(&a.id);

        manager.broadcast("global-chat", "newGlobalMessage", json!({}));
        manager.broadcast("french-chat", "newLanguageMessage", json!({}));

        assert!(rx_a.try_recv().is_err());
        assert_eq!(manager.connection_count(), 0);
        assert_eq!(manager.user_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_frame_gets_error_event() {
        let manager = manager();
        let (a, mut rx_a) = manager.register(None);

        manager.handle_inbound(&a.id, "not json at all");

        let frame = recv_frame(&mut rx_a);
        assert_eq!(frame["event"], "error");
        assert_eq!(frame["data"]["code"], "INVALID_EVENT");
    }

    #[tokio::test]
    async fn test_blank_language_events_are_ignored() {
        let rooms = Arc::new(RoomRegistry::new());
        let manager = ConnectionManager::new(
            RealtimeConfig::default(),
            rooms.clone(),
            Arc::new(TypingTracker::new()),
        );
        let (a, _rx_a) = manager.register(None);

        manager.handle_inbound(&a.id, r#"{"event":"joinLanguageChat","data":"  "}"#);

        assert_eq!(rooms.room_count(), 0);
    }
}
