//! Typing tracker — ephemeral per-room "who is typing" state.
//!
//! Nothing here is persisted and nothing expires server-side: a client is
//! expected to send an explicit stopped-typing event after its own
//! inactivity window, so an uncleanly dropped client can leave a stale
//! entry. Receivers render typing state purely from the relayed events;
//! the stored map is not read back for snapshots.

use std::collections::HashMap;

use dashmap::DashMap;
use uuid::Uuid;

/// A user's typing state within one room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingState {
    /// Display name as supplied by the client event.
    pub username: String,
    /// Whether the user is currently typing.
    pub is_typing: bool,
}

/// Tracks typing state per room.
#[derive(Debug)]
pub struct TypingTracker {
    /// Room name → user ID → typing state.
    rooms: DashMap<String, HashMap<Uuid, TypingState>>,
}

impl TypingTracker {
    /// Create a new typing tracker
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
        }
    }

    /// Record a typing update. A stopped-typing update clears the entry;
    /// a room with no typers is dropped.
    pub fn set_typing(&self, room: &str, user_id: Uuid, username: &str, is_typing: bool) {
        if is_typing {
            self.rooms.entry(room.to_string()).or_default().insert(
                user_id,
                TypingState {
                    username: username.to_string(),
                    is_typing,
                },
            );
        } else if let Some(mut typers) = self.rooms.get_mut(room) {
            typers.remove(&user_id);
            if typers.is_empty() {
                drop(typers);
                self.rooms.remove(room);
            }
        }
    }

    /// Users currently marked as typing in a room.
    pub fn typing_in(&self, room: &str) -> Vec<(Uuid, TypingState)> {
        self.rooms
            .get(room)
            .map(|typers| typers.iter().map(|(id, s)| (*id, s.clone())).collect())
            .unwrap_or_default()
    }

    /// Number of users currently typing in a room.
    pub fn typing_count(&self, room: &str) -> usize {
        self.rooms.get(room).map(|typers| typers.len()).unwrap_or(0)
    }
}

impl Default for TypingTracker {
    fn default() -> Self {
        Self::new()
    }
}
