//! Room registry — manages all rooms and their memberships.

use dashmap::DashMap;

use crate::connection::handle::ConnectionId;

use super::membership::MembershipIndex;
use super::room::Room;

/// Registry of all active chat rooms.
///
/// All operations are idempotent: joining twice is a no-op, leaving a room
/// the connection is not in is a no-op, and asking about an unknown room
/// yields an empty result rather than an error. Rooms exist only while
/// they have members.
#[derive(Debug)]
pub struct RoomRegistry {
    /// Room name → Room.
    rooms: DashMap<String, Room>,
    /// Membership index (reverse index).
    memberships: MembershipIndex,
}

impl RoomRegistry {
    /// Creates a new room registry.
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
            memberships: MembershipIndex::new(),
        }
    }

    /// Joins a connection to a room.
    pub fn join(&self, conn_id: ConnectionId, room: &str) {
        self.rooms
            .entry(room.to_string())
            .or_insert_with(|| Room::new(room.to_string()))
            .join(conn_id);

        self.memberships.add(conn_id, room.to_string());
    }

    /// Removes a connection from a room.
    pub fn leave(&self, conn_id: ConnectionId, room: &str) {
        if let Some(mut entry) = self.rooms.get_mut(room) {
            entry.leave(conn_id);
            if entry.is_empty() {
                drop(entry);
                self.rooms.remove(room);
            }
        }
        self.memberships.remove(conn_id, room);
    }

    /// Removes a connection from every room it is a member of.
    pub fn remove_connection(&self, conn_id: ConnectionId) {
        let rooms = self.memberships.remove_all(conn_id);
        for room in &rooms {
            if let Some(mut entry) = self.rooms.get_mut(room) {
                entry.leave(conn_id);
                if entry.is_empty() {
                    drop(entry);
                    self.rooms.remove(room);
                }
            }
        }
    }

    /// Returns all member connection IDs for a room.
    pub fn members_of(&self, room: &str) -> Vec<ConnectionId> {
        self.rooms
            .get(room)
            .map(|entry| entry.member_ids())
            .unwrap_or_default()
    }

    /// Returns the number of rooms a connection is in.
    pub fn membership_count(&self, conn_id: ConnectionId) -> usize {
        self.memberships.count(conn_id)
    }

    /// Returns member count for a room.
    pub fn member_count(&self, room: &str) -> usize {
        self.rooms.get(room).map(|entry| entry.member_count()).unwrap_or(0)
    }

    /// Returns total number of active rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}
