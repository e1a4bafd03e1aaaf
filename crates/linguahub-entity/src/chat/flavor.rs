//! Room flavor — the two kinds of chat room.

use serde::{Deserialize, Serialize};

/// The kind of room a chat message belongs to.
///
/// `Global` is the single shared room; `Language` is one room per distinct
/// learning-language value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "room_flavor", rename_all = "lowercase")]
pub enum RoomFlavor {
    /// The single shared room open to every authenticated user.
    Global,
    /// A per-language room scoped to the sender's learning language.
    Language,
}

impl RoomFlavor {
    /// Stable lowercase name used in routes and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Language => "language",
        }
    }
}

impl std::fmt::Display for RoomFlavor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
