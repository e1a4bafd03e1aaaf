//! Room identifier derivation.
//!
//! Room identifiers are derived values, never stored: the global room is a
//! fixed token and each language room is `{language}-chat` with the
//! language lower-cased. Two users share a language room iff their
//! lower-cased learning languages are equal.

use std::fmt;

/// Token for the single global chat room.
pub const GLOBAL_ROOM: &str = "global-chat";

/// A derived chat room identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomId(String);

impl RoomId {
    /// The global chat room.
    pub fn global() -> Self {
        Self(GLOBAL_ROOM.to_string())
    }

    /// The room for a learning language, e.g. `spanish-chat`.
    pub fn language(language: &str) -> Self {
        Self(format!("{}-chat", language.trim().to_lowercase()))
    }

    /// The room token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RoomId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
