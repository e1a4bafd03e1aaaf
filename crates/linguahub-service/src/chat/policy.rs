//! Room authorization policy.
//!
//! Pure decision functions, no side effects. The global room is open to
//! every authenticated caller; a language room is addressable only through
//! the caller's own current learning language, so a caller can never read
//! or write another language's room. Delete additionally requires ownership
//! and, for language rooms, that the stored message language still matches
//! the caller's current language.

use linguahub_core::error::AppError;
use linguahub_core::result::AppResult;
use linguahub_entity::chat::{ChatMessage, RoomFlavor, RoomId};
use linguahub_entity::user::UserRef;

/// The chat operation being authorized. Determines the user-facing
/// message when the caller has no learning language set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatOp {
    /// Listing room history.
    List,
    /// Sending a message.
    Send,
    /// Deleting an own message.
    Delete,
}

/// Resolve the room a caller may act on for the given flavor.
///
/// For the language flavor the room is always derived from the caller's
/// current profile; a missing or blank learning language denies access.
pub fn resolve_room(flavor: RoomFlavor, caller: &UserRef, op: ChatOp) -> AppResult<RoomId> {
    match flavor {
        RoomFlavor::Global => Ok(RoomId::global()),
        RoomFlavor::Language => {
            let language = require_language(caller, op)?;
            Ok(RoomId::language(&language))
        }
    }
}

/// The caller's lower-cased learning language, or a validation error with
/// the operation-specific message.
pub fn require_language(caller: &UserRef, op: ChatOp) -> AppResult<String> {
    caller.learning_language_lower().ok_or_else(|| {
        let message = match op {
            ChatOp::List => {
                "Please set your learning language in your profile to access language chat rooms"
            }
            ChatOp::Send => "Please set your learning language in your profile to send messages",
            ChatOp::Delete => "Please set your learning language in your profile",
        };
        AppError::validation(message)
    })
}

/// Check whether a caller may delete a message.
///
/// Ownership is always required. For language rooms the stored message
/// language must equal the caller's *current* lower-cased learning
/// language — a caller who changed languages can no longer delete messages
/// sent under the old one.
pub fn authorize_delete(
    flavor: RoomFlavor,
    caller: &UserRef,
    message: &ChatMessage,
) -> AppResult<()> {
    if message.sender_id != caller.id {
        return Err(AppError::forbidden("You can only delete your own messages"));
    }

    if flavor == RoomFlavor::Language {
        let language = require_language(caller, ChatOp::Delete)?;
        if message.language.as_deref() != Some(language.as_str()) {
            return Err(AppError::forbidden(
                "You can only delete messages from your language room",
            ));
        }
    }

    Ok(())
}
