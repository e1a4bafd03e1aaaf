//! Request DTOs.

use serde::{Deserialize, Serialize};

/// Body for sending a chat message.
///
/// A missing `message` field is treated like an empty message and fails
/// validation in the service layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    /// The message text.
    #[serde(default)]
    pub message: String,
}
