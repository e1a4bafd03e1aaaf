//! Chat room configuration.

use serde::{Deserialize, Serialize};

/// Chat message and pagination limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Maximum message body length in characters (after trimming).
    #[serde(default = "default_max_message_length")]
    pub max_message_length: usize,
    /// Default number of messages per history page.
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    /// Maximum number of messages per history page.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_message_length: default_max_message_length(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

fn default_max_message_length() -> usize {
    1000
}

fn default_page_size() -> u64 {
    50
}

fn default_max_page_size() -> u64 {
    100
}
