//! WebSocket wire protocol types.

pub mod types;

pub use types::{ClientEvent, EventFrame, ServerEvent};
