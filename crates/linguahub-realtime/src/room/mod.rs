//! Room membership tracking.

pub mod membership;
pub mod registry;
pub mod room;

pub use registry::RoomRegistry;
