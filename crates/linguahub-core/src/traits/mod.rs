//! Seam traits consumed by the service layer.

pub mod broadcast;

pub use broadcast::RoomBroadcaster;
