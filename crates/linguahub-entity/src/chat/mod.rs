//! Chat message entities, room identifiers, and the message store interface.

pub mod flavor;
pub mod model;
pub mod room;
pub mod store;

pub use flavor::RoomFlavor;
pub use model::{ChatMessage, ChatMessageView, MessageSender, NewChatMessage};
pub use room::{GLOBAL_ROOM, RoomId};
pub use store::ChatMessageStore;
