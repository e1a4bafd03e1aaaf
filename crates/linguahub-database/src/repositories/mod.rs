//! Concrete repository implementations.

pub mod chat_message;
pub mod user;

pub use chat_message::ChatMessageRepository;
pub use user::UserRepository;
