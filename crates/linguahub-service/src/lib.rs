//! # linguahub-service
//!
//! Business logic for LinguaHub chat rooms: the flavor-parameterized
//! chat service, the room authorization policy, and the request context.

pub mod chat;
pub mod context;

pub use chat::service::ChatService;
pub use context::RequestContext;
