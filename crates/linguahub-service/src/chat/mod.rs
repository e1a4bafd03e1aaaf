//! Chat room operations: policy and the flavor-parameterized service.

pub mod policy;
pub mod service;

pub use service::{ChatService, MessagePage};
