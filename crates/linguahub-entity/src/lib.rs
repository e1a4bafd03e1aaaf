//! # linguahub-entity
//!
//! Domain entity models for LinguaHub: chat messages, room identifiers,
//! and the user read-model maintained by the external identity provider.

pub mod chat;
pub mod user;
