//! # linguahub-core
//!
//! Core crate for LinguaHub. Contains the unified error system with its
//! HTTP status mapping, configuration schemas, pagination types, and the
//! room-broadcast seam trait the service layer consumes.
//!
//! This crate has **no** internal dependencies on other LinguaHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
