//! # linguahub-database
//!
//! PostgreSQL database connection management and concrete repository
//! implementations for LinguaHub entities.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
