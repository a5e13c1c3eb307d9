//! orgtree storage — SurrealDB connection management, schema migrations
//! and the [`NodeRepository`](orgtree_core::NodeRepository) backends.
//!
//! This crate provides:
//! - Connection management ([`DbManager`], [`DbConfig`])
//! - Schema initialization and migrations ([`run_migrations`])
//! - Error types ([`DbError`])
//! - Backends: [`SurrealNodeRepository`] and [`MemoryNodeRepository`]

mod connection;
mod error;
pub mod memory;
pub mod repository;
mod schema;

pub use connection::{DbConfig, DbManager};
pub use error::DbError;
pub use memory::MemoryNodeRepository;
pub use repository::SurrealNodeRepository;
pub use schema::run_migrations;
