//! SIGNET Database — SurrealDB connection management, schema
//! migrations, and the account repository implementation.
//!
//! This crate provides:
//! - Connection management ([`DbManager`], [`DbConfig`])
//! - Schema initialization and migrations ([`run_migrations`])
//! - The [`AccountRepository`](signet_core::repository::AccountRepository)
//!   implementation ([`SurrealAccountRepository`])
//! - Error types ([`DbError`])

mod connection;
mod error;
mod repository;
mod schema;

pub use connection::{DbConfig, DbManager};
pub use error::DbError;
pub use repository::SurrealAccountRepository;
pub use schema::{run_migrations, schema_v1};
