//! SIGNET Core — domain models, repository and notifier trait
//! definitions, and shared error types.
//!
//! This crate carries no I/O dependencies: storage and notification
//! implementations live in `signet-db` and `signet-mail`, behind the
//! traits defined here.

pub mod error;
pub mod models;
pub mod notify;
pub mod repository;

pub use error::{SignetError, SignetResult};
pub use notify::Notifier;
pub use repository::AccountRepository;
