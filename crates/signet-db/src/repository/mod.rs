//! SurrealDB repository implementations.

mod account;

pub use account::SurrealAccountRepository;
