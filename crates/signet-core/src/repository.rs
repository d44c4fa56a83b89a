//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Absence is reported as
//! [`SignetError::NotFound`](crate::error::SignetError) rather than
//! `Option` so callers can propagate with `?`.
//!
//! Implementations must provide read-then-write atomicity per record:
//! two concurrent updates of the same account must not interleave into
//! a lost update (e.g. both observing an unconsumed verification code).

use uuid::Uuid;

use crate::error::SignetResult;
use crate::models::account::{Account, CreateAccount, UpdateAccount};

/// Pagination parameters for list queries.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 50,
        }
    }
}

/// A paginated result set.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

pub trait AccountRepository: Send + Sync {
    /// Persist a new unverified account.
    ///
    /// Fails with `AlreadyExists` when the email is already registered.
    fn create(&self, input: CreateAccount) -> impl Future<Output = SignetResult<Account>> + Send;

    fn get_by_id(&self, id: Uuid) -> impl Future<Output = SignetResult<Account>> + Send;

    fn get_by_email(&self, email: &str) -> impl Future<Output = SignetResult<Account>> + Send;

    /// Reverse lookup by pending verification code.
    ///
    /// Part of the store contract though none of the login/verify flows
    /// use it; verification is addressed by email.
    fn get_by_verification_code(
        &self,
        code: &str,
    ) -> impl Future<Output = SignetResult<Account>> + Send;

    fn update(
        &self,
        id: Uuid,
        input: UpdateAccount,
    ) -> impl Future<Output = SignetResult<Account>> + Send;

    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = SignetResult<PaginatedResult<Account>>> + Send;
}
