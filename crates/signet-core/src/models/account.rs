//! Account domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A pending email-ownership challenge: the one-time code and the
/// instant it stops being accepted.
///
/// The code and its expiry always travel together. An account either
/// carries both (a verification is pending) or neither (the account is
/// verified, or the code was consumed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingVerification {
    /// Fixed-width numeric one-time code.
    pub code: String,
    /// Instant after which the code is no longer accepted.
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    /// Name used when addressing the holder in outbound notifications.
    pub display_name: String,
    /// The account's identity and lookup key. Immutable after creation.
    pub email: String,
    /// Argon2id PHC-format hash. Opaque outside the password module.
    pub password_hash: String,
    /// Flips to `true` exactly once and never reverts.
    pub verified: bool,
    /// `Some` while ownership of the email address is still unproven.
    pub verification: Option<PendingVerification>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccount {
    pub display_name: String,
    pub email: String,
    /// Already-hashed credential; the coordinator hashes before storage.
    pub password_hash: String,
    /// Initial challenge. New accounts always start unverified with one.
    pub verification: PendingVerification,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAccount {
    pub verified: Option<bool>,
    /// `Some(Some(val))` = set, `Some(None)` = clear, `None` = no change.
    pub verification: Option<Option<PendingVerification>>,
}
