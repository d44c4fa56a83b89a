//! Authentication error types.

use signet_core::error::SignetError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("identity is already registered")]
    DuplicateIdentity,

    #[error("account not found")]
    AccountNotFound,

    #[error("account is not verified")]
    AccountUnverified,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("verification code has expired")]
    CodeExpired,

    #[error("verification code is invalid")]
    CodeMismatch,

    #[error("account is already verified")]
    AlreadyVerified,

    #[error("verification code delivery failed: {0}")]
    NotificationFailed(String),

    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("cryptography error: {0}")]
    Crypto(String),

    #[error(transparent)]
    Store(#[from] SignetError),
}

impl From<AuthError> for SignetError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Store(inner) => inner,
            AuthError::Crypto(msg) => SignetError::Crypto(msg),
            AuthError::NotificationFailed(msg) => SignetError::Notification(msg),
            other => SignetError::AuthenticationFailed {
                reason: other.to_string(),
            },
        }
    }
}
