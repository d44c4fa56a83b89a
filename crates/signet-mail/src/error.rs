//! Mail delivery error types and conversions.

use signet_core::error::SignetError;
use thiserror::Error;

/// Mail-layer error type.
#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

impl From<MailError> for SignetError {
    fn from(err: MailError) -> Self {
        SignetError::Notification(err.to_string())
    }
}
