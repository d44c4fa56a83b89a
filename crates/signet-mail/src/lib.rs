//! SIGNET Mail — SMTP delivery of verification codes.
//!
//! Implements the [`Notifier`](signet_core::notify::Notifier) trait
//! with a lettre-based SMTP relay transport.

mod error;
mod smtp;
mod template;

pub use error::MailError;
pub use smtp::{SmtpConfig, SmtpNotifier};
