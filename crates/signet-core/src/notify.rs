//! Notifier trait for out-of-band code delivery.

use crate::error::SignetResult;

/// Delivers a verification code to the account holder over an
/// out-of-band channel (email).
///
/// A single attempt per call: implementations do not retry, and the
/// core treats any failure as final for the operation in flight.
pub trait Notifier: Send + Sync {
    fn send_verification_code(
        &self,
        email: &str,
        display_name: &str,
        code: &str,
    ) -> impl Future<Output = SignetResult<()>> + Send;
}
