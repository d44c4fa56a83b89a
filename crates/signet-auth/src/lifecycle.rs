//! Account verification lifecycle — code issuance, expiry, and the
//! one-way unverified→verified transition.

use chrono::{Duration, Utc};
use signet_core::models::account::{Account, PendingVerification};
use signet_core::notify::Notifier;

use crate::code;
use crate::error::AuthError;

/// Owns the verification-code policy: how codes are generated, how
/// long they live, and when an account may flip to verified.
///
/// State transitions per account: `Unverified` loops on issuance
/// (each resend replaces the pending code), moves to `Verified` on a
/// matching unexpired code, and `Verified` is terminal.
pub struct VerificationLifecycle<N: Notifier> {
    notifier: N,
    code_ttl_secs: u64,
}

impl<N: Notifier> VerificationLifecycle<N> {
    pub fn new(notifier: N, code_ttl_secs: u64) -> Self {
        Self {
            notifier,
            code_ttl_secs,
        }
    }

    /// Issue a fresh challenge: generate a code, stamp its expiry, and
    /// hand it to the notifier.
    ///
    /// The caller persists the returned pair only after this returns
    /// `Ok`, so a failed delivery never leaves a half-issued account
    /// behind.
    pub async fn issue(
        &self,
        email: &str,
        display_name: &str,
    ) -> Result<PendingVerification, AuthError> {
        let code = code::generate_code();
        let expires_at = Utc::now() + Duration::seconds(self.code_ttl_secs as i64);

        self.notifier
            .send_verification_code(email, display_name, &code)
            .await
            .map_err(|e| AuthError::NotificationFailed(e.to_string()))?;

        Ok(PendingVerification { code, expires_at })
    }

    /// Re-issue a challenge for a still-unverified account,
    /// unconditionally replacing any pending code.
    pub async fn resend(&self, account: &Account) -> Result<PendingVerification, AuthError> {
        if account.verified {
            return Err(AuthError::AlreadyVerified);
        }
        self.issue(&account.email, &account.display_name).await
    }

    /// Check a supplied code against the account's pending challenge.
    ///
    /// Returns an updated snapshot with `verified` set and the pending
    /// pair cleared; the input account is left untouched. Expiry is
    /// checked before the code itself, and the comparison is an exact
    /// string match with no normalization.
    pub fn verify(&self, account: &Account, supplied_code: &str) -> Result<Account, AuthError> {
        // A consumed code is cleared, so a repeat verify lands here.
        let Some(pending) = &account.verification else {
            return Err(AuthError::AlreadyVerified);
        };

        if Utc::now() > pending.expires_at {
            return Err(AuthError::CodeExpired);
        }
        if pending.code != supplied_code {
            return Err(AuthError::CodeMismatch);
        }

        let mut verified = account.clone();
        verified.verified = true;
        verified.verification = None;
        Ok(verified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signet_core::error::{SignetError, SignetResult};
    use uuid::Uuid;

    /// Notifier that accepts everything without sending.
    struct NullNotifier;

    impl Notifier for NullNotifier {
        async fn send_verification_code(
            &self,
            _email: &str,
            _display_name: &str,
            _code: &str,
        ) -> SignetResult<()> {
            Ok(())
        }
    }

    /// Notifier whose every delivery attempt fails.
    struct FailingNotifier;

    impl Notifier for FailingNotifier {
        async fn send_verification_code(
            &self,
            _email: &str,
            _display_name: &str,
            _code: &str,
        ) -> SignetResult<()> {
            Err(SignetError::Notification("relay unreachable".into()))
        }
    }

    fn pending_account(code: &str, expires_in_secs: i64) -> Account {
        let now = Utc::now();
        Account {
            id: Uuid::new_v4(),
            display_name: "Alice".into(),
            email: "alice@example.com".into(),
            password_hash: "$argon2id$stub".into(),
            verified: false,
            verification: Some(PendingVerification {
                code: code.into(),
                expires_at: now + Duration::seconds(expires_in_secs),
            }),
            created_at: now,
            updated_at: now,
        }
    }

    fn verified_account() -> Account {
        let mut account = pending_account("123456", 3600);
        account.verified = true;
        account.verification = None;
        account
    }

    fn lifecycle() -> VerificationLifecycle<NullNotifier> {
        VerificationLifecycle::new(NullNotifier, 3600)
    }

    #[test]
    fn matching_code_flips_state() {
        let account = pending_account("123456", 3600);
        let updated = lifecycle().verify(&account, "123456").unwrap();

        assert!(updated.verified);
        assert!(updated.verification.is_none());
        // Input snapshot is untouched.
        assert!(!account.verified);
        assert!(account.verification.is_some());
    }

    #[test]
    fn wrong_code_is_rejected() {
        let account = pending_account("123456", 3600);
        let err = lifecycle().verify(&account, "000000").unwrap_err();
        assert!(matches!(err, AuthError::CodeMismatch));
    }

    #[test]
    fn expired_code_is_rejected() {
        let account = pending_account("123456", -60);
        let err = lifecycle().verify(&account, "123456").unwrap_err();
        assert!(matches!(err, AuthError::CodeExpired));
    }

    #[test]
    fn expiry_is_checked_before_the_code() {
        // Expired AND wrong: expiry wins.
        let account = pending_account("123456", -60);
        let err = lifecycle().verify(&account, "000000").unwrap_err();
        assert!(matches!(err, AuthError::CodeExpired));
    }

    #[test]
    fn verify_without_pending_challenge() {
        let account = verified_account();
        let err = lifecycle().verify(&account, "123456").unwrap_err();
        assert!(matches!(err, AuthError::AlreadyVerified));
    }

    #[tokio::test]
    async fn issue_stamps_expiry_from_ttl() {
        let before = Utc::now();
        let pending = lifecycle().issue("alice@example.com", "Alice").await.unwrap();

        assert_eq!(pending.code.len(), 6);
        assert!(pending.expires_at > before + Duration::seconds(3500));
        assert!(pending.expires_at <= Utc::now() + Duration::seconds(3600));
    }

    #[tokio::test]
    async fn issue_surfaces_notifier_failure() {
        let lifecycle = VerificationLifecycle::new(FailingNotifier, 3600);
        let err = lifecycle.issue("alice@example.com", "Alice").await.unwrap_err();
        assert!(matches!(err, AuthError::NotificationFailed(_)));
    }

    #[tokio::test]
    async fn resend_on_verified_account_is_rejected() {
        let account = verified_account();
        let err = lifecycle().resend(&account).await.unwrap_err();
        assert!(matches!(err, AuthError::AlreadyVerified));
    }

    #[tokio::test]
    async fn resend_issues_a_fresh_pair() {
        let account = pending_account("123456", 60);
        let pending = lifecycle().resend(&account).await.unwrap();
        let old = account.verification.unwrap();
        assert!(pending.expires_at > old.expires_at);
    }
}
