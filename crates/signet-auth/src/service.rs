//! Authentication coordination — signup, login, verification, and
//! resend as single operations from the caller's point of view.

use signet_core::error::SignetError;
use signet_core::models::account::{Account, CreateAccount, UpdateAccount};
use signet_core::notify::Notifier;
use signet_core::repository::AccountRepository;
use tracing::info;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::lifecycle::VerificationLifecycle;
use crate::password;
use crate::token;

/// Input for the signup flow.
#[derive(Debug)]
pub struct SignupInput {
    pub display_name: String,
    pub email: String,
    pub password: String,
}

/// Input for the login flow.
#[derive(Debug)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Authentication service.
///
/// Generic over the repository and notifier implementations so this
/// crate has no dependency on the database or mail crates.
pub struct AuthService<R: AccountRepository, N: Notifier> {
    accounts: R,
    lifecycle: VerificationLifecycle<N>,
    config: AuthConfig,
}

fn lookup_err(err: SignetError) -> AuthError {
    match err {
        SignetError::NotFound { .. } => AuthError::AccountNotFound,
        other => AuthError::Store(other),
    }
}

impl<R: AccountRepository, N: Notifier> AuthService<R, N> {
    pub fn new(accounts: R, notifier: N, config: AuthConfig) -> Self {
        let lifecycle = VerificationLifecycle::new(notifier, config.verification_code_ttl_secs);
        Self {
            accounts,
            lifecycle,
            config,
        }
    }

    /// Register a new account and send its holder a verification code.
    pub async fn signup(&self, input: SignupInput) -> Result<Account, AuthError> {
        // 1. Reject taken identities up front so no code is emailed
        //    for an address that already has an account.
        match self.accounts.get_by_email(&input.email).await {
            Ok(_) => return Err(AuthError::DuplicateIdentity),
            Err(SignetError::NotFound { .. }) => {}
            Err(e) => return Err(AuthError::Store(e)),
        }

        // 2. Hash the credential.
        let password_hash =
            password::hash_password(&input.password, self.config.pepper.as_deref())?;

        // 3. Notify first, persist after: a failed delivery leaves no
        //    account behind.
        let verification = self
            .lifecycle
            .issue(&input.email, &input.display_name)
            .await?;

        // 4. Persist. The unique email index backstops a concurrent
        //    signup that slipped past step 1.
        let account = self
            .accounts
            .create(CreateAccount {
                display_name: input.display_name,
                email: input.email,
                password_hash,
                verification,
            })
            .await
            .map_err(|e| match e {
                SignetError::AlreadyExists { .. } => AuthError::DuplicateIdentity,
                other => AuthError::Store(other),
            })?;

        info!(email = %account.email, "account registered");
        Ok(account)
    }

    /// Authenticate a verified account with email + password.
    ///
    /// Token issuance is the boundary layer's next step, via
    /// [`token::issue_access_token`].
    pub async fn authenticate(&self, input: LoginInput) -> Result<Account, AuthError> {
        let account = self
            .accounts
            .get_by_email(&input.email)
            .await
            .map_err(lookup_err)?;

        // The verified gate comes before the credential check so an
        // unverified caller is told to verify instead of seeing a
        // generic failure.
        if !account.verified {
            return Err(AuthError::AccountUnverified);
        }

        let valid = password::verify_password(
            &input.password,
            &account.password_hash,
            self.config.pepper.as_deref(),
        )?;
        if !valid {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(account)
    }

    /// Confirm ownership of an account's email address with a supplied
    /// one-time code.
    pub async fn verify_account(
        &self,
        email: &str,
        supplied_code: &str,
    ) -> Result<Account, AuthError> {
        let account = self
            .accounts
            .get_by_email(email)
            .await
            .map_err(lookup_err)?;

        let updated = self.lifecycle.verify(&account, supplied_code)?;

        let account = self
            .accounts
            .update(
                updated.id,
                UpdateAccount {
                    verified: Some(true),
                    verification: Some(None),
                },
            )
            .await?;

        info!(email = %account.email, "account verified");
        Ok(account)
    }

    /// Replace a still-unverified account's pending code and notify
    /// its holder again.
    pub async fn resend_verification(&self, email: &str) -> Result<Account, AuthError> {
        let account = self
            .accounts
            .get_by_email(email)
            .await
            .map_err(lookup_err)?;

        let verification = self.lifecycle.resend(&account).await?;

        let account = self
            .accounts
            .update(
                account.id,
                UpdateAccount {
                    verified: None,
                    verification: Some(Some(verification)),
                },
            )
            .await?;

        info!(email = %account.email, "verification code reissued");
        Ok(account)
    }

    /// Resolve a bearer token back to its account.
    ///
    /// Validates signature, expiry, and issuer, then loads the account
    /// named by the `sub` claim.
    pub async fn account_for_token(&self, access_token: &str) -> Result<Account, AuthError> {
        let claims = token::validate_access_token(access_token, &self.config)?;
        let id = Uuid::parse_str(&claims.0.sub)
            .map_err(|e| AuthError::TokenInvalid(format!("malformed subject: {e}")))?;
        self.accounts.get_by_id(id).await.map_err(lookup_err)
    }
}
