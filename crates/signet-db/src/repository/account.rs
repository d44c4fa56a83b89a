//! SurrealDB implementation of
//! [`AccountRepository`](signet_core::repository::AccountRepository).

use chrono::{DateTime, Utc};
use signet_core::error::SignetResult;
use signet_core::models::account::{Account, CreateAccount, PendingVerification, UpdateAccount};
use signet_core::repository::{AccountRepository, PaginatedResult, Pagination};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct AccountRow {
    display_name: String,
    email: String,
    password_hash: String,
    verified: bool,
    verification_code: Option<String>,
    verification_expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct AccountRowWithId {
    record_id: String,
    display_name: String,
    email: String,
    password_hash: String,
    verified: bool,
    verification_code: Option<String>,
    verification_expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Rebuild the code/expiry pair, rejecting rows where only half is set.
fn pending_from_columns(
    code: Option<String>,
    expires_at: Option<DateTime<Utc>>,
) -> Result<Option<PendingVerification>, DbError> {
    match (code, expires_at) {
        (Some(code), Some(expires_at)) => Ok(Some(PendingVerification { code, expires_at })),
        (None, None) => Ok(None),
        _ => Err(DbError::Query(
            "verification code and expiry must be set together".into(),
        )),
    }
}

impl AccountRow {
    fn into_account(self, id: Uuid) -> Result<Account, DbError> {
        let verification =
            pending_from_columns(self.verification_code, self.verification_expires_at)?;
        Ok(Account {
            id,
            display_name: self.display_name,
            email: self.email,
            password_hash: self.password_hash,
            verified: self.verified,
            verification,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl AccountRowWithId {
    fn try_into_account(self) -> Result<Account, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Query(format!("invalid UUID: {e}")))?;
        let verification =
            pending_from_columns(self.verification_code, self.verification_expires_at)?;
        Ok(Account {
            id,
            display_name: self.display_name,
            email: self.email,
            password_hash: self.password_hash,
            verified: self.verified,
            verification,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// SurrealDB implementation of the Account repository.
#[derive(Clone)]
pub struct SurrealAccountRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealAccountRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> AccountRepository for SurrealAccountRepository<C> {
    async fn create(&self, input: CreateAccount) -> SignetResult<Account> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('account', $id) SET \
                 display_name = $display_name, \
                 email = $email, \
                 password_hash = $password_hash, \
                 verified = false, \
                 verification_code = $verification_code, \
                 verification_expires_at = $verification_expires_at",
            )
            .bind(("id", id_str.clone()))
            .bind(("display_name", input.display_name))
            .bind(("email", input.email))
            .bind(("password_hash", input.password_hash))
            .bind(("verification_code", input.verification.code))
            .bind(("verification_expires_at", input.verification.expires_at))
            .await
            .map_err(DbError::from)?;

        // The unique email index rejects duplicate identities here.
        let mut result = result.check().map_err(|e| {
            let msg = e.to_string();
            if msg.contains("idx_account_email") {
                DbError::Duplicate {
                    entity: "account".into(),
                }
            } else {
                DbError::Query(msg)
            }
        })?;

        let rows: Vec<AccountRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "account".into(),
            id: id_str,
        })?;

        Ok(row.into_account(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> SignetResult<Account> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('account', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AccountRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "account".into(),
            id: id_str,
        })?;

        Ok(row.into_account(id)?)
    }

    async fn get_by_email(&self, email: &str) -> SignetResult<Account> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM account \
                 WHERE email = $email",
            )
            .bind(("email", email.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AccountRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "account".into(),
            id: format!("email={email}"),
        })?;

        Ok(row.try_into_account()?)
    }

    async fn get_by_verification_code(&self, code: &str) -> SignetResult<Account> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM account \
                 WHERE verification_code = $code",
            )
            .bind(("code", code.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AccountRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "account".into(),
            id: format!("verification_code={code}"),
        })?;

        Ok(row.try_into_account()?)
    }

    async fn update(&self, id: Uuid, input: UpdateAccount) -> SignetResult<Account> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.verified.is_some() {
            sets.push("verified = $verified");
        }
        if input.verification.is_some() {
            // The pair is always written together.
            sets.push("verification_code = $verification_code");
            sets.push("verification_expires_at = $verification_expires_at");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('account', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(verified) = input.verified {
            builder = builder.bind(("verified", verified));
        }
        if let Some(verification) = input.verification {
            // Some(pending) = set the pair, None = clear the pair.
            let (code, expires_at) = match verification {
                Some(pending) => (Some(pending.code), Some(pending.expires_at)),
                None => (None, None),
            };
            builder = builder
                .bind(("verification_code", code))
                .bind(("verification_expires_at", expires_at));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<AccountRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "account".into(),
            id: id_str,
        })?;

        Ok(row.into_account(id)?)
    }

    async fn list(&self, pagination: Pagination) -> SignetResult<PaginatedResult<Account>> {
        let mut count_result = self
            .db
            .query("SELECT count() AS total FROM account GROUP ALL")
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM account \
                 ORDER BY created_at ASC \
                 LIMIT $limit START $offset",
            )
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AccountRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_account())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}
