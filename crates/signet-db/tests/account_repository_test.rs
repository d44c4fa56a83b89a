//! Integration tests for the Account repository using in-memory
//! SurrealDB.

use chrono::{Duration, Utc};
use signet_core::error::SignetError;
use signet_core::models::account::{CreateAccount, PendingVerification, UpdateAccount};
use signet_core::repository::{AccountRepository, Pagination};
use signet_db::SurrealAccountRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

/// Helper: spin up in-memory DB and run migrations.
async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    signet_db::run_migrations(&db).await.unwrap();
    db
}

fn pending(code: &str) -> PendingVerification {
    PendingVerification {
        code: code.into(),
        expires_at: Utc::now() + Duration::minutes(60),
    }
}

fn alice(code: &str) -> CreateAccount {
    CreateAccount {
        display_name: "Alice".into(),
        email: "alice@example.com".into(),
        password_hash: "$argon2id$test-hash".into(),
        verification: pending(code),
    }
}

#[tokio::test]
async fn create_and_get_account() {
    let db = setup().await;
    let repo = SurrealAccountRepository::new(db);

    let account = repo.create(alice("123456")).await.unwrap();

    assert_eq!(account.display_name, "Alice");
    assert_eq!(account.email, "alice@example.com");
    assert_eq!(account.password_hash, "$argon2id$test-hash");
    assert!(!account.verified);

    let stored = account.verification.expect("pair must be present");
    assert_eq!(stored.code, "123456");
    assert!(stored.expires_at > Utc::now());

    // Get by ID should return the same account.
    let fetched = repo.get_by_id(account.id).await.unwrap();
    assert_eq!(fetched.id, account.id);
    assert_eq!(fetched.email, "alice@example.com");
}

#[tokio::test]
async fn get_by_email() {
    let db = setup().await;
    let repo = SurrealAccountRepository::new(db);

    let created = repo.create(alice("123456")).await.unwrap();
    let fetched = repo.get_by_email("alice@example.com").await.unwrap();
    assert_eq!(fetched.id, created.id);

    let err = repo.get_by_email("nobody@example.com").await.unwrap_err();
    assert!(matches!(err, SignetError::NotFound { .. }));
}

#[tokio::test]
async fn get_by_verification_code() {
    let db = setup().await;
    let repo = SurrealAccountRepository::new(db);

    let created = repo.create(alice("654321")).await.unwrap();

    let fetched = repo.get_by_verification_code("654321").await.unwrap();
    assert_eq!(fetched.id, created.id);

    let err = repo.get_by_verification_code("000000").await.unwrap_err();
    assert!(matches!(err, SignetError::NotFound { .. }));
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let db = setup().await;
    let repo = SurrealAccountRepository::new(db);

    repo.create(alice("123456")).await.unwrap();

    let err = repo
        .create(CreateAccount {
            display_name: "Imposter".into(),
            email: "alice@example.com".into(),
            password_hash: "$argon2id$other-hash".into(),
            verification: pending("999999"),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, SignetError::AlreadyExists { .. }));
}

#[tokio::test]
async fn update_clears_the_pair_on_verification() {
    let db = setup().await;
    let repo = SurrealAccountRepository::new(db);

    let account = repo.create(alice("123456")).await.unwrap();

    let updated = repo
        .update(
            account.id,
            UpdateAccount {
                verified: Some(true),
                verification: Some(None),
            },
        )
        .await
        .unwrap();

    assert!(updated.verified);
    assert!(updated.verification.is_none());
    assert!(updated.updated_at >= account.updated_at);

    // The consumed code no longer resolves.
    let err = repo.get_by_verification_code("123456").await.unwrap_err();
    assert!(matches!(err, SignetError::NotFound { .. }));
}

#[tokio::test]
async fn update_replaces_the_pair_on_resend() {
    let db = setup().await;
    let repo = SurrealAccountRepository::new(db);

    let account = repo.create(alice("123456")).await.unwrap();
    let old_expiry = account.verification.as_ref().unwrap().expires_at;

    let replacement = PendingVerification {
        code: "777777".into(),
        expires_at: old_expiry + Duration::minutes(10),
    };
    let updated = repo
        .update(
            account.id,
            UpdateAccount {
                verified: None,
                verification: Some(Some(replacement)),
            },
        )
        .await
        .unwrap();

    assert!(!updated.verified);
    let stored = updated.verification.unwrap();
    assert_eq!(stored.code, "777777");
    assert!(stored.expires_at > old_expiry);
}

#[tokio::test]
async fn half_set_pair_is_rejected_on_read() {
    let db = setup().await;
    let repo = SurrealAccountRepository::new(db.clone());

    let account = repo.create(alice("123456")).await.unwrap();

    // Corrupt the row behind the repository's back: clear the expiry
    // but leave the code in place.
    db.query("UPDATE type::record('account', $id) SET verification_expires_at = NONE")
        .bind(("id", account.id.to_string()))
        .await
        .unwrap()
        .check()
        .unwrap();

    let err = repo.get_by_id(account.id).await.unwrap_err();
    assert!(matches!(err, SignetError::Database(_)));
}

#[tokio::test]
async fn list_accounts() {
    let db = setup().await;
    let repo = SurrealAccountRepository::new(db);

    for i in 0..3 {
        repo.create(CreateAccount {
            display_name: format!("User {i}"),
            email: format!("user{i}@example.com"),
            password_hash: "$argon2id$test-hash".into(),
            verification: pending(&format!("{i:06}")),
        })
        .await
        .unwrap();
    }

    let page = repo
        .list(Pagination {
            offset: 0,
            limit: 2,
        })
        .await
        .unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.items.len(), 2);

    let rest = repo
        .list(Pagination {
            offset: 2,
            limit: 2,
        })
        .await
        .unwrap();
    assert_eq!(rest.items.len(), 1);
}
