//! SIGNET Server — application entry point.

use std::env;
use std::fs;

use anyhow::Context;
use signet_auth::{AuthConfig, AuthService};
use signet_db::{DbConfig, DbManager, SurrealAccountRepository};
use signet_mail::{SmtpConfig, SmtpNotifier};
use tracing_subscriber::EnvFilter;

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn db_config_from_env() -> DbConfig {
    let defaults = DbConfig::default();
    DbConfig {
        url: env_or("SIGNET_DB_URL", &defaults.url),
        namespace: env_or("SIGNET_DB_NAMESPACE", &defaults.namespace),
        database: env_or("SIGNET_DB_DATABASE", &defaults.database),
        username: env_or("SIGNET_DB_USERNAME", &defaults.username),
        password: env_or("SIGNET_DB_PASSWORD", &defaults.password),
    }
}

fn smtp_config_from_env() -> SmtpConfig {
    let defaults = SmtpConfig::default();
    SmtpConfig {
        host: env_or("SIGNET_SMTP_HOST", &defaults.host),
        port: env_or("SIGNET_SMTP_PORT", &defaults.port.to_string())
            .parse()
            .unwrap_or(defaults.port),
        username: env_or("SIGNET_SMTP_USERNAME", &defaults.username),
        password: env_or("SIGNET_SMTP_PASSWORD", &defaults.password),
        from: env_or("SIGNET_SMTP_FROM", &defaults.from),
        code_ttl_minutes: defaults.code_ttl_minutes,
    }
}

fn auth_config_from_env() -> anyhow::Result<AuthConfig> {
    let private_key_path = env::var("SIGNET_JWT_PRIVATE_KEY_FILE")
        .context("SIGNET_JWT_PRIVATE_KEY_FILE must point at an Ed25519 private key PEM")?;
    let public_key_path = env::var("SIGNET_JWT_PUBLIC_KEY_FILE")
        .context("SIGNET_JWT_PUBLIC_KEY_FILE must point at an Ed25519 public key PEM")?;

    Ok(AuthConfig {
        jwt_private_key_pem: fs::read_to_string(&private_key_path)
            .with_context(|| format!("reading {private_key_path}"))?,
        jwt_public_key_pem: fs::read_to_string(&public_key_path)
            .with_context(|| format!("reading {public_key_path}"))?,
        jwt_issuer: env_or("SIGNET_JWT_ISSUER", "signet"),
        pepper: env::var("SIGNET_PASSWORD_PEPPER").ok(),
        ..AuthConfig::default()
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting SIGNET server...");

    let db = DbManager::connect(&db_config_from_env()).await?;
    signet_db::run_migrations(db.client()).await?;

    let accounts = SurrealAccountRepository::new(db.client().clone());
    let notifier = SmtpNotifier::new(&smtp_config_from_env())?;
    let _service = AuthService::new(accounts, notifier, auth_config_from_env()?);

    tracing::info!("SIGNET core initialized");

    // TODO: mount the HTTP boundary layer on top of AuthService

    tracing::info!("SIGNET server stopped.");
    Ok(())
}
