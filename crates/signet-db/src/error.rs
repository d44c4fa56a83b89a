//! Database-specific error types and conversions.

use signet_core::error::SignetError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Record already exists: {entity}")]
    Duplicate { entity: String },
}

impl From<DbError> for SignetError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => SignetError::NotFound { entity, id },
            DbError::Duplicate { entity } => SignetError::AlreadyExists { entity },
            other => SignetError::Database(other.to_string()),
        }
    }
}
