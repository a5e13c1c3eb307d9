//! Database-specific error types and conversions.

use orgtree_core::error::OrgTreeError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Invalid stored record: {0}")]
    Decode(String),

    #[error("Record not found: org_node with id {id}")]
    NotFound { id: i64 },
}

impl From<DbError> for OrgTreeError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { id } => OrgTreeError::NotFound { id },
            other => OrgTreeError::StoreUnavailable(other.to_string()),
        }
    }
}
