//! Storage-specific error type wrapping sqlx errors.

use minizoo_domain::error::MiniZooError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to encode or decode the stored fields document.
    #[error("JSON fields error")]
    Json(#[from] serde_json::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StorageError> for MiniZooError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
