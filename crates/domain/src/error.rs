//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`MiniZooError`] via `From`.

/// Base error type returned by application services and repositories.
#[derive(Debug, thiserror::Error)]
pub enum MiniZooError {
    /// The requested record does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// Identifier generation kept colliding with existing records.
    #[error(transparent)]
    IdCollision(#[from] IdCollisionError),

    /// A storage backend failed (IO, decoding, SQL, …).
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A lookup by identifier found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("The record {id} couldn't be found.")]
pub struct NotFoundError {
    /// The identifier that was looked up, as received.
    pub id: String,
}

/// Every generated identifier was already taken.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("could not generate a free identifier after {attempts} attempts")]
pub struct IdCollisionError {
    pub attempts: usize,
}
