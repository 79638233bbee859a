//! # minizoo-adapter-storage-json-file
//!
//! Persistence adapter keeping the whole animal collection in one
//! pretty-printed JSON document.
//!
//! ## Responsibilities
//! - Implement the repository port trait defined in `minizoo-app::ports::storage`
//! - Read the full document on every operation (no caching)
//! - Rewrite the full document on every mutation, atomically (temp file + rename)
//! - Serialize read-modify-write cycles so concurrent requests of one
//!   process cannot lose each other's updates
//!
//! ## Dependency rule
//! Depends on `minizoo-app` (for port traits) and `minizoo-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod error;
mod store;

pub use error::StorageError;
pub use store::JsonFileAnimalRepository;
