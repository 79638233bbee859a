//! Storage port: repository trait for the animal collection.

use std::future::Future;

use minizoo_domain::animal::{Animal, Collection};
use minizoo_domain::error::MiniZooError;
use minizoo_domain::id::AnimalId;

/// Repository for persisting and querying [`Animal`]s.
///
/// Implementations must make [`update`](Self::update) atomic with respect to
/// other writers going through the same repository instance.
pub trait AnimalRepository {
    /// Get every stored animal, keyed by identifier.
    fn get_all(&self) -> impl Future<Output = Result<Collection, MiniZooError>> + Send;

    /// Get an animal by its identifier.
    fn get_by_id(
        &self,
        id: AnimalId,
    ) -> impl Future<Output = Result<Option<Animal>, MiniZooError>> + Send;

    /// Store a new animal under `id`.
    ///
    /// Returns `false`, without writing, when `id` is already taken.
    fn create(
        &self,
        id: AnimalId,
        animal: Animal,
    ) -> impl Future<Output = Result<bool, MiniZooError>> + Send;

    /// Replace the animal stored under `id` with `change(current)`.
    ///
    /// Returns the stored result, or `None` (nothing written) when `id` is absent.
    fn update<F>(
        &self,
        id: AnimalId,
        change: F,
    ) -> impl Future<Output = Result<Option<Animal>, MiniZooError>> + Send
    where
        F: FnOnce(Animal) -> Animal + Send + 'static;

    /// Remove the animal stored under `id`.
    ///
    /// Returns whether a record was removed.
    fn delete(&self, id: AnimalId) -> impl Future<Output = Result<bool, MiniZooError>> + Send;
}
