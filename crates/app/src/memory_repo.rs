//! In-process [`AnimalRepository`] backed by a mutex-guarded map.
//!
//! Nothing survives a restart. Useful for tests, demos and the `memory`
//! storage backend.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use minizoo_domain::animal::{Animal, Collection};
use minizoo_domain::error::MiniZooError;
use minizoo_domain::id::AnimalId;

use crate::ports::AnimalRepository;

/// Volatile animal repository.
#[derive(Debug, Default)]
pub struct InMemoryAnimalRepository {
    store: Mutex<Collection>,
}

impl InMemoryAnimalRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing collection.
    #[must_use]
    pub fn with_collection(collection: Collection) -> Self {
        Self {
            store: Mutex::new(collection),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Collection> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AnimalRepository for InMemoryAnimalRepository {
    fn get_all(&self) -> impl Future<Output = Result<Collection, MiniZooError>> + Send {
        let result = self.lock().clone();
        async { Ok(result) }
    }

    fn get_by_id(
        &self,
        id: AnimalId,
    ) -> impl Future<Output = Result<Option<Animal>, MiniZooError>> + Send {
        let result = self.lock().get(&id).cloned();
        async { Ok(result) }
    }

    fn create(
        &self,
        id: AnimalId,
        animal: Animal,
    ) -> impl Future<Output = Result<bool, MiniZooError>> + Send {
        let mut store = self.lock();
        let inserted = if store.contains_key(&id) {
            false
        } else {
            store.insert(id, animal);
            true
        };
        async move { Ok(inserted) }
    }

    fn update<F>(
        &self,
        id: AnimalId,
        change: F,
    ) -> impl Future<Output = Result<Option<Animal>, MiniZooError>> + Send
    where
        F: FnOnce(Animal) -> Animal + Send + 'static,
    {
        let mut store = self.lock();
        let result = store.get_mut(&id).map(|slot| {
            let updated = change(slot.clone());
            slot.clone_from(&updated);
            updated
        });
        async { Ok(result) }
    }

    fn delete(&self, id: AnimalId) -> impl Future<Output = Result<bool, MiniZooError>> + Send {
        let removed = self.lock().shift_remove(&id).is_some();
        async move { Ok(removed) }
    }
}
