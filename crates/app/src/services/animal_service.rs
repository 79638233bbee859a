//! Animal service: use-cases for managing the animal collection.

use minizoo_domain::animal::{Animal, AnimalFields, Collection, StoredAnimal};
use minizoo_domain::error::{IdCollisionError, MiniZooError, NotFoundError};
use minizoo_domain::id::{AnimalId, IdFormat};
use minizoo_domain::time::now;

use crate::ports::AnimalRepository;

/// How many identifiers `create` tries before giving up.
pub const MAX_ID_ATTEMPTS: usize = 8;

/// Application service for animal CRUD operations.
pub struct AnimalService<R> {
    repo: R,
    id_format: IdFormat,
}

impl<R: AnimalRepository> AnimalService<R> {
    /// Create a new service backed by the given repository, generating UUIDs.
    pub fn new(repo: R) -> Self {
        Self::with_id_format(repo, IdFormat::default())
    }

    /// Create a new service generating identifiers in `id_format`.
    pub fn with_id_format(repo: R, id_format: IdFormat) -> Self {
        Self { repo, id_format }
    }

    /// Return every stored animal.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn find_all(&self) -> Result<Collection, MiniZooError> {
        self.repo.get_all().await
    }

    /// Look up an animal by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`MiniZooError::NotFound`] when no animal with `id` exists,
    /// or a storage error from the repository.
    pub async fn find_by_id(&self, id: AnimalId) -> Result<Animal, MiniZooError> {
        self.repo
            .get_by_id(id.clone())
            .await?
            .ok_or_else(|| not_found(&id))
    }

    /// Store a new animal built from the template and `fields`.
    ///
    /// Both timestamps are set to the same instant. A generated identifier
    /// that is already taken is discarded and a new one drawn.
    ///
    /// # Errors
    ///
    /// Returns [`MiniZooError::IdCollision`] if every attempt collided, or a
    /// storage error from the repository.
    pub async fn create(&self, fields: AnimalFields) -> Result<StoredAnimal, MiniZooError> {
        let animal = Animal::create(fields, now());

        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.id_format.generate();
            if self.repo.create(id.clone(), animal.clone()).await? {
                tracing::debug!(%id, "animal created");
                return Ok(StoredAnimal { id, animal });
            }
            tracing::warn!(%id, "generated animal id already taken, retrying");
        }

        Err(IdCollisionError {
            attempts: MAX_ID_ATTEMPTS,
        }
        .into())
    }

    /// Merge `fields` into the animal stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`MiniZooError::NotFound`] if the animal does not exist,
    /// or a storage error from the repository.
    pub async fn update(&self, fields: AnimalFields, id: AnimalId) -> Result<Animal, MiniZooError> {
        let at = now();
        let updated = self
            .repo
            .update(id.clone(), move |current| current.apply(fields, at))
            .await?
            .ok_or_else(|| not_found(&id))?;
        tracing::debug!(%id, "animal updated");
        Ok(updated)
    }

    /// Remove the animal stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`MiniZooError::NotFound`] if the animal does not exist,
    /// or a storage error from the repository.
    pub async fn destroy(&self, id: AnimalId) -> Result<(), MiniZooError> {
        if self.repo.delete(id.clone()).await? {
            tracing::debug!(%id, "animal destroyed");
            Ok(())
        } else {
            Err(not_found(&id))
        }
    }
}

fn not_found(id: &AnimalId) -> MiniZooError {
    NotFoundError { id: id.to_string() }.into()
}
