//! JSON document implementation of [`AnimalRepository`].

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::sync::Mutex;

use minizoo_app::ports::AnimalRepository;
use minizoo_domain::animal::{Animal, Collection};
use minizoo_domain::error::MiniZooError;
use minizoo_domain::id::AnimalId;

use crate::error::StorageError;

/// Animal repository stored as a single JSON object on disk.
///
/// The document maps identifiers to records and is rewritten wholesale on
/// every mutation. Mutations are serialized through an async mutex held for
/// the whole read-modify-write cycle.
pub struct JsonFileAnimalRepository {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileAnimalRepository {
    /// Open the document at `path`, creating it (and its parent directories)
    /// as an empty collection when it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directories or the file cannot be
    /// created.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|err| StorageError::io(parent, err))?;
        }

        let repo = Self {
            path,
            write_lock: Mutex::new(()),
        };

        let exists = fs::try_exists(&repo.path)
            .await
            .map_err(|err| StorageError::io(&repo.path, err))?;
        if !exists {
            repo.write(&Collection::new()).await?;
            tracing::info!(path = %repo.path.display(), "created empty animal document");
        }

        Ok(repo)
    }

    /// Location of the backing document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Collection, StorageError> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|err| StorageError::json(&self.path, err))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Collection::new()),
            Err(err) => Err(StorageError::io(&self.path, err)),
        }
    }

    async fn write(&self, collection: &Collection) -> Result<(), StorageError> {
        let content =
            serde_json::to_string_pretty(collection).map_err(|err| StorageError::json(&self.path, err))?;

        let tmp = temp_path(&self.path);
        fs::write(&tmp, content)
            .await
            .map_err(|err| StorageError::io(&tmp, err))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|err| StorageError::io(&self.path, err))?;

        tracing::trace!(path = %self.path.display(), records = collection.len(), "document written");
        Ok(())
    }
}

/// Sibling path used to stage a write before renaming it over the document.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(|| OsString::from("database.json"), OsString::from);
    name.push(".tmp");
    path.with_file_name(name)
}

impl AnimalRepository for JsonFileAnimalRepository {
    async fn get_all(&self) -> Result<Collection, MiniZooError> {
        Ok(self.read().await?)
    }

    async fn get_by_id(&self, id: AnimalId) -> Result<Option<Animal>, MiniZooError> {
        let mut collection = self.read().await?;
        Ok(collection.swap_remove(&id))
    }

    async fn create(&self, id: AnimalId, animal: Animal) -> Result<bool, MiniZooError> {
        let _guard = self.write_lock.lock().await;

        let mut collection = self.read().await?;
        if collection.contains_key(&id) {
            return Ok(false);
        }
        collection.insert(id, animal);
        self.write(&collection).await?;

        Ok(true)
    }

    async fn update<F>(&self, id: AnimalId, change: F) -> Result<Option<Animal>, MiniZooError>
    where
        F: FnOnce(Animal) -> Animal + Send + 'static,
    {
        let _guard = self.write_lock.lock().await;

        let mut collection = self.read().await?;
        let Some(slot) = collection.get_mut(&id) else {
            return Ok(None);
        };
        let updated = change(slot.clone());
        slot.clone_from(&updated);
        self.write(&collection).await?;

        Ok(Some(updated))
    }

    async fn delete(&self, id: AnimalId) -> Result<bool, MiniZooError> {
        let _guard = self.write_lock.lock().await;

        let mut collection = self.read().await?;
        if collection.shift_remove(&id).is_none() {
            return Ok(false);
        }
        self.write(&collection).await?;

        Ok(true)
    }
}
