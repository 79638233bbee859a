//! `SQLite` implementation of [`AnimalRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use minizoo_app::ports::AnimalRepository;
use minizoo_domain::animal::{Animal, AnimalFields, Collection};
use minizoo_domain::error::MiniZooError;
use minizoo_domain::id::AnimalId;
use minizoo_domain::time;

use crate::error::StorageError;

/// Wrapper for converting database rows into a keyed domain [`Animal`].
struct Wrapper(AnimalId, Animal);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let fields: String = row.try_get("fields")?;
        let created_at: String = row.try_get("created_at")?;
        let updated_at: String = row.try_get("updated_at")?;

        let fields: AnimalFields =
            serde_json::from_str(&fields).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let created_at =
            time::parse(&created_at).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let updated_at =
            time::parse(&updated_at).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(
            AnimalId::from(id),
            Animal {
                fields,
                created_at,
                updated_at,
            },
        ))
    }
}

const INSERT: &str =
    "INSERT OR IGNORE INTO animals (id, fields, created_at, updated_at) VALUES (?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM animals WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM animals ORDER BY rowid";
const UPDATE: &str = "UPDATE animals SET fields = ?, created_at = ?, updated_at = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM animals WHERE id = ?";

/// `SQLite`-backed animal repository.
pub struct SqliteAnimalRepository {
    pool: SqlitePool,
}

impl SqliteAnimalRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl AnimalRepository for SqliteAnimalRepository {
    fn get_all(&self) -> impl Future<Output = Result<Collection, MiniZooError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| (w.0, w.1)).collect())
        }
    }

    fn get_by_id(
        &self,
        id: AnimalId,
    ) -> impl Future<Output = Result<Option<Animal>, MiniZooError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.as_str())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|w| w.1))
        }
    }

    fn create(
        &self,
        id: AnimalId,
        animal: Animal,
    ) -> impl Future<Output = Result<bool, MiniZooError>> + Send {
        let pool = self.pool.clone();
        async move {
            let fields = serde_json::to_string(&animal.fields).map_err(StorageError::from)?;
            let result = sqlx::query(INSERT)
                .bind(id.as_str())
                .bind(fields)
                .bind(time::format(&animal.created_at))
                .bind(time::format(&animal.updated_at))
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(result.rows_affected() == 1)
        }
    }

    fn update<F>(
        &self,
        id: AnimalId,
        change: F,
    ) -> impl Future<Output = Result<Option<Animal>, MiniZooError>> + Send
    where
        F: FnOnce(Animal) -> Animal + Send + 'static,
    {
        let pool = self.pool.clone();
        async move {
            let mut tx = pool.begin().await.map_err(StorageError::from)?;

            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.as_str())
                .fetch_optional(&mut *tx)
                .await
                .map_err(StorageError::from)?;
            let Some(Wrapper(_, current)) = row else {
                return Ok(None);
            };

            let updated = change(current);
            let fields = serde_json::to_string(&updated.fields).map_err(StorageError::from)?;
            sqlx::query(UPDATE)
                .bind(fields)
                .bind(time::format(&updated.created_at))
                .bind(time::format(&updated.updated_at))
                .bind(id.as_str())
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;

            tx.commit().await.map_err(StorageError::from)?;
            Ok(Some(updated))
        }
    }

    fn delete(&self, id: AnimalId) -> impl Future<Output = Result<bool, MiniZooError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.as_str())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(result.rows_affected() > 0)
        }
    }
}
