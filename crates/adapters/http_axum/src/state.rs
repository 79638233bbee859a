//! Shared application state for axum handlers.

use std::sync::Arc;

use minizoo_app::ports::AnimalRepository;
use minizoo_app::services::animal_service::AnimalService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository type to avoid dynamic dispatch.
/// `Clone` is implemented manually so the repository itself does not
/// need to be `Clone`: only the `Arc` wrapper is cloned.
pub struct AppState<R> {
    /// Animal CRUD service.
    pub animal_service: Arc<AnimalService<R>>,
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            animal_service: Arc::clone(&self.animal_service),
        }
    }
}

impl<R> AppState<R>
where
    R: AnimalRepository + Send + Sync + 'static,
{
    /// Create a new application state from a service instance.
    pub fn new(animal_service: AnimalService<R>) -> Self {
        Self::from_arc(Arc::new(animal_service))
    }

    /// Create a new application state from a pre-wrapped `Arc` service.
    pub fn from_arc(animal_service: Arc<AnimalService<R>>) -> Self {
        Self { animal_service }
    }
}
