//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod animals;

use axum::Router;
use axum::routing::{MethodRouter, get};

use minizoo_app::ports::AnimalRepository;

use crate::state::AppState;

/// Build the `/api` sub-router.
///
/// Every path is also served with a trailing slash.
pub fn routes<R>() -> Router<AppState<R>>
where
    R: AnimalRepository + Send + Sync + 'static,
{
    let collection = || -> MethodRouter<AppState<R>> {
        get(animals::list::<R>).post(animals::create::<R>)
    };
    let record = || -> MethodRouter<AppState<R>> {
        get(animals::get::<R>)
            .patch(animals::update::<R>)
            .delete(animals::delete::<R>)
    };

    Router::new()
        .route("/animals", collection())
        .route("/animals/", collection())
        .route("/animals/{id}", record())
        .route("/animals/{id}/", record())
}
