//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use minizoo_domain::error::MiniZooError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`MiniZooError`] to an HTTP response with appropriate status code.
pub struct ApiError(MiniZooError);

impl From<MiniZooError> for ApiError {
    fn from(err: MiniZooError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            MiniZooError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            MiniZooError::IdCollision(err) => {
                tracing::error!(error = %err, "id generation exhausted");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            MiniZooError::Storage(err) => {
                tracing::error!(error = ?err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
