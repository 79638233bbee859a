//! JSON REST handlers for animals.

use axum::Json;
use axum::body::{Body, Bytes};
use axum::extract::{FromRequest, Path, Request, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use minizoo_app::ports::AnimalRepository;
use minizoo_domain::animal::{Animal, AnimalFields, Collection, StoredAnimal};
use minizoo_domain::id::AnimalId;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body carrying animal fields.
///
/// A request without a `Content-Type` header, or with a blank body, carries
/// no fields. Anything else goes through the regular JSON extractor and its
/// rejections.
pub struct FieldsBody(pub AnimalFields);

impl<S> FromRequest<S> for FieldsBody
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !req.headers().contains_key(header::CONTENT_TYPE) {
            return Ok(Self(AnimalFields::default()));
        }

        let (parts, body) = req.into_parts();
        let bytes = Bytes::from_request(Request::from_parts(parts.clone(), body), state)
            .await
            .map_err(IntoResponse::into_response)?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(AnimalFields::default()));
        }

        let req = Request::from_parts(parts, Body::from(bytes));
        let Json(fields) = Json::<AnimalFields>::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;
        Ok(Self(fields))
    }
}

/// Body of the list endpoint.
#[derive(Serialize)]
pub struct ListBody {
    pub total: usize,
    pub data: Collection,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<ListBody>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get and update endpoints.
pub enum GetResponse {
    Ok(Json<Animal>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<StoredAnimal>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `GET /api/animals`
pub async fn list<R>(State(state): State<AppState<R>>) -> Result<ListResponse, ApiError>
where
    R: AnimalRepository + Send + Sync + 'static,
{
    let data = state.animal_service.find_all().await?;
    Ok(ListResponse::Ok(Json(ListBody {
        total: data.len(),
        data,
    })))
}

/// `GET /api/animals/{id}`
pub async fn get<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    R: AnimalRepository + Send + Sync + 'static,
{
    let animal = state.animal_service.find_by_id(AnimalId::from(id)).await?;
    Ok(GetResponse::Ok(Json(animal)))
}

/// `POST /api/animals`
pub async fn create<R>(
    State(state): State<AppState<R>>,
    FieldsBody(fields): FieldsBody,
) -> Result<CreateResponse, ApiError>
where
    R: AnimalRepository + Send + Sync + 'static,
{
    let created = state.animal_service.create(fields).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PATCH /api/animals/{id}`
pub async fn update<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    FieldsBody(fields): FieldsBody,
) -> Result<GetResponse, ApiError>
where
    R: AnimalRepository + Send + Sync + 'static,
{
    let updated = state
        .animal_service
        .update(fields, AnimalId::from(id))
        .await?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `DELETE /api/animals/{id}`
pub async fn delete<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    R: AnimalRepository + Send + Sync + 'static,
{
    state.animal_service.destroy(AnimalId::from(id)).await?;
    Ok(DeleteResponse::NoContent)
}
