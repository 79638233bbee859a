//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use minizoo_app::ports::AnimalRepository;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests API routes under `/api` and exposes `/health`.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<R>(state: AppState<R>) -> Router
where
    R: AnimalRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use std::future::Future;

    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use minizoo_app::memory_repo::InMemoryAnimalRepository;
    use minizoo_app::services::animal_service::AnimalService;
    use minizoo_domain::animal::{Animal, Collection};
    use minizoo_domain::error::MiniZooError;
    use minizoo_domain::id::AnimalId;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn seed() -> Value {
        json!({
            "ANI1580214599567RD121": {
                "created_at": "2020-01-28T12:29:59.567Z",
                "updated_at": "2020-01-28T12:29:59.567Z",
                "pet_name": "Belchior Fernandes Montalvão",
                "description": "Gatinho mais fofinho desse mundo",
                "animal_type": "Gato",
                "pet_age": "6 Meses",
                "sex": "Macho",
                "color": "Branco Malhado",
                "image_url": ""
            },
            "ANI1580216220549RD493": {
                "created_at": "2020-01-28T12:57:00.550Z",
                "updated_at": "2020-01-28T12:57:00.550Z",
                "pet_name": "Tereza Fernandes Montalvão",
                "description": "Gatinha mais perfeita desse mundão redondo",
                "animal_type": "Gato",
                "pet_age": "6 Meses",
                "sex": "Fêmea",
                "color": "Malhada",
                "image_url": ""
            }
        })
    }

    fn app() -> Router {
        let collection: Collection = serde_json::from_value(seed()).unwrap();
        let repo = InMemoryAnimalRepository::with_collection(collection);
        build(AppState::new(AnimalService::new(repo)))
    }

    fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder().method(method).uri(uri);
        match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    fn json_request(method: &str, uri: &str, body: &'static str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    async fn send_json(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let (status, bytes) = send(app, req).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let (status, body) = send(&app(), request("GET", "/health", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"OK");
    }

    #[tokio::test]
    async fn should_list_total_and_data() {
        let (status, body) = send_json(&app(), request("GET", "/api/animals", None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "total": 2, "data": seed() }));
    }

    #[tokio::test]
    async fn should_return_stored_record_by_id() {
        let (status, body) = send_json(
            &app(),
            request("GET", "/api/animals/ANI1580214599567RD121", None),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, seed()["ANI1580214599567RD121"]);
    }

    #[tokio::test]
    async fn should_return_not_found_body_for_unknown_id() {
        let (status, body) = send_json(
            &app(),
            request("GET", "/api/animals/ANI1580214599567RD121_makeError", None),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({ "error": "The record ANI1580214599567RD121_makeError couldn't be found." })
        );
    }

    #[tokio::test]
    async fn should_create_record_with_equal_timestamps() {
        let app = app();
        let (status, body) = send_json(
            &app,
            request(
                "POST",
                "/api/animals",
                Some(json!({ "pet_name": "Rex", "animal_type": "Dog" })),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["pet_name"], "Rex");
        assert_eq!(body["animal_type"], "Dog");
        assert_eq!(body["description"], "");
        assert!(body["created_at"].is_string());
        assert_eq!(body["created_at"], body["updated_at"]);

        let id = body["id"].as_str().unwrap();
        let (status, stored) = send_json(&app, request("GET", &format!("/api/animals/{id}"), None)).await;
        assert_eq!(status, StatusCode::OK);
        let mut expected = body.clone();
        expected.as_object_mut().unwrap().remove("id");
        assert_eq!(stored, expected);

        let (_, list) = send_json(&app, request("GET", "/api/animals", None)).await;
        assert_eq!(list["total"], 3);
    }

    #[tokio::test]
    async fn should_create_template_record_when_body_missing() {
        let (status, body) = send_json(&app(), request("POST", "/api/animals", None)).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["pet_name"], "");
        assert_eq!(body["image_url"], "");
    }

    #[tokio::test]
    async fn should_create_template_record_when_json_body_is_empty() {
        let app = app();
        for body in ["", "  \n"] {
            let (status, created) =
                send_json(&app, json_request("POST", "/api/animals", body)).await;

            assert_eq!(status, StatusCode::CREATED);
            assert_eq!(created["pet_name"], "");
            assert_eq!(created["created_at"], created["updated_at"]);
        }
    }

    #[tokio::test]
    async fn should_return_not_found_when_patching_unknown_id_with_empty_json_body() {
        let (status, body) = send_json(
            &app(),
            json_request("PATCH", "/api/animals/ANI1580214599567RD121_makingError", ""),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body["error"],
            "The record ANI1580214599567RD121_makingError couldn't be found."
        );
    }

    #[tokio::test]
    async fn should_keep_record_when_patching_with_empty_json_body() {
        let app = app();
        let (status, body) = send_json(
            &app,
            json_request("PATCH", "/api/animals/ANI1580216220549RD493", ""),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let original = &seed()["ANI1580216220549RD493"];
        assert_eq!(body["pet_name"], original["pet_name"]);
        assert_eq!(body["created_at"], original["created_at"]);
    }

    #[tokio::test]
    async fn should_reject_malformed_json_body() {
        let (status, _) = send(&app(), json_request("POST", "/api/animals", "{ nope")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_reject_body_with_foreign_content_type() {
        let req = Request::builder()
            .method("POST")
            .uri("/api/animals")
            .header("content-type", "text/plain")
            .body(Body::from("pet_name=Rex"))
            .unwrap();

        let (status, _) = send(&app(), req).await;

        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn should_list_records_in_insertion_order() {
        let app = build(AppState::new(AnimalService::new(
            InMemoryAnimalRepository::new(),
        )));
        let mut created = Vec::new();
        for name in ["Rex", "Tom", "Bidu"] {
            let (_, body) = send_json(
                &app,
                request("POST", "/api/animals", Some(json!({ "pet_name": name }))),
            )
            .await;
            created.push(body["id"].as_str().unwrap().to_string());
        }

        let (_, list) = send_json(&app, request("GET", "/api/animals", None)).await;

        let listed: Vec<&String> = list["data"].as_object().unwrap().keys().collect();
        assert_eq!(listed, created.iter().collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn should_serve_paths_with_trailing_slash() {
        let app = app();

        let (status, list) = send_json(&app, request("GET", "/api/animals/", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list["total"], 2);

        let (status, record) = send_json(
            &app,
            request("GET", "/api/animals/ANI1580214599567RD121/", None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(record, seed()["ANI1580214599567RD121"]);
    }

    #[tokio::test]
    async fn should_reject_body_that_is_not_an_object() {
        let (status, _) = send(
            &app(),
            request("POST", "/api/animals", Some(json!(["not", "an", "object"]))),
        )
        .await;

        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn should_merge_fields_on_patch() {
        let app = app();
        let (status, body) = send_json(
            &app,
            request(
                "PATCH",
                "/api/animals/ANI1580216220549RD493",
                Some(json!({
                    "description": "Gatinha que tem medo de ratos",
                    "pet_age": "10 meses"
                })),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let original = &seed()["ANI1580216220549RD493"];
        assert_eq!(body["description"], "Gatinha que tem medo de ratos");
        assert_eq!(body["pet_age"], "10 meses");
        assert_eq!(body["pet_name"], original["pet_name"]);
        assert_eq!(body["color"], original["color"]);
        assert_eq!(body["created_at"], original["created_at"]);
        assert_ne!(body["updated_at"], original["updated_at"]);

        let (_, stored) = send_json(
            &app,
            request("GET", "/api/animals/ANI1580216220549RD493", None),
        )
        .await;
        assert_eq!(stored, body);
    }

    #[tokio::test]
    async fn should_return_not_found_when_patching_unknown_id_without_body() {
        let app = app();
        let (status, body) = send_json(
            &app,
            request("PATCH", "/api/animals/ANI1580214599567RD121_makingError", None),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body["error"],
            "The record ANI1580214599567RD121_makingError couldn't be found."
        );

        let (_, list) = send_json(&app, request("GET", "/api/animals", None)).await;
        assert_eq!(list["data"], seed());
    }

    #[tokio::test]
    async fn should_return_no_content_when_deleting() {
        let app = app();
        let (status, body) = send(
            &app,
            request("DELETE", "/api/animals/ANI1580214599567RD121", None),
        )
        .await;

        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_empty());

        let (status, _) = send(
            &app,
            request("GET", "/api/animals/ANI1580214599567RD121", None),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_return_not_found_when_deleting_unknown_id() {
        let app = app();
        let (status, body) = send_json(
            &app,
            request("DELETE", "/api/animals/ANI1580214599567RD121_makingError", None),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({ "error": "The record ANI1580214599567RD121_makingError couldn't be found." })
        );

        let (_, list) = send_json(&app, request("GET", "/api/animals", None)).await;
        assert_eq!(list["total"], 2);
    }

    struct BrokenRepo;

    fn broken() -> MiniZooError {
        MiniZooError::Storage(Box::new(std::io::Error::other("document unreadable")))
    }

    impl AnimalRepository for BrokenRepo {
        async fn get_all(&self) -> Result<Collection, MiniZooError> {
            Err(broken())
        }
        async fn get_by_id(&self, _id: AnimalId) -> Result<Option<Animal>, MiniZooError> {
            Err(broken())
        }
        async fn create(&self, _id: AnimalId, _animal: Animal) -> Result<bool, MiniZooError> {
            Err(broken())
        }
        fn update<F>(
            &self,
            _id: AnimalId,
            _change: F,
        ) -> impl Future<Output = Result<Option<Animal>, MiniZooError>> + Send
        where
            F: FnOnce(Animal) -> Animal + Send + 'static,
        {
            async { Err(broken()) }
        }
        async fn delete(&self, _id: AnimalId) -> Result<bool, MiniZooError> {
            Err(broken())
        }
    }

    #[tokio::test]
    async fn should_return_internal_error_when_storage_fails() {
        let app = build(AppState::new(AnimalService::new(BrokenRepo)));

        let (status, body) = send_json(&app, request("GET", "/api/animals", None)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "internal server error" }));
    }
}
