//! # API REST
//!
//! REST API implementation for the triage service.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON bodies, status codes, CORS)
//!
//! Uses `api-shared` for response envelopes and `triage-core` for all triage operations.

#![warn(rust_2018_idioms)]

pub mod error;
mod handlers;

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::cors::CorsLayer;
use triage_core::{TriageError, TriageService};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use error::ApiError;

/// Application state shared by all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: TriageService,
}

impl AppState {
    pub fn new(service: TriageService) -> Self {
        Self { service }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::list_triages,
        handlers::create_triage,
        handlers::get_triage,
        handlers::update_triage,
        handlers::delete_triage,
        handlers::triage_history,
        handlers::triage_stats,
        handlers::queue,
        handlers::next_patient,
    ),
    components(schemas(
        api_shared::HealthRes,
        api_shared::ErrorRes,
        api_shared::Pagination,
        api_shared::ListTriagesRes,
        api_shared::DeleteTriageRes,
        api_shared::HistoryRes,
        api_shared::QueueRes,
        api_shared::NextPatientRes,
        triage_core::ObservationInput,
        triage_core::TriageRecord,
        triage_core::HistoryEntry,
        triage_core::HistoryAction,
        triage_core::QueueEntry,
        triage_core::TriageStats,
        triage_core::PriorityCount,
        triage_core::DailyCount,
        triage_core::GenderCount,
        triage_core::AgeBracketCount,
        triage_classifier::PatientObservation,
        triage_classifier::ClassificationResult,
        triage_classifier::Priority,
        triage_classifier::Gender,
        triage_classifier::ConsciousnessLevel,
        triage_classifier::Orientation,
        triage_classifier::OnsetDuration,
        triage_classifier::Symptom,
        triage_classifier::Disease,
        triage_classifier::Pregnancy,
    ))
)]
pub struct ApiDoc;

/// Rejects `/api/*` requests with 503 while the triage data directory is missing.
async fn require_storage(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if !state.service.storage_available() {
        let dir = state.service.config().triage_data_dir().to_path_buf();
        tracing::warn!("rejecting {} - storage unavailable", request.uri());
        return ApiError::from(TriageError::StorageUnavailable(dir)).into_response();
    }
    next.run(request).await
}

/// Builds the REST application: API routes, health check, Swagger UI and CORS.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/triages",
            get(handlers::list_triages).post(handlers::create_triage),
        )
        .route("/triages/stats", get(handlers::triage_stats))
        .route(
            "/triages/:id",
            get(handlers::get_triage)
                .put(handlers::update_triage)
                .delete(handlers::delete_triage),
        )
        .route("/triages/:id/history", get(handlers::triage_history))
        .route("/queue", get(handlers::queue))
        .route("/queue/next", get(handlers::next_patient))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_storage,
        ));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt;
    use triage_core::CoreConfig;

    fn app(dir: &std::path::Path) -> Router {
        let cfg = Arc::new(CoreConfig::with_defaults(dir.to_path_buf()).unwrap());
        router(AppState::new(TriageService::new(cfg)))
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = axum::http::Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn patient(name: &str, oxygen_saturation: u32) -> Value {
        json!({
            "name": name,
            "age": 35,
            "gender": "male",
            "heart_rate": 80,
            "respiratory_rate": 16,
            "temperature": 36.5,
            "systolic_pressure": 120,
            "diastolic_pressure": 80,
            "oxygen_saturation": oxygen_saturation,
            "consciousness": "alert",
            "orientation": "oriented",
            "pain_intensity": 0,
            "chief_complaint": "Came in today",
            "symptom_onset": "1-3d"
        })
    }

    #[tokio::test]
    async fn test_health() {
        let temp_dir = TempDir::new().unwrap();
        let (status, body) = send(&app(temp_dir.path()), Method::GET, "/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn test_create_get_update_delete() {
        let temp_dir = TempDir::new().unwrap();
        let app = app(temp_dir.path());

        let (status, created) = send(
            &app,
            Method::POST,
            "/api/triages",
            Some(patient("Ana Souza", 98)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["priority"], "NON_URGENT");
        assert_eq!(created["score"], 0);
        let id = created["id"].as_str().unwrap().to_string();

        let (status, fetched) = send(&app, Method::GET, &format!("/api/triages/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);

        let (status, updated) = send(
            &app,
            Method::PUT,
            &format!("/api/triages/{id}"),
            Some(json!({ "consciousness": "unconscious" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["priority"], "EMERGENCY");
        assert_eq!(updated["name"], "Ana Souza");

        let (status, deleted) =
            send(&app, Method::DELETE, &format!("/api/triages/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(deleted["id"], id.as_str());

        let (status, _) = send(&app, Method::GET, &format!("/api/triages/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, history) = send(
            &app,
            Method::GET,
            &format!("/api/triages/{id}/history"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let actions: Vec<_> = history["entries"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["action"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(actions, vec!["DELETE", "UPDATE", "CREATE"]);
    }

    #[tokio::test]
    async fn test_client_errors() {
        let temp_dir = TempDir::new().unwrap();
        let app = app(temp_dir.path());

        let mut missing = patient("Ana Souza", 98);
        missing.as_object_mut().unwrap().remove("heart_rate");
        let (status, body) = send(&app, Method::POST, "/api/triages", Some(missing)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("heart_rate"));

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/triages",
            Some(patient("Ana Souza", 140)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, Method::GET, "/api/triages/not-an-id", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, Method::GET, "/api/triages?limit=500", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, Method::GET, "/api/triages?priority=SOON", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_queue_and_stats() {
        let temp_dir = TempDir::new().unwrap();
        let app = app(temp_dir.path());

        send(&app, Method::POST, "/api/triages", Some(patient("Routine", 98))).await;
        send(&app, Method::POST, "/api/triages", Some(patient("Hypoxic", 80))).await;

        let (status, list) =
            send(&app, Method::GET, "/api/triages?priority=emergency", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list["pagination"]["total"], 1);
        assert_eq!(list["triages"][0]["name"], "Hypoxic");

        let (_, list) = send(&app, Method::GET, "/api/triages?search=rout", None).await;
        assert_eq!(list["pagination"]["total"], 1);

        let (status, queue) = send(&app, Method::GET, "/api/queue", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(queue["total"], 2);
        assert_eq!(queue["entries"][0]["name"], "Hypoxic");

        let (_, next) = send(&app, Method::GET, "/api/queue/next", None).await;
        assert_eq!(next["patient"]["name"], "Hypoxic");

        let (status, stats) = send(&app, Method::GET, "/api/triages/stats", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stats["total"], 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_creates_are_all_stored() {
        let temp_dir = TempDir::new().unwrap();
        let app = app(temp_dir.path());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let app = app.clone();
                tokio::spawn(async move {
                    let body = patient(&format!("Patient {i}"), 98);
                    send(&app, Method::POST, "/api/triages", Some(body)).await.0
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.await.unwrap(), StatusCode::CREATED);
        }

        let (_, list) = send(&app, Method::GET, "/api/triages?limit=100", None).await;
        assert_eq!(list["pagination"]["total"], 8);
        let (_, queue) = send(&app, Method::GET, "/api/queue", None).await;
        assert_eq!(queue["total"], 8);
    }

    #[tokio::test]
    async fn test_missing_storage_returns_503() {
        let temp_dir = TempDir::new().unwrap();
        let app = app(&temp_dir.path().join("missing"));

        let (status, body) = send(&app, Method::GET, "/api/triages", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body["message"].is_string());

        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], false);
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let temp_dir = TempDir::new().unwrap();
        let (status, doc) = send(
            &app(temp_dir.path()),
            Method::GET,
            "/api-docs/openapi.json",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(doc["paths"]["/api/triages"].is_object());
    }
}
