//! Valet Parking Service - Main Application Entry Point
//!
//! This is a REST API server for a single-location valet-parking tracker. Front-desk staff register a vehicle at check-in (plate, key slot, parking slot, optional note), look it up later by partial plate match, and mark it retrieved at check-out.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Persistence**: Single JSON blob on disk, rewritten in full on every mutation
//! - **Format**: JSON requests/responses
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Open the file-backed vehicle store
//! 3. Build HTTP router with routes and middleware
//! 4. Start server on configured port

mod config;
mod error;
mod handlers;
mod models;
mod services;
mod storage;

use tracing_subscriber::EnvFilter;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use storage::{FileBackend, VehicleStore};
use tower_http::trace::TraceLayer;

/// Build the application router over a vehicle store.
///
/// Separated from `main` so tests can drive the exact same routes against
/// a store built on the in-memory backend.
fn app(store: Arc<VehicleStore>) -> Router {
    Router::new()
        // Public health endpoint
        .route("/health", get(handlers::health::health_check))
        // Vehicle lifecycle routes
        .route("/api/v1/vehicles", post(handlers::vehicles::check_in))
        .route("/api/v1/vehicles", get(handlers::vehicles::list_vehicles))
        .route(
            "/api/v1/vehicles/parked",
            get(handlers::vehicles::list_parked),
        )
        .route(
            "/api/v1/vehicles/search",
            get(handlers::vehicles::search_vehicles),
        )
        .route(
            "/api/v1/vehicles/{id}/retrieve",
            post(handlers::vehicles::retrieve_vehicle),
        )
        // Aggregate counts
        .route("/api/v1/stats", get(handlers::vehicles::get_stats))
        // Add distributed tracing middleware for observability
        .layer(TraceLayer::new_for_http())
        // Share the vehicle store with all handlers via State extraction
        .with_state(store)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration
    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Open the file-backed vehicle store
    let backend = FileBackend::new(&config.data_dir)?;
    let store = Arc::new(VehicleStore::new(backend));
    tracing::info!("Vehicle store opened at {}", config.data_dir.display());

    let app = app(store);

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // Start serving HTTP requests
    // This blocks forever, handling requests concurrently with tokio
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBackend;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn test_app() -> Router {
        app(Arc::new(VehicleStore::new(MemoryBackend::default())))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn check_in(app: &Router, plate: &str) -> Value {
        let (status, body) = send(
            app,
            post_json(
                "/api/v1/vehicles",
                json!({"plateNumber": plate, "keyLocation": "A-3", "parkingSpot": "B-12"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body
    }

    #[tokio::test]
    async fn health_reports_available_storage() {
        let app = test_app();
        let (status, body) = send(&app, get("/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["storage"], "available");
    }

    #[tokio::test]
    async fn check_in_returns_created_record() {
        let app = test_app();
        let body = check_in(&app, "12가 3456").await;

        assert_eq!(body["plateNumber"], "12가 3456");
        assert_eq!(body["status"], "parked");
        assert!(body["id"].is_string());
        assert!(body.get("checkedOutAt").is_none());
    }

    #[tokio::test]
    async fn check_in_rejects_blank_required_fields() {
        let app = test_app();
        let (status, body) = send(
            &app,
            post_json(
                "/api/v1/vehicles",
                json!({"plateNumber": "  ", "keyLocation": "A-3", "parkingSpot": "B-12"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "invalid_request");

        // Nothing was persisted
        let (_, vehicles) = send(&app, get("/api/v1/vehicles")).await;
        assert_eq!(vehicles.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn search_matches_normalized_plates_of_parked_vehicles() {
        let app = test_app();
        check_in(&app, "12가 3456").await;
        check_in(&app, "34나5678").await;

        // "3456" is a substring of the normalized "12가3456" but not of "34나5678"
        let (status, body) = send(&app, get("/api/v1/vehicles/search?q=3456")).await;
        assert_eq!(status, StatusCode::OK);
        let matches = body.as_array().unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0]["plateNumber"], "12가 3456");
    }

    #[tokio::test]
    async fn retrieve_transitions_record_and_updates_listings() {
        let app = test_app();
        let created = check_in(&app, "12가3456").await;
        check_in(&app, "34나5678").await;
        let id = created["id"].as_str().unwrap().to_string();

        let (status, body) =
            send(&app, post_json(&format!("/api/v1/vehicles/{id}/retrieve"), json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "retrieved");
        assert!(body["checkedOutAt"].is_string());

        let (_, parked) = send(&app, get("/api/v1/vehicles/parked")).await;
        assert_eq!(parked.as_array().unwrap().len(), 1);

        let (_, stats) = send(&app, get("/api/v1/stats")).await;
        assert_eq!(stats, json!({"parked": 1, "retrieved": 1, "total": 2}));
    }

    #[tokio::test]
    async fn retrieve_unknown_id_is_404() {
        let app = test_app();
        let (status, body) = send(
            &app,
            post_json(
                "/api/v1/vehicles/550e8400-e29b-41d4-a716-446655440000/retrieve",
                json!({}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "vehicle_not_found");
    }

    #[tokio::test]
    async fn second_retrieve_is_409() {
        let app = test_app();
        let created = check_in(&app, "12가3456").await;
        let id = created["id"].as_str().unwrap().to_string();
        let uri = format!("/api/v1/vehicles/{id}/retrieve");

        let (status, _) = send(&app, post_json(&uri, json!({}))).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, post_json(&uri, json!({}))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "already_retrieved");
    }
}
