//! Health check endpoint for service monitoring.

use crate::{error::AppError, storage::VehicleStore};
use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// Health check response.
///
/// Returns service status and storage availability.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall service status
    pub status: String,

    /// Persistence layer status
    pub storage: String,

    /// Current server timestamp
    pub timestamp: DateTime<Utc>,
}

/// Health check handler.
///
/// # Checks
///
/// - Storage readability (loads the persisted collection)
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "status": "healthy",
///   "storage": "available",
///   "timestamp": "2026-08-23T09:30:00Z"
/// }
/// ```
///
/// # Response (500 Internal Server Error)
///
/// If the persisted data cannot be read, returns standard error response.
pub async fn health_check(
    State(store): State<Arc<VehicleStore>>,
) -> Result<Json<HealthResponse>, AppError> {
    // Verify the persisted collection is readable
    store.load()?;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        storage: "available".to_string(),
        timestamp: Utc::now(),
    }))
}
