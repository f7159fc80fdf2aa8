//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::storage::StorageError;

/// Application-wide error type.
///
/// This enum represents all possible errors that can occur in the application.
/// Each variant maps to a specific HTTP status code and error message.
///
/// # Error Categories
///
/// - **Storage Errors**: The persisted collection could not be read or written
/// - **Resource Errors**: Requested vehicle not found
/// - **Business Logic Errors**: Operations that violate the record lifecycle
/// - **Validation Errors**: Invalid request data
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Persistence layer failed (I/O error or corrupt persisted data).
    ///
    /// This wraps any StorageError using the `#[from]` attribute, which
    /// automatically implements `From<StorageError> for AppError`.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// No vehicle record has the requested id.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Vehicle not found")]
    VehicleNotFound,

    /// The vehicle was already checked out; a record transitions
    /// parked -> retrieved at most once.
    ///
    /// Returns HTTP 409 Conflict.
    #[error("Vehicle already retrieved")]
    AlreadyRetrieved,

    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    /// The String contains details about what was invalid.
    #[error("Invalid request")]
    InvalidRequest(String),
}

/// Convert AppError into an HTTP response.
///
/// This implementation allows Axum handlers to return `Result<T, AppError>`
/// and have errors automatically converted to proper HTTP responses.
///
/// # Response Format
///
/// All errors return JSON in this format:
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `VehicleNotFound` → 404 Not Found
/// - `AlreadyRetrieved` → 409 Conflict
/// - `InvalidRequest` → 400 Bad Request
/// - `Storage` → 500 Internal Server Error (hides details from client)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map each error variant to (HTTP status, error code, message)
        let (status, code, message) = match self {
            AppError::VehicleNotFound => {
                (StatusCode::NOT_FOUND, "vehicle_not_found", self.to_string())
            }
            AppError::AlreadyRetrieved => {
                (StatusCode::CONFLICT, "already_retrieved", self.to_string())
            }
            AppError::InvalidRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
            }
            AppError::Storage(ref err) => {
                tracing::error!("storage failure: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        // Build JSON response body
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        // Return the response with status code and JSON body
        (status, body).into_response()
    }
}
