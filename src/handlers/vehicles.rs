//! Vehicle HTTP handlers.
//!
//! This module implements the vehicle-related API endpoints:
//! - POST /api/v1/vehicles - Check a vehicle in
//! - GET /api/v1/vehicles - List all vehicle records
//! - GET /api/v1/vehicles/parked - List currently parked vehicles
//! - GET /api/v1/vehicles/search?q= - Search parked vehicles by partial plate
//! - POST /api/v1/vehicles/:id/retrieve - Check a vehicle out
//! - GET /api/v1/stats - Aggregate counts

use crate::{
    error::AppError,
    models::vehicle::{CheckInRequest, LotStats, Vehicle},
    services::vehicle_service,
    storage::VehicleStore,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

/// Check a vehicle in.
///
/// # Request Body
///
/// ```json
/// {
///   "plateNumber": "12가 3456",
///   "keyLocation": "A-3",
///   "parkingSpot": "B-12",
///   "notes": "left window open"
/// }
/// ```
///
/// # Response (201)
///
/// ```json
/// {
///   "id": "770e8400-...",
///   "plateNumber": "12가 3456",
///   "keyLocation": "A-3",
///   "parkingSpot": "B-12",
///   "status": "parked",
///   "checkedInAt": "2026-08-23T09:30:00Z",
///   "notes": "left window open"
/// }
/// ```
///
/// # Validation
///
/// The three required fields must be non-blank. The store itself performs no
/// validation, so the rejection happens here, before anything is persisted.
pub async fn check_in(
    State(store): State<Arc<VehicleStore>>,
    Json(request): Json<CheckInRequest>,
) -> Result<(StatusCode, Json<Vehicle>), AppError> {
    // Reject blank required fields before touching the store
    require_field(&request.plate_number, "plateNumber")?;
    require_field(&request.key_location, "keyLocation")?;
    require_field(&request.parking_spot, "parkingSpot")?;

    let vehicle = vehicle_service::check_in(
        &store,
        request.plate_number,
        request.key_location,
        request.parking_spot,
        request.notes,
    )?;

    tracing::info!(id = %vehicle.id, plate = %vehicle.plate_number, "vehicle checked in");

    Ok((StatusCode::CREATED, Json(vehicle)))
}

/// List every vehicle record, parked and retrieved, in insertion order.
pub async fn list_vehicles(
    State(store): State<Arc<VehicleStore>>,
) -> Result<Json<Vec<Vehicle>>, AppError> {
    Ok(Json(vehicle_service::list(&store)?))
}

/// List only the vehicles currently parked.
pub async fn list_parked(
    State(store): State<Arc<VehicleStore>>,
) -> Result<Json<Vec<Vehicle>>, AppError> {
    Ok(Json(vehicle_service::list_parked(&store)?))
}

/// Query parameters for plate search.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Partial plate to match; case- and whitespace-insensitive
    pub q: String,
}

/// Search parked vehicles by partial plate match.
///
/// # Endpoint
///
/// `GET /api/v1/vehicles/search?q=1234`
///
/// Only parked vehicles are searched; an already-retrieved vehicle never
/// appears in the results even if its plate matches.
pub async fn search_vehicles(
    State(store): State<Arc<VehicleStore>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Vehicle>>, AppError> {
    Ok(Json(vehicle_service::search(&store, &params.q)?))
}

/// Check a vehicle out (retrieve it).
///
/// # Endpoint
///
/// `POST /api/v1/vehicles/{id}/retrieve`
///
/// # Responses
///
/// - **200**: the updated record, status `retrieved` with `checkedOutAt` set
/// - **404**: no record has this id
/// - **409**: the record was already retrieved
pub async fn retrieve_vehicle(
    State(store): State<Arc<VehicleStore>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vehicle>, AppError> {
    let vehicle = vehicle_service::retrieve(&store, id)?;

    tracing::info!(id = %vehicle.id, plate = %vehicle.plate_number, "vehicle checked out");

    Ok(Json(vehicle))
}

/// Aggregate counts over the whole collection.
///
/// # Response (200)
///
/// ```json
/// {
///   "parked": 1,
///   "retrieved": 1,
///   "total": 2
/// }
/// ```
pub async fn get_stats(State(store): State<Arc<VehicleStore>>) -> Result<Json<LotStats>, AppError> {
    Ok(Json(vehicle_service::stats(&store)?))
}

fn require_field(value: &str, name: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidRequest(format!("{name} is required")));
    }
    Ok(())
}
