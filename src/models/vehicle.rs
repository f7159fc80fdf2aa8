//! Vehicle data model and API request/response types.
//!
//! This module defines:
//! - `Vehicle`: the persisted vehicle record
//! - `VehicleStatus`: the parked/retrieved lifecycle state
//! - `CheckInRequest`: request body for checking a vehicle in
//! - `LotStats`: aggregate counts over the whole collection
//!
//! All types serialize in camelCase so the persisted blob and the API
//! payloads share one layout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a vehicle record.
///
/// The only transition is `Parked -> Retrieved`, performed exactly once at
/// check-out. Records are never re-parked and never deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    Parked,
    Retrieved,
}

/// A vehicle record in the persisted collection.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": "550e8400-e29b-41d4-a716-446655440000",
///   "plateNumber": "12가 3456",
///   "keyLocation": "A-3",
///   "parkingSpot": "B-12",
///   "status": "parked",
///   "checkedInAt": "2026-08-23T09:30:00Z",
///   "notes": "left window open"
/// }
/// ```
///
/// `checkedOutAt` is present if and only if `status` is `retrieved`; absent
/// optional fields are omitted from the serialized form entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    /// Unique identifier, generated at check-in
    pub id: Uuid,

    /// License plate as entered by staff, free text
    pub plate_number: String,

    /// Where the key is stored (e.g., key cabinet slot)
    pub key_location: String,

    /// Where the vehicle is parked
    pub parking_spot: String,

    /// Current lifecycle state
    pub status: VehicleStatus,

    /// When the vehicle was checked in; immutable after creation
    pub checked_in_at: DateTime<Utc>,

    /// When the vehicle was checked out; set exactly once, at retrieval
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked_out_at: Option<DateTime<Utc>>,

    /// Free-text note from check-in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Request to check a vehicle in.
///
/// # JSON Example
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
/// The three required fields must be non-blank; the handler rejects blank
/// values before the store is touched.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRequest {
    pub plate_number: String,
    pub key_location: String,
    pub parking_spot: String,
    pub notes: Option<String>,
}

/// Aggregate counts over the full collection.
///
/// `total == parked + retrieved` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LotStats {
    pub parked: usize,
    pub retrieved: usize,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&VehicleStatus::Parked).unwrap(),
            "\"parked\""
        );
        assert_eq!(
            serde_json::to_string(&VehicleStatus::Retrieved).unwrap(),
            "\"retrieved\""
        );
    }

    #[test]
    fn deserializes_record_without_optional_fields() {
        let json = format!(
            r#"{{
                "id": "{}",
                "plateNumber": "12가3456",
                "keyLocation": "A-3",
                "parkingSpot": "B-12",
                "status": "parked",
                "checkedInAt": "2026-08-23T09:30:00Z"
            }}"#,
            Uuid::new_v4()
        );
        let vehicle: Vehicle = serde_json::from_str(&json).unwrap();
        assert_eq!(vehicle.status, VehicleStatus::Parked);
        assert!(vehicle.checked_out_at.is_none());
        assert!(vehicle.notes.is_none());
    }

    #[test]
    fn check_in_request_accepts_camel_case_body() {
        let request: CheckInRequest = serde_json::from_str(
            r#"{"plateNumber": "34나5678", "keyLocation": "A-4", "parkingSpot": "B-13"}"#,
        )
        .unwrap();
        assert_eq!(request.plate_number, "34나5678");
        assert!(request.notes.is_none());
    }
}
