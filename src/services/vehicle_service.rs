//! Vehicle service - Core check-in/check-out logic over the vehicle store.
//!
//! This service handles:
//! - Record creation at check-in
//! - The parked -> retrieved state transition at check-out
//! - Plate search with normalization
//! - Derived listings and counts
//!
//! # Consistency Guarantees
//!
//! Every mutation is a full read-modify-write of the persisted collection,
//! performed under the store's transaction so no partial write is ever
//! visible. Reads always re-parse the persisted blob.

use crate::{
    error::AppError,
    models::vehicle::{LotStats, Vehicle, VehicleStatus},
    storage::VehicleStore,
};
use chrono::Utc;
use uuid::Uuid;

/// List all records currently persisted, in insertion order.
pub fn list(store: &VehicleStore) -> Result<Vec<Vehicle>, AppError> {
    Ok(store.load()?)
}

/// Check a vehicle in.
///
/// # Process
///
/// 1. Load the full collection
/// 2. Append a fresh `parked` record with a new id and check-in timestamp
/// 3. Rewrite the full collection
///
/// The store performs no input validation; required fields are checked by
/// the HTTP layer before this is called.
///
/// # Arguments
///
/// * `store` - The vehicle store
/// * `plate_number` - License plate, free text
/// * `key_location` - Key storage slot
/// * `parking_spot` - Parking slot
/// * `notes` - Optional free-text note
///
/// # Returns
///
/// The newly created record.
pub fn check_in(
    store: &VehicleStore,
    plate_number: String,
    key_location: String,
    parking_spot: String,
    notes: Option<String>,
) -> Result<Vehicle, AppError> {
    let vehicle = Vehicle {
        id: Uuid::new_v4(),
        plate_number,
        key_location,
        parking_spot,
        status: VehicleStatus::Parked,
        checked_in_at: Utc::now(),
        checked_out_at: None,
        notes,
    };

    let mut tx = store.begin()?;
    tx.vehicles.push(vehicle.clone());
    tx.commit()?;

    Ok(vehicle)
}

/// Check a vehicle out (retrieve it).
///
/// Flips the record's status to `retrieved` and stamps the check-out time.
///
/// # Errors
///
/// - `VehicleNotFound`: no record has this id; persisted state is untouched
/// - `AlreadyRetrieved`: the record was already checked out; the original
///   check-out timestamp is preserved and nothing is rewritten
pub fn retrieve(store: &VehicleStore, id: Uuid) -> Result<Vehicle, AppError> {
    let mut tx = store.begin()?;

    let vehicle = tx
        .vehicles
        .iter_mut()
        .find(|v| v.id == id)
        .ok_or(AppError::VehicleNotFound)?;

    if vehicle.status == VehicleStatus::Retrieved {
        return Err(AppError::AlreadyRetrieved);
    }

    vehicle.status = VehicleStatus::Retrieved;
    vehicle.checked_out_at = Some(Utc::now());
    let updated = vehicle.clone();

    tx.commit()?;

    Ok(updated)
}

/// Search parked vehicles by partial plate match.
///
/// Both the stored plate and the query are lower-cased and stripped of all
/// whitespace before the substring comparison, so `"123456"` matches a
/// stored `"12가 3456"`. Only `parked` records are considered; matches come
/// back in collection order with no limit.
pub fn search(store: &VehicleStore, query: &str) -> Result<Vec<Vehicle>, AppError> {
    let query = normalize_plate(query);
    Ok(store
        .load()?
        .into_iter()
        .filter(|v| {
            v.status == VehicleStatus::Parked && normalize_plate(&v.plate_number).contains(&query)
        })
        .collect())
}

/// List only the vehicles currently parked.
pub fn list_parked(store: &VehicleStore) -> Result<Vec<Vehicle>, AppError> {
    Ok(store
        .load()?
        .into_iter()
        .filter(|v| v.status == VehicleStatus::Parked)
        .collect())
}

/// Aggregate counts over the full collection.
pub fn stats(store: &VehicleStore) -> Result<LotStats, AppError> {
    let vehicles = store.load()?;
    let parked = vehicles
        .iter()
        .filter(|v| v.status == VehicleStatus::Parked)
        .count();
    let total = vehicles.len();

    Ok(LotStats {
        parked,
        retrieved: total - parked,
        total,
    })
}

/// Lower-case and strip all whitespace from a plate string.
fn normalize_plate(plate: &str) -> String {
    plate
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}
