//! Business logic services.
//!
//! Services contain core business logic separated from HTTP handlers.
//! They own the read-modify-write cycle against the vehicle store.

pub mod vehicle_service;
