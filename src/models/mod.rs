//! Data models for the persisted vehicle collection and the API.

/// Vehicle record, lifecycle state, and request/response types
pub mod vehicle;
