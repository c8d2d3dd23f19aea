//! # alum-core
//!
//! Core types shared by every crate of the alumni admin data layer:
//! - Entity structs for the platform's collections (events, sponsors, ...)
//! - Closed status enums, some with state machine transitions
//! - The [`Resource`](resource::Resource) trait tying a struct to its collection
//! - Response envelopes (`ApiResponse`, `PaginatedResponse`, `BulkOperationResult`)
//! - The [`KeyValueStore`](state::KeyValueStore) seam for client-side persisted state
//! - Per-collection stats, bulk actions, ID generation and cross-cutting errors

pub mod actions;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod resource;
pub mod responses;
pub mod state;
pub mod stats;
