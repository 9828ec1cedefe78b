//! Shared types for the salon booking client
//!
//! Wire types used by every consumer of the booking API: the response
//! envelope, pagination metadata, list query contract and the resource
//! models with their create/update payloads.

pub mod client;
pub mod models;
pub mod request;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::role::Role;
pub use request::{ListFilter, ListQuery, QueryParams, SortOrder};
pub use response::{ApiResponse, PaginatedData, PaginatedResult, Pagination};
