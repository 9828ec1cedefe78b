//! Data models
//!
//! Resource entities as returned by the booking API, plus the create/update
//! payloads and list filters each resource accepts. All IDs are opaque
//! server-assigned strings; wire names are camelCase.

pub mod branch;
pub mod category;
pub mod role;
pub mod service;
pub mod stylist;
pub mod user;

// Re-exports
pub use branch::*;
pub use category::*;
pub use role::*;
pub use service::*;
pub use stylist::*;
pub use user::*;
