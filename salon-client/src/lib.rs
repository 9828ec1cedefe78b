//! Salon Client - typed client for the salon booking API
//!
//! Session lifecycle and role gating of application routes, plus the
//! paginated-list contract and CRUD APIs of the admin and stylist screens.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod generation;
pub mod guard;
pub mod http;
pub mod logger;
pub mod routes;
pub mod session;
pub mod token;

pub use client::{SalonClient, SalonClientBuilder};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, ErrorKind, FieldErrors};
pub use generation::{RequestGeneration, Ticket};
pub use guard::{Audience, GuardDecision, RouteGuard};
pub use crate::http::{HttpClient, PaginatedRequest, ResponseInterceptor, build_paginated_request};
pub use session::{SessionState, SessionStore};
pub use token::{FileTokenStore, MemoryTokenStore, TokenStore};

// Re-export shared types for convenience
pub use shared::client::{LoginRequest, LoginResponse};
pub use shared::models::{Role, UserInfo};
pub use shared::{ApiResponse, ListQuery, PaginatedResult, SortOrder};
