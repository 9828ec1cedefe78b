//! Typed API surface
//!
//! Branches, categories and services share one CRUD shape: paginated list,
//! get, create, update, soft delete, restore and status toggle. Each of them
//! is a [`Resource`] and served by [`ResourceApi`]. Auth, stylist and user
//! endpoints have their own APIs.

pub mod auth;
pub mod branches;
pub mod categories;
pub mod services;
pub mod stylists;
pub mod users;

pub use auth::AuthApi;
pub use branches::{Branches, BranchesApi};
pub use categories::{Categories, CategoriesApi};
pub use services::{Services, ServicesApi};
pub use stylists::{AssignmentsApi, StylistsApi};
pub use users::UsersApi;

use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::{ListFilter, ListQuery, PaginatedResult};
use validator::Validate;

use crate::ClientResult;
use crate::http::{HttpClient, PaginatedRequest, build_paginated_request};

/// A collection with the standard CRUD endpoints under [`Resource::PATH`]
pub trait Resource {
    /// Collection path, e.g. `/branches`
    const PATH: &'static str;

    type Item: DeserializeOwned;
    type Create: Serialize + Validate;
    type Update: Serialize + Validate;
    type Filter: ListFilter;
}

/// Encode an identifier as a single path segment
pub(crate) fn segment(id: &str) -> String {
    url::form_urlencoded::byte_serialize(id.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// CRUD client for one [`Resource`]
pub struct ResourceApi<'a, R> {
    http: &'a HttpClient,
    _resource: PhantomData<R>,
}

impl<'a, R: Resource> ResourceApi<'a, R> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self {
            http,
            _resource: PhantomData,
        }
    }

    fn item_path(id: &str) -> String {
        format!("{}/{}", R::PATH, segment(id))
    }

    /// Prepared list request, for callers that track request generations
    pub fn list_request(&self, query: &ListQuery<R::Filter>) -> PaginatedRequest<R::Item> {
        build_paginated_request(R::PATH, query)
    }

    pub async fn list(&self, query: &ListQuery<R::Filter>) -> ClientResult<PaginatedResult<R::Item>> {
        self.list_request(query).send(self.http).await
    }

    pub async fn get(&self, id: &str) -> ClientResult<R::Item> {
        self.http.get(&Self::item_path(id)).await
    }

    /// Validate `data` locally, then create; nothing is sent on a local failure
    pub async fn create(&self, data: &R::Create) -> ClientResult<R::Item> {
        data.validate()?;
        self.http.post(R::PATH, data).await
    }

    pub async fn update(&self, id: &str, data: &R::Update) -> ClientResult<R::Item> {
        data.validate()?;
        self.http.patch(&Self::item_path(id), data).await
    }

    /// Mark deleted; the record stays restorable
    pub async fn soft_delete(&self, id: &str) -> ClientResult<R::Item> {
        self.http.delete(&Self::item_path(id)).await
    }

    /// Undo a soft delete. Restoring a live record is the server's call
    /// (typically `409`, surfaced as [`crate::ClientError::Conflict`]).
    pub async fn restore(&self, id: &str) -> ClientResult<R::Item> {
        self.http
            .patch_empty(&format!("{}/restore", Self::item_path(id)))
            .await
    }

    /// Flip the active flag
    pub async fn toggle_status(&self, id: &str) -> ClientResult<R::Item> {
        self.http
            .patch_empty(&format!("{}/toggle-status", Self::item_path(id)))
            .await
    }
}
