//! Customer account administration

use shared::models::{UserFilter, UserInfo};
use shared::{ListQuery, PaginatedResult};

use super::segment;
use crate::ClientResult;
use crate::http::HttpClient;

/// `/admin/users`
pub struct UsersApi<'a> {
    http: &'a HttpClient,
}

impl<'a> UsersApi<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self, query: &ListQuery<UserFilter>) -> ClientResult<PaginatedResult<UserInfo>> {
        self.http.get_paginated("/admin/users", query).await
    }

    pub async fn block(&self, id: &str) -> ClientResult<UserInfo> {
        self.http
            .patch_empty(&format!("/admin/users/{}/block", segment(id)))
            .await
    }

    pub async fn unblock(&self, id: &str) -> ClientResult<UserInfo> {
        self.http
            .patch_empty(&format!("/admin/users/{}/unblock", segment(id)))
            .await
    }
}
