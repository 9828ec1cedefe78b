//! Stylist administration and branch assignments

use shared::models::{
    AcceptInvite, AssignStylist, AssignmentFilter, ChangeBranch, InviteDetails, Stylist,
    StylistAssignment, StylistFilter, StylistInvite,
};
use shared::{ListQuery, PaginatedResult};
use validator::Validate;

use super::segment;
use crate::ClientResult;
use crate::http::HttpClient;

/// `/admin/stylists` and the public invitation endpoints
pub struct StylistsApi<'a> {
    http: &'a HttpClient,
}

impl<'a> StylistsApi<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self, query: &ListQuery<StylistFilter>) -> ClientResult<PaginatedResult<Stylist>> {
        self.http.get_paginated("/admin/stylists", query).await
    }

    /// Send an invitation e-mail; the stylist starts out pending
    pub async fn invite(&self, data: &StylistInvite) -> ClientResult<Stylist> {
        data.validate()?;
        self.http.post("/admin/stylists/invite", data).await
    }

    pub async fn block(&self, id: &str) -> ClientResult<Stylist> {
        self.http
            .patch_empty(&format!("/admin/stylists/{}/block", segment(id)))
            .await
    }

    pub async fn unblock(&self, id: &str) -> ClientResult<Stylist> {
        self.http
            .patch_empty(&format!("/admin/stylists/{}/unblock", segment(id)))
            .await
    }

    /// Look up an invitation by its token (no session needed)
    pub async fn verify_invite(&self, token: &str) -> ClientResult<InviteDetails> {
        self.http
            .get(&format!("/stylist/invite/{}", segment(token)))
            .await
    }

    pub async fn accept_invite(&self, token: &str, data: &AcceptInvite) -> ClientResult<Stylist> {
        data.validate()?;
        self.http
            .post(&format!("/stylist/invite/{}/accept", segment(token)), data)
            .await
    }
}

/// Stylists assigned to one branch: `/branches/{branch_id}/stylists`
pub struct AssignmentsApi<'a> {
    http: &'a HttpClient,
    base: String,
}

impl<'a> AssignmentsApi<'a> {
    pub(crate) fn new(http: &'a HttpClient, branch_id: &str) -> Self {
        Self {
            http,
            base: format!("/branches/{}/stylists", segment(branch_id)),
        }
    }

    pub async fn list(
        &self,
        query: &ListQuery<AssignmentFilter>,
    ) -> ClientResult<PaginatedResult<StylistAssignment>> {
        self.http.get_paginated(&self.base, query).await
    }

    pub async fn assign(&self, data: &AssignStylist) -> ClientResult<StylistAssignment> {
        data.validate()?;
        self.http.post(&self.base, data).await
    }

    pub async fn unassign(&self, stylist_id: &str) -> ClientResult<StylistAssignment> {
        self.http
            .delete(&format!("{}/{}", self.base, segment(stylist_id)))
            .await
    }

    /// Move the stylist to another branch; returns the new assignment
    pub async fn change_branch(
        &self,
        stylist_id: &str,
        data: &ChangeBranch,
    ) -> ClientResult<StylistAssignment> {
        data.validate()?;
        self.http
            .patch(&format!("{}/{}/change-branch", self.base, segment(stylist_id)), data)
            .await
    }
}
