//! Stylist Model
//!
//! Stylists are invited by an admin, accept the invitation through a
//! tokenized link, and are assigned to at most one branch at a time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::request::{ListFilter, QueryParams};

/// Invitation lifecycle of a stylist account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InviteStatus {
    Pending,
    Accepted,
    Expired,
}

/// Stylist entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stylist {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub display_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub branch_id: Option<String>,
    #[serde(default)]
    pub branch_name: Option<String>,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_blocked: bool,
    #[serde(default)]
    pub invite_status: Option<InviteStatus>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

/// Admin stylist list filters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StylistFilter {
    pub branch_id: Option<String>,
    pub is_blocked: Option<bool>,
    /// Only stylists without a branch
    pub unassigned: Option<bool>,
}

impl ListFilter for StylistFilter {
    fn write_query(&self, query: &mut QueryParams) {
        query
            .push("branchId", self.branch_id.as_deref())
            .push("isBlocked", self.is_blocked)
            .push("unassigned", self.unassigned);
    }
}

/// Invite a stylist by e-mail
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StylistInvite {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, max = 80, message = "Display name is required"))]
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
}

/// Invitation details shown on the acceptance page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteDetails {
    pub email: String,
    pub display_name: String,
    #[serde(default)]
    pub branch_name: Option<String>,
    pub expires_at: DateTime<Utc>,
}

/// Accept an invitation and set the account password
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AcceptInvite {
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 7, max = 20, message = "Invalid phone number"))]
    pub phone: Option<String>,
}

/// Stylist-to-branch assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StylistAssignment {
    pub stylist_id: String,
    pub branch_id: String,
    #[serde(default)]
    pub stylist_name: Option<String>,
    #[serde(default)]
    pub branch_name: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub assigned_at: Option<DateTime<Utc>>,
}

/// Assign a stylist to a branch
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AssignStylist {
    #[validate(length(min = 1, message = "Stylist is required"))]
    pub stylist_id: String,
}

/// Move an assigned stylist to another branch
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangeBranch {
    #[validate(length(min = 1, message = "Target branch is required"))]
    pub new_branch_id: String,
}

/// Branch stylist list filters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentFilter {
    pub is_active: Option<bool>,
}

impl ListFilter for AssignmentFilter {
    fn write_query(&self, query: &mut QueryParams) {
        query.push("isActive", self.is_active);
    }
}
