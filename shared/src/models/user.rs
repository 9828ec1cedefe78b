//! User Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Role;
use crate::request::{ListFilter, QueryParams};

/// Identity record returned by `/auth/me` and the admin user list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: Role,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub blocked: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

/// Admin user list filters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFilter {
    pub role: Option<Role>,
    pub is_blocked: Option<bool>,
    pub is_active: Option<bool>,
}

impl ListFilter for UserFilter {
    fn write_query(&self, query: &mut QueryParams) {
        query
            .push("role", self.role)
            .push("isBlocked", self.is_blocked)
            .push("isActive", self.is_active);
    }
}
