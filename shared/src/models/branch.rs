//! Branch Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::request::{ListFilter, QueryParams};

/// Salon branch entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub id: String,
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Local opening time, "HH:MM"
    #[serde(default)]
    pub opening_time: Option<String>,
    /// Local closing time, "HH:MM"
    #[serde(default)]
    pub closing_time: Option<String>,
    pub is_active: bool,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create branch payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BranchCreate {
    #[validate(length(min = 1, max = 100, message = "Branch name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 7, max = 20, message = "Invalid phone number"))]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing_time: Option<String>,
}

/// Update branch payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BranchUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100, message = "Branch name cannot be empty"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Address cannot be empty"))]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 7, max = 20, message = "Invalid phone number"))]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing_time: Option<String>,
}

/// Branch list filters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BranchFilter {
    pub is_active: Option<bool>,
    pub include_deleted: Option<bool>,
}

impl ListFilter for BranchFilter {
    fn write_query(&self, query: &mut QueryParams) {
        query
            .push("isActive", self.is_active)
            .push("includeDeleted", self.include_deleted);
    }
}
