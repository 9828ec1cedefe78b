//! Category Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::request::{ListFilter, QueryParams};

/// Service category entity (e.g. "Hair", "Nails")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub is_active: bool,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCreate {
    #[validate(length(min = 1, max = 60, message = "Category name is required"))]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500, message = "Description is too long"))]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "Invalid image URL"))]
    pub image_url: Option<String>,
}

/// Update category payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 60, message = "Category name cannot be empty"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500, message = "Description is too long"))]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "Invalid image URL"))]
    pub image_url: Option<String>,
}

/// Category list filters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryFilter {
    pub is_active: Option<bool>,
    pub include_deleted: Option<bool>,
}

impl ListFilter for CategoryFilter {
    fn write_query(&self, query: &mut QueryParams) {
        query
            .push("isActive", self.is_active)
            .push("includeDeleted", self.include_deleted);
    }
}
