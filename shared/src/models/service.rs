//! Service Model
//!
//! A bookable salon treatment, priced per visit and belonging to one category.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::request::{ListFilter, QueryParams};

/// Service entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category_id: String,
    #[serde(default)]
    pub category_name: Option<String>,
    pub price: f64,
    pub duration_minutes: u32,
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

/// Create service payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCreate {
    #[validate(length(min = 1, max = 100, message = "Service name is required"))]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 1000, message = "Description is too long"))]
    pub description: Option<String>,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category_id: String,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: f64,
    #[validate(range(min = 1, max = 1440, message = "Duration must be between 1 and 1440 minutes"))]
    pub duration_minutes: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "Invalid image URL"))]
    pub image_url: Option<String>,
}

/// Update service payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ServiceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100, message = "Service name cannot be empty"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 1000, message = "Description is too long"))]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Category cannot be empty"))]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 1440, message = "Duration must be between 1 and 1440 minutes"))]
    pub duration_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "Invalid image URL"))]
    pub image_url: Option<String>,
}

/// Service list filters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceFilter {
    pub category_id: Option<String>,
    pub is_active: Option<bool>,
    pub include_deleted: Option<bool>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl ListFilter for ServiceFilter {
    fn write_query(&self, query: &mut QueryParams) {
        query
            .push("categoryId", self.category_id.as_deref())
            .push("isActive", self.is_active)
            .push("includeDeleted", self.include_deleted)
            .push("minPrice", self.min_price)
            .push("maxPrice", self.max_price);
    }
}
