//! API Response types
//!
//! Every endpoint of the booking API answers with the same envelope:
//! ```json
//! {
//!     "success": true,
//!     "data": { ... },
//!     "message": "Branch created",
//!     "errors": { "name": ["Name is required"] },
//!     "timestamp": "2026-10-14T09:30:00.000Z"
//! }
//! ```
//! List endpoints nest a page of items and its metadata inside `data`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Unified API response structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    /// Response payload; error responses usually omit it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Field-level validation messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            errors: None,
            timestamp: None,
        }
    }

    /// Create a successful response with custom message
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok(data)
        }
    }

    /// Create a failed response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            errors: None,
            timestamp: None,
        }
    }

    /// Create a failed response carrying field errors
    pub fn validation(message: impl Into<String>, errors: BTreeMap<String, Vec<String>>) -> Self {
        Self {
            errors: Some(errors),
            ..Self::error(message)
        }
    }

    /// True when the envelope carries at least one field error
    pub fn has_field_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|e| !e.is_empty())
    }
}

/// Pagination metadata as sent by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Current page number (1-based)
    pub page: u32,
    /// Items per page
    pub limit: u32,
    /// Total number of items
    pub total: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub has_prev: bool,
}

impl Pagination {
    /// Build metadata with the derived fields computed from `page`, `limit`
    /// and `total`.
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            u32::try_from(total.div_ceil(u64::from(limit))).unwrap_or(u32::MAX)
        };
        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Recompute the derived fields, discarding whatever the server sent for them
    pub fn normalized(self) -> Self {
        Self::new(self.page, self.limit, self.total)
    }
}

/// Paginated payload inside the `data` field of a list envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedData<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

/// Normalized page of results handed to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, page: u32, limit: u32, total: u64) -> Self {
        let meta = Pagination::new(page, limit, total);
        Self {
            items,
            total: meta.total,
            page: meta.page,
            limit: meta.limit,
            total_pages: meta.total_pages,
            has_next: meta.has_next,
            has_prev: meta.has_prev,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Map the items, keeping the pagination metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResult<U> {
        PaginatedResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
            has_next: self.has_next,
            has_prev: self.has_prev,
        }
    }
}

impl<T> From<PaginatedData<T>> for PaginatedResult<T> {
    fn from(value: PaginatedData<T>) -> Self {
        let meta = value.pagination;
        Self::new(value.data, meta.page, meta.limit, meta.total)
    }
}
