//! Request types for the shared crate
//!
//! List endpoints take an optional set of pagination, search, sort and
//! resource-specific filter parameters. [`ListQuery`] carries them and
//! [`QueryParams`] turns them into a canonical query string.
//!
//! Serialization rules:
//! - a key is written only when its value is defined and not an empty string
//! - numbers use their decimal form, booleans the literals `true` / `false`
//! - keys keep declaration order: `page`, `limit`, `search`, `sortBy`,
//!   `sortOrder`, then the filter's own keys

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered query string builder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `key` when `value` is defined and renders to a non-empty string.
    ///
    /// `Some(false)` and `Some(0)` are written; only `None` and `""` are skipped.
    pub fn push<V: fmt::Display>(&mut self, key: &'static str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            let rendered = value.to_string();
            if !rendered.is_empty() {
                self.pairs.push((key, rendered));
            }
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    /// Look up the first value written for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Form-urlencoded query string, without the leading `?`
    pub fn encode(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    /// Attach the query to `base`. An empty query leaves `base` untouched.
    pub fn append_to(&self, base: &str) -> String {
        if self.is_empty() {
            return base.to_string();
        }
        let separator = if base.ends_with(['?', '&']) {
            ""
        } else if base.contains('?') {
            "&"
        } else {
            "?"
        };
        format!("{base}{separator}{}", self.encode())
    }
}

/// Resource-specific list filters
pub trait ListFilter {
    /// Write this filter's keys, in declaration order
    fn write_query(&self, query: &mut QueryParams);
}

impl ListFilter for () {
    fn write_query(&self, _query: &mut QueryParams) {}
}

/// Pagination, search, sort and filter parameters for a list endpoint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery<F = ()> {
    pub page: Option<NonZeroU32>,
    pub limit: Option<NonZeroU32>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub filters: F,
}

impl ListQuery<()> {
    /// Query with no parameters at all
    pub fn new() -> Self {
        Self::default()
    }
}

impl<F> ListQuery<F> {
    /// Query for the given filters and nothing else
    pub fn with_filters(filters: F) -> Self {
        Self {
            page: None,
            limit: None,
            search: None,
            sort_by: None,
            sort_order: None,
            filters,
        }
    }

    /// Set the 1-based page. `0` is not a valid page and leaves it unset.
    pub fn page(mut self, page: u32) -> Self {
        self.page = NonZeroU32::new(page);
        self
    }

    /// Set the page size. `0` leaves it unset.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = NonZeroU32::new(limit);
        self
    }

    /// Set both page and page size
    pub fn paginate(self, page: u32, limit: u32) -> Self {
        self.page(page).limit(limit)
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn sort_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(field.into());
        self.sort_order = Some(order);
        self
    }

    /// Replace the filters, keeping pagination, search and sort
    pub fn filters<G>(self, filters: G) -> ListQuery<G> {
        ListQuery {
            page: self.page,
            limit: self.limit,
            search: self.search,
            sort_by: self.sort_by,
            sort_order: self.sort_order,
            filters,
        }
    }
}

impl<F: ListFilter> ListQuery<F> {
    pub fn to_query_params(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query
            .push("page", self.page)
            .push("limit", self.limit)
            .push("search", self.search.as_deref())
            .push("sortBy", self.sort_by.as_deref())
            .push("sortOrder", self.sort_order);
        self.filters.write_query(&mut query);
        query
    }

    /// Encoded query string, without the leading `?`
    pub fn to_query_string(&self) -> String {
        self.to_query_params().encode()
    }
}
