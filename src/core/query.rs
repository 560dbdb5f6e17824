//! Search, pagination and listing parameters

use serde::{Deserialize, Serialize};

use crate::core::address::{Address, AddressField};

/// Default number of records per page
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Query parameters for listing addresses
///
/// # Example
/// ```text
/// GET /api/addresses?searchQuery=acme&page=2&pageSize=6
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// Free-text query, empty means no filter
    #[serde(default)]
    pub search_query: Option<String>,

    /// Page number (starts at 1)
    #[serde(default)]
    pub page: Option<i64>,

    /// Number of records per page
    #[serde(default)]
    pub page_size: Option<i64>,
}

impl ListParams {
    pub fn new(search_query: impl Into<String>, page: i64, page_size: i64) -> Self {
        Self {
            search_query: Some(search_query.into()),
            page: Some(page),
            page_size: Some(page_size),
        }
    }

    /// Page number, ensuring minimum of 1
    pub fn page(&self) -> usize {
        self.page
            .map(|p| usize::try_from(p).unwrap_or(0).max(1))
            .unwrap_or(1)
    }

    /// Page size, defaulted and clamped to `[1, max]`
    pub fn page_size(&self, default: usize, max: usize) -> usize {
        self.page_size
            .map(|s| usize::try_from(s).unwrap_or(0))
            .unwrap_or(default)
            .clamp(1, max.max(1))
    }

    pub fn filter(&self) -> SearchFilter {
        SearchFilter::new(self.search_query.as_deref())
    }
}

/// Case-insensitive substring filter over the searchable fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    needle: Option<String>,
}

impl SearchFilter {
    /// Build a filter; an absent or empty query matches everything
    pub fn new(query: Option<&str>) -> Self {
        Self {
            needle: query.filter(|q| !q.is_empty()).map(str::to_lowercase),
        }
    }

    /// Filter that matches every record
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_none()
    }

    /// Whether any searchable field contains the query
    pub fn matches(&self, address: &Address) -> bool {
        let Some(needle) = &self.needle else {
            return true;
        };
        AddressField::SEARCHABLE.iter().any(|field| {
            address
                .field(*field)
                .is_some_and(|value| value.to_lowercase().contains(needle.as_str()))
        })
    }
}

/// Offset window over an ordered result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub skip: usize,
    /// `None` takes every remaining record
    pub take: Option<usize>,
}

impl PageRequest {
    /// Window for a 1-based page
    pub fn page(page: usize, page_size: usize) -> Self {
        Self {
            skip: page.saturating_sub(1).saturating_mul(page_size),
            take: Some(page_size),
        }
    }

    /// Window covering the full result set
    pub fn unbounded() -> Self {
        Self {
            skip: 0,
            take: None,
        }
    }
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of records per page
    pub page_size: usize,

    /// Total number of records matching the filter
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(page: usize, page_size: usize, total: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total.div_ceil(page_size);
        let start = page.saturating_sub(1).saturating_mul(page_size);

        Self {
            page,
            page_size,
            total,
            total_pages,
            has_next: start.saturating_add(page_size) < total,
            has_prev: page > 1,
        }
    }
}
