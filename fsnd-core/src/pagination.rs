//! Page slicing over ordered result sets

use serde::{Deserialize, Serialize};

/// Default items per page
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (1-indexed)
    pub page: u32,
    /// Items per page
    pub per_page: u32,
}

impl Pagination {
    /// Create pagination, clamping page and page size to at least 1.
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// Offset of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page as usize - 1) * self.per_page as usize
    }

    /// Slice an already-ordered collection down to this page.
    ///
    /// Pages past the end yield an empty list rather than an error.
    pub fn paginate<T>(&self, items: Vec<T>) -> Paginated<T> {
        let total = items.len() as i64;
        let items = items
            .into_iter()
            .skip(self.offset())
            .take(self.per_page as usize)
            .collect();

        Paginated {
            items,
            total,
            page: self.page,
            per_page: self.per_page,
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// One page of results plus the size of the whole set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// Items for current page
    pub items: Vec<T>,
    /// Total count across all pages
    pub total: i64,
    /// Current page number
    pub page: u32,
    /// Items per page
    pub per_page: u32,
}

impl<T> Paginated<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
        }
    }
}

/// Query parameters for pagination (`?page=N`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<u32>,
}

impl PaginationParams {
    /// Resolve against the configured page size.
    pub fn with_page_size(&self, per_page: u32) -> Pagination {
        Pagination::new(self.page.unwrap_or(1), per_page)
    }
}
