//! Pagination types for list endpoints. Paging happens in memory over the
//! already-filtered result set.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_NUMBER: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    DEFAULT_PAGE_NUMBER
}

fn default_limit() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl PaginationParams {
    pub fn new(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }

    /// Pages are 1-based; anything lower reads page 1.
    pub fn page(&self) -> i64 {
        self.page.max(1)
    }

    pub fn limit(&self) -> i64 {
        self.limit.max(0)
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginated<T> {
    pub limit: i64,
    pub page: i64,
    pub total_rows: i64,
    pub total_pages: i64,
    pub data: Vec<T>,
}

impl<T> Paginated<T> {
    /// Page through the full filtered list.
    pub fn from_rows(rows: Vec<T>, params: PaginationParams) -> Self {
        let limit = params.limit();
        let page = params.page();
        let total_rows = rows.len() as i64;
        let total_pages = if total_rows > 0 && limit > 0 {
            (total_rows - 1) / limit + 1
        } else {
            0
        };

        Self {
            limit,
            page,
            total_rows,
            total_pages,
            data: paginate(rows, page, limit),
        }
    }
}

/// Rows `[(page-1)*limit, page*limit)`, clipped to the slice.
pub fn paginate<T>(rows: Vec<T>, page: i64, limit: i64) -> Vec<T> {
    if limit <= 0 {
        return Vec::new();
    }
    let start = (page.max(1) - 1).saturating_mul(limit);
    let start = usize::try_from(start).unwrap_or(usize::MAX);
    if start >= rows.len() {
        return Vec::new();
    }
    let take = usize::try_from(limit).unwrap_or(usize::MAX);
    rows.into_iter().skip(start).take(take).collect()
}
