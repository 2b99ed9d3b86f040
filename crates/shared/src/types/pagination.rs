//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-indexed).
    #[serde(default = "default_page")]
    pub page: u32,
    /// Number of items per page.
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    10
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl PageRequest {
    /// Calculates the offset for database queries.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    /// Returns the limit for database queries, capped at 100.
    #[must_use]
    pub fn limit(&self) -> u64 {
        u64::from(self.limit.clamp(1, 100))
    }
}

/// Response wrapper for paginated data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items in the current page.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub meta: PageMeta,
}

/// Pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    /// Current page number.
    pub page: u32,
    /// Items per page.
    pub limit: u32,
    /// Total number of items across all pages.
    pub total: u64,
    /// Total number of pages.
    pub total_pages: u64,
}

impl<T> PageResponse<T> {
    /// Creates a new paginated response.
    #[must_use]
    pub fn new(data: Vec<T>, page: u32, limit: u32, total: u64) -> Self {
        let total_pages = if total == 0 {
            1
        } else {
            total.div_ceil(u64::from(limit.max(1)))
        };

        Self {
            data,
            meta: PageMeta {
                page,
                limit,
                total,
                total_pages,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_calculation() {
        let req = PageRequest { page: 1, limit: 10 };
        assert_eq!(req.offset(), 0);

        let req = PageRequest { page: 3, limit: 25 };
        assert_eq!(req.offset(), 50);
    }

    #[test]
    fn test_offset_page_zero_saturates() {
        let req = PageRequest { page: 0, limit: 10 };
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn test_limit_is_capped() {
        let req = PageRequest {
            page: 1,
            limit: 1000,
        };
        assert_eq!(req.limit(), 100);

        let req = PageRequest { page: 1, limit: 0 };
        assert_eq!(req.limit(), 1);
    }

    #[test]
    fn test_total_pages() {
        let resp: PageResponse<u8> = PageResponse::new(vec![], 1, 10, 0);
        assert_eq!(resp.meta.total_pages, 1);

        let resp: PageResponse<u8> = PageResponse::new(vec![], 1, 10, 95);
        assert_eq!(resp.meta.total_pages, 10);

        let resp: PageResponse<u8> = PageResponse::new(vec![], 1, 10, 100);
        assert_eq!(resp.meta.total_pages, 10);
    }

    #[test]
    fn test_defaults() {
        let req = PageRequest::default();
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, 10);
    }
}
