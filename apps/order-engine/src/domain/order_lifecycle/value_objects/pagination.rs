//! Page requests and pagination metadata for order listings.

use serde::{Deserialize, Serialize};

/// Default page size when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Hard upper bound on page size.
pub const MAX_PAGE_SIZE: u32 = 100;

/// A normalized page window.
///
/// `page` is 1-based and at least 1; `limit` is always within
/// `[1, MAX_PAGE_SIZE]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Normalize a requested window: page 0 becomes 1, limit is clamped into
    /// `[1, MAX_PAGE_SIZE]`.
    #[must_use]
    pub fn new(page: u32, limit: u32) -> Self {
        Self::with_max(page, limit, MAX_PAGE_SIZE)
    }

    /// Like [`PageRequest::new`] with a tighter (configured) upper bound.
    /// The bound itself never exceeds `MAX_PAGE_SIZE` and never drops below 1.
    #[must_use]
    pub fn with_max(page: u32, limit: u32, max_limit: u32) -> Self {
        let max_limit = max_limit.clamp(1, MAX_PAGE_SIZE);
        Self {
            page: page.max(1),
            limit: limit.clamp(1, max_limit),
        }
    }

    /// 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Page size.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of orders to skip: `(page - 1) * limit`.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// Pagination metadata returned alongside a page of orders.
///
/// Always internally consistent: `total_pages == ceil(total / limit)`,
/// `has_next == page < total_pages`, `has_previous == page > 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Total number of orders matching the filter.
    pub total: u64,
    /// Number of pages at this page size.
    pub total_pages: u64,
    /// Whether a later page exists.
    pub has_next: bool,
    /// Whether an earlier page exists.
    pub has_previous: bool,
}

impl Pagination {
    /// Build pagination metadata for a window and a total count.
    #[must_use]
    pub fn new(request: PageRequest, total: u64) -> Self {
        let limit = u64::from(request.limit());
        let total_pages = total.div_ceil(limit);
        let page = request.page();
        Self {
            page,
            limit: request.limit(),
            total,
            total_pages,
            has_next: u64::from(page) < total_pages,
            has_previous: page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn limit_is_clamped_to_maximum() {
        assert_eq!(PageRequest::new(1, 500).limit(), 100);
        assert_eq!(PageRequest::new(1, 0).limit(), 1);
        assert_eq!(PageRequest::new(1, 35).limit(), 35);
    }

    #[test]
    fn page_zero_becomes_first_page() {
        let request = PageRequest::new(0, 20);
        assert_eq!(request.page(), 1);
        assert_eq!(request.offset(), 0);
    }

    #[test]
    fn configured_max_tightens_the_clamp() {
        assert_eq!(PageRequest::with_max(1, 80, 50).limit(), 50);
        assert_eq!(PageRequest::with_max(1, 80, 500).limit(), 80);
        assert_eq!(PageRequest::with_max(1, 80, 0).limit(), 1);
    }

    #[test]
    fn offset_is_page_minus_one_times_limit() {
        assert_eq!(PageRequest::new(3, 20).offset(), 40);
    }

    #[test]
    fn default_window() {
        let request = PageRequest::default();
        assert_eq!(request.page(), 1);
        assert_eq!(request.limit(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn empty_result_has_no_pages() {
        let p = Pagination::new(PageRequest::new(1, 20), 0);
        assert_eq!(p.total_pages, 0);
        assert!(!p.has_next);
        assert!(!p.has_previous);
    }

    #[test]
    fn middle_page_has_both_neighbours() {
        let p = Pagination::new(PageRequest::new(2, 10), 25);
        assert_eq!(p.total_pages, 3);
        assert!(p.has_next);
        assert!(p.has_previous);
    }

    #[test]
    fn last_page_has_no_next() {
        let p = Pagination::new(PageRequest::new(3, 10), 25);
        assert!(!p.has_next);
        assert!(p.has_previous);
    }

    #[test]
    fn serializes_camel_case() {
        let p = Pagination::new(PageRequest::new(1, 10), 11);
        let json = serde_json::to_value(p).unwrap();
        assert_eq!(json["totalPages"], 2);
        assert_eq!(json["hasNext"], true);
        assert_eq!(json["hasPrevious"], false);
    }

    proptest! {
        #[test]
        fn pagination_is_internally_consistent(
            total in 0u64..100_000,
            limit in 0u32..1_000,
            page in 0u32..10_000,
        ) {
            let request = PageRequest::new(page, limit);
            let p = Pagination::new(request, total);

            prop_assert!(p.limit >= 1 && p.limit <= MAX_PAGE_SIZE);
            prop_assert!(p.page >= 1);
            prop_assert_eq!(p.total_pages, total.div_ceil(u64::from(p.limit)));
            prop_assert_eq!(p.has_next, u64::from(p.page) < p.total_pages);
            prop_assert_eq!(p.has_previous, p.page > 1);
        }
    }
}
