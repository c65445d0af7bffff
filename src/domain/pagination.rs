use serde::{Deserialize, Serialize};

/// Window over the server-side collection.
///
/// Invariants: `pages == ceil(total / limit)` and
/// `1 <= page <= max(pages, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            total: 0,
            pages: 0,
        }
    }
}

impl Pagination {
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let limit = limit.max(1);
        let pages = Self::pages_for(total, limit);
        let mut pagination = Self {
            page: 1,
            limit,
            total,
            pages,
        };
        pagination.page = pagination.clamp_page(page);
        pagination
    }

    pub fn pages_for(total: u64, limit: u32) -> u32 {
        let limit = u64::from(limit.max(1));
        u32::try_from(total.div_ceil(limit)).unwrap_or(u32::MAX)
    }

    /// Clamp a requested page into `1..=max(pages, 1)`.
    pub fn clamp_page(&self, requested: u32) -> u32 {
        requested.clamp(1, self.pages.max(1))
    }

    /// Recompute `pages` and clamp `page` from `total` and `limit`, so a
    /// server response that disagrees with itself cannot leak an
    /// out-of-range page into local state.
    pub fn normalized(self) -> Self {
        Self::new(self.page, self.limit, self.total)
    }

    pub fn is_consistent(&self) -> bool {
        self.limit > 0
            && self.pages == Self::pages_for(self.total, self.limit)
            && self.page >= 1
            && self.page <= self.pages.max(1)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_page_count_by_ceiling() {
        let pagination = Pagination::new(1, 10, 25);
        assert_eq!(pagination.pages, 3);
        assert!(pagination.is_consistent());
        assert_eq!(Pagination::new(1, 10, 30).pages, 3);
        assert_eq!(Pagination::new(1, 10, 0).pages, 0);
    }

    #[test]
    fn out_of_range_page_is_clamped() {
        let pagination = Pagination::new(1, 10, 25);
        assert_eq!(pagination.clamp_page(4), 3);
        assert_eq!(pagination.clamp_page(0), 1);
        assert_eq!(Pagination::new(4, 10, 25).page, 3);
    }

    #[test]
    fn empty_collection_still_has_page_one() {
        let pagination = Pagination::new(7, 10, 0);
        assert_eq!(pagination.page, 1);
        assert!(pagination.is_consistent());
        assert!(!pagination.has_next());
        assert!(!pagination.has_prev());
    }

    #[test]
    fn normalizes_inconsistent_server_metadata() {
        let raw = Pagination {
            page: 9,
            limit: 10,
            total: 21,
            pages: 1,
        };
        assert!(!raw.is_consistent());
        let fixed = raw.normalized();
        assert_eq!(fixed.pages, 3);
        assert_eq!(fixed.page, 3);
        assert!(fixed.is_consistent());
    }

    #[test]
    fn zero_limit_is_treated_as_one() {
        let pagination = Pagination::new(1, 0, 4);
        assert_eq!(pagination.limit, 1);
        assert_eq!(pagination.pages, 4);
    }

    #[test]
    fn navigation_flags_follow_position() {
        let middle = Pagination::new(2, 10, 25);
        assert!(middle.has_prev());
        assert!(middle.has_next());
        let last = Pagination::new(3, 10, 25);
        assert!(!last.has_next());
    }
}
