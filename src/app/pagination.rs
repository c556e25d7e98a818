//! Page bookkeeping for the row window.
//!
//! Pages are zero-based. An empty result still has one (empty) page so the
//! current page is always a valid index.

/// Current page and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(crate::DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    /// Creates pagination on the first page. A size of zero is coerced to one.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 0,
            page_size: page_size.max(1),
        }
    }

    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Offset of the first row of the current page.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.page.saturating_mul(self.page_size)
    }

    /// Number of pages for `row_count` rows, at least one.
    #[must_use]
    pub const fn page_count(&self, row_count: usize) -> usize {
        let pages = row_count.div_ceil(self.page_size);
        if pages == 0 {
            1
        } else {
            pages
        }
    }

    /// Index of the last page for `row_count` rows.
    #[must_use]
    pub const fn last_page(&self, row_count: usize) -> usize {
        self.page_count(row_count) - 1
    }

    /// Moves to `page`, clamped to the valid range. Returns `true` if the page changed.
    pub fn go_to(&mut self, page: usize, row_count: usize) -> bool {
        self.set_page(page.min(self.last_page(row_count)))
    }

    pub fn next(&mut self, row_count: usize) -> bool {
        self.go_to(self.page.saturating_add(1), row_count)
    }

    pub fn prev(&mut self) -> bool {
        self.set_page(self.page.saturating_sub(1))
    }

    /// Returns to the first page.
    pub fn reset(&mut self) -> bool {
        self.set_page(0)
    }

    /// Pulls the current page back inside the valid range.
    pub fn clamp(&mut self, row_count: usize) -> bool {
        self.go_to(self.page, row_count)
    }

    /// Changes the page size and re-clamps the current page.
    ///
    /// Returns `true` if either the size or the page changed.
    pub fn set_page_size(&mut self, page_size: usize, row_count: usize) -> bool {
        let page_size = page_size.max(1);
        let resized = page_size != self.page_size;
        self.page_size = page_size;
        let moved = self.clamp(row_count);
        resized || moved
    }

    fn set_page(&mut self, page: usize) -> bool {
        let changed = page != self.page;
        self.page = page;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_is_at_least_one() {
        let pagination = Pagination::new(10);
        assert_eq!(pagination.page_count(0), 1);
        assert_eq!(pagination.page_count(10), 1);
        assert_eq!(pagination.page_count(11), 2);
    }

    #[test]
    fn navigation_clamps() {
        let mut pagination = Pagination::new(10);
        assert!(pagination.go_to(7, 25));
        assert_eq!(pagination.page(), 2);
        assert!(!pagination.next(25));
        assert!(pagination.prev());
        assert!(pagination.prev());
        assert!(!pagination.prev());
        assert_eq!(pagination.page(), 0);
    }

    #[test]
    fn shrinking_results_reclamps() {
        let mut pagination = Pagination::new(10);
        pagination.go_to(4, 50);
        assert!(pagination.clamp(12));
        assert_eq!(pagination.page(), 1);
    }

    #[test]
    fn page_size_change_reclamps() {
        let mut pagination = Pagination::new(5);
        pagination.go_to(3, 20);
        assert!(pagination.set_page_size(10, 20));
        assert_eq!(pagination.page(), 1);
        assert!(pagination.set_page_size(0, 20));
        assert_eq!(pagination.page_size(), 1);
    }
}
