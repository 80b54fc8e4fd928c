//! Pagination types
//!
//! Pages are 1-indexed. An empty result still has one (empty) page so the
//! page indicator never reads "page 1 of 0".

use serde::{Deserialize, Serialize};

/// Maximum items per page
pub const MAX_PER_PAGE: usize = 100;

/// Pagination parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (1-indexed)
    pub page: usize,
    /// Items per page (max 100)
    pub per_page: usize,
}

impl Pagination {
    /// Create pagination with validation.
    ///
    /// - Page is clamped to minimum of 1
    /// - Per page is clamped to 1..=100
    pub fn new(page: usize, per_page: usize) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.per_page
    }

    /// Number of pages needed for `total` items (at least 1).
    pub fn total_pages(&self, total: usize) -> usize {
        total_pages(total, self.per_page)
    }

    /// Same page size, page pulled back inside `1..=total_pages`.
    pub fn clamped(&self, total: usize) -> Self {
        Self {
            page: self.page.min(self.total_pages(total)),
            per_page: self.per_page,
        }
    }

    /// Item range `[offset, offset + per_page)` cut to `total`.
    pub fn window(&self, total: usize) -> std::ops::Range<usize> {
        let start = self.offset().min(total);
        let end = (self.offset() + self.per_page).min(total);
        start..end
    }
}

/// Number of pages for `total` items, never less than 1
pub fn total_pages(total: usize, per_page: usize) -> usize {
    total.div_ceil(per_page.max(1)).max(1)
}

/// One page of a derived view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items for current page
    pub items: Vec<T>,
    /// Total count across all pages (after filtering)
    pub total: usize,
    /// Current page number
    pub page: usize,
    /// Items per page
    pub per_page: usize,
}

impl<T> Page<T> {
    /// Calculate total number of pages.
    pub fn total_pages(&self) -> usize {
        total_pages(self.total, self.per_page)
    }

    /// Check if there's a next page.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Check if there's a previous page.
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// 1-indexed first and last item shown; `(0, 0)` when nothing is shown.
    pub fn showing(&self) -> (usize, usize) {
        if self.items.is_empty() {
            (0, 0)
        } else {
            let first = (self.page - 1) * self.per_page + 1;
            (first, first + self.items.len() - 1)
        }
    }

    /// "showing X–Y of Z" summary line
    pub fn summary(&self) -> String {
        let (first, last) = self.showing();
        format!("Mostrando {}–{} de {}", first, last, self.total)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(len: usize, total: usize, page: usize, per_page: usize) -> Page<()> {
        Page {
            items: vec![(); len],
            total,
            page,
            per_page,
        }
    }

    #[test]
    fn offset_calculation() {
        assert_eq!(Pagination::new(1, 10).offset(), 0);
        assert_eq!(Pagination::new(2, 10).offset(), 10);
        assert_eq!(Pagination::new(3, 25).offset(), 50);
    }

    #[test]
    fn clamps_page_and_size() {
        assert_eq!(Pagination::new(0, 10).page, 1);
        assert_eq!(Pagination::new(1, 0).per_page, 1);
        assert_eq!(Pagination::new(1, 999).per_page, MAX_PER_PAGE);
    }

    #[test]
    fn total_pages_counts() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(100, 10), 10);
        assert_eq!(total_pages(12, 5), 3);
    }

    #[test]
    fn window_is_partial_on_last_page() {
        let p = Pagination::new(3, 5);
        assert_eq!(p.window(12), 10..12);
        assert_eq!(Pagination::new(4, 5).window(12), 12..12);
    }

    #[test]
    fn clamped_pulls_page_back() {
        assert_eq!(Pagination::new(7, 5).clamped(12).page, 3);
        assert_eq!(Pagination::new(2, 5).clamped(0).page, 1);
    }

    #[test]
    fn has_next_prev() {
        let first = page_of(10, 30, 1, 10);
        assert!(first.has_next());
        assert!(!first.has_prev());

        let middle = page_of(10, 30, 2, 10);
        assert!(middle.has_next());
        assert!(middle.has_prev());

        let last = page_of(10, 30, 3, 10);
        assert!(!last.has_next());
        assert!(last.has_prev());
    }

    #[test]
    fn showing_window() {
        assert_eq!(page_of(2, 12, 3, 5).showing(), (11, 12));
        assert_eq!(page_of(0, 0, 1, 5).showing(), (0, 0));
        assert_eq!(page_of(2, 12, 3, 5).summary(), "Mostrando 11–12 de 12");
    }
}
