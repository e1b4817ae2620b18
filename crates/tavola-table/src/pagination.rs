//! Pagination state
//!
//! Zero-based page index plus page size. The total comes from the last
//! successful fetch; until one arrives the page count is unknown and forward
//! navigation is allowed.

use serde::{Deserialize, Serialize};

/// Page size options offered when a page does not declare its own
pub const DEFAULT_PAGE_SIZES: &[usize] = &[10, 20, 50, 100];

/// Pagination state for one table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationState {
    page_index: usize,
    page_size: usize,
    /// Total rows in the result set, from the last successful fetch
    total: Option<u64>,
    available_page_sizes: Vec<usize>,
}

impl PaginationState {
    /// Create pagination on the first page. A zero page size is raised to one.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size: page_size.max(1),
            total: None,
            available_page_sizes: DEFAULT_PAGE_SIZES.to_vec(),
        }
    }

    pub fn with_available_page_sizes(mut self, sizes: impl Into<Vec<usize>>) -> Self {
        let mut sizes: Vec<usize> = sizes.into().into_iter().filter(|s| *s > 0).collect();
        sizes.sort_unstable();
        sizes.dedup();
        if !sizes.is_empty() {
            self.available_page_sizes = sizes;
        }
        self
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total(&self) -> Option<u64> {
        self.total
    }

    pub fn available_page_sizes(&self) -> &[usize] {
        &self.available_page_sizes
    }

    pub fn set_total(&mut self, total: Option<u64>) {
        self.total = total;
    }

    /// Number of pages, at least one, once the total is known
    pub fn page_count(&self) -> Option<usize> {
        self.total.map(|total| {
            let size = self.page_size as u64;
            let pages = total.saturating_add(size - 1) / size;
            pages.clamp(1, usize::MAX as u64) as usize
        })
    }

    /// Row offset of the first row on the current page
    pub fn offset(&self) -> usize {
        self.page_index.saturating_mul(self.page_size)
    }

    pub fn can_go_next(&self) -> bool {
        match self.page_count() {
            Some(count) => self.page_index + 1 < count,
            None => true,
        }
    }

    pub fn can_go_prev(&self) -> bool {
        self.page_index > 0
    }

    /// Jump to a page. Rejected when the index is past the last known page.
    pub fn go_to(&mut self, page_index: usize) -> bool {
        if page_index == self.page_index {
            return false;
        }
        if let Some(count) = self.page_count() {
            if page_index >= count {
                return false;
            }
        }
        self.page_index = page_index;
        true
    }

    pub fn go_next(&mut self) -> bool {
        self.can_go_next() && self.go_to(self.page_index + 1)
    }

    pub fn go_prev(&mut self) -> bool {
        self.can_go_prev() && self.go_to(self.page_index - 1)
    }

    pub fn go_first(&mut self) -> bool {
        self.go_to(0)
    }

    pub fn go_last(&mut self) -> bool {
        match self.page_count() {
            Some(count) => self.go_to(count - 1),
            None => false,
        }
    }

    /// Back to the first page. Returns whether the index moved.
    pub fn reset(&mut self) -> bool {
        std::mem::replace(&mut self.page_index, 0) != 0
    }

    /// Change the page size.
    ///
    /// With `reset_page` the index returns to 0; otherwise it is clamped to the
    /// last page under the new size. Returns false for a zero or unchanged size.
    pub fn set_page_size(&mut self, page_size: usize, reset_page: bool) -> bool {
        if page_size == 0 || page_size == self.page_size {
            return false;
        }
        self.page_size = page_size;
        if reset_page {
            self.page_index = 0;
        } else if let Some(count) = self.page_count() {
            self.page_index = self.page_index.min(count - 1);
        }
        true
    }

    /// "21-25 of 25" style summary; `rows_on_page` is the size of the loaded page
    pub fn range_label(&self, rows_on_page: usize) -> String {
        let Some(total) = self.total else {
            return format!("Page {}", self.page_index + 1);
        };
        if total == 0 || rows_on_page == 0 {
            return format!("0 of {}", total);
        }
        let first = self.offset() as u64 + 1;
        let last = (self.offset() + rows_on_page) as u64;
        format!("{}-{} of {}", first, last.min(total), total)
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZES[0])
    }
}
