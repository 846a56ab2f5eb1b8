//! Page-based slicing of the processed sequence.
//!
//! An alternative to windowing for presentations that page instead of scroll.

use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::error::{Result, RowviewError};

/// Page sizes offered by the page-size selector.
pub const PAGE_SIZES: [usize; 5] = [10, 20, 30, 40, 50];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: 10,
        }
    }
}

impl Pagination {
    /// # Errors
    /// Returns `InvalidConfig` if `page_size` is 0.
    pub fn new(page_size: usize) -> Result<Self> {
        let mut pagination = Self::default();
        pagination.set_page_size(page_size)?;
        Ok(pagination)
    }

    /// Number of pages; an empty sequence still has one (empty) page.
    pub fn page_count(&self, total_rows: usize) -> usize {
        total_rows.div_ceil(self.page_size.max(1)).max(1)
    }

    /// Processed indices on the current page, clamped to `total_rows`.
    pub fn page_range(&self, total_rows: usize) -> Range<usize> {
        let start = self
            .page_index
            .saturating_mul(self.page_size)
            .min(total_rows);
        let end = start.saturating_add(self.page_size).min(total_rows);
        start..end
    }

    pub fn can_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next(&self, total_rows: usize) -> bool {
        self.page_index + 1 < self.page_count(total_rows)
    }

    pub fn next_page(&mut self, total_rows: usize) {
        if self.can_next(total_rows) {
            self.page_index += 1;
        }
    }

    pub fn previous_page(&mut self) {
        self.page_index = self.page_index.saturating_sub(1);
    }

    pub fn first_page(&mut self) {
        self.page_index = 0;
    }

    pub fn last_page(&mut self, total_rows: usize) {
        self.page_index = self.page_count(total_rows) - 1;
    }

    /// Keep the page index valid after the sequence shrank.
    pub fn clamp(&mut self, total_rows: usize) {
        self.page_index = self.page_index.min(self.page_count(total_rows) - 1);
    }

    /// # Errors
    /// Returns `InvalidConfig` if `page_size` is 0.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        if page_size == 0 {
            return Err(RowviewError::InvalidConfig(
                "pageSize must be at least 1".to_string(),
            ));
        }
        self.page_size = page_size;
        self.page_index = 0;
        Ok(())
    }
}
