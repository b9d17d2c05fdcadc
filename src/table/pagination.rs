//! Page slicing over the filtered and sorted rows.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::TableError;

/// Page sizes offered by the rows-per-page selector.
pub const PAGE_SIZES: [usize; 5] = [10, 20, 30, 40, 50];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(usize);

impl PageSize {
    #[must_use]
    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(PAGE_SIZES[0])
    }
}

impl TryFrom<usize> for PageSize {
    type Error = TableError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        if PAGE_SIZES.contains(&value) { Ok(Self(value)) } else { Err(TableError::InvalidPageSize(value)) }
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> Self {
        size.0
    }
}

/// Zero-based page cursor. Row counts are passed in because they depend on
/// the active filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page_index: usize,
    pub page_size: PageSize,
}

impl Pagination {
    /// `ceil(rows / page_size)`; zero rows means zero pages.
    #[must_use]
    pub fn page_count(&self, rows: usize) -> usize {
        rows.div_ceil(self.page_size.get())
    }

    #[must_use]
    pub fn can_previous(&self) -> bool {
        self.page_index > 0
    }

    #[must_use]
    pub fn can_next(&self, rows: usize) -> bool {
        self.page_index + 1 < self.page_count(rows)
    }

    pub fn first(&mut self) {
        self.page_index = 0;
    }

    pub fn previous(&mut self) {
        if self.can_previous() {
            self.page_index -= 1;
        }
    }

    pub fn next(&mut self, rows: usize) {
        if self.can_next(rows) {
            self.page_index += 1;
        }
    }

    pub fn last(&mut self, rows: usize) {
        if self.can_next(rows) {
            self.page_index = self.page_count(rows) - 1;
        }
    }

    /// Jump to a page, clamped to the last existing page.
    pub fn set_page_index(&mut self, index: usize, rows: usize) {
        self.page_index = index.min(self.page_count(rows).saturating_sub(1));
    }

    /// Change the page size, keeping the current top row on screen.
    pub fn set_page_size(&mut self, size: PageSize) {
        let top_row = self.page_index * self.page_size.get();
        self.page_size = size;
        self.page_index = top_row / size.get();
    }

    /// Page index that actually exists for `rows`.
    #[must_use]
    pub fn effective_index(&self, rows: usize) -> usize {
        self.page_index.min(self.page_count(rows).saturating_sub(1))
    }

    /// Row range of the current page.
    #[must_use]
    pub fn range(&self, rows: usize) -> Range<usize> {
        let size = self.page_size.get();
        let start = (self.effective_index(rows) * size).min(rows);
        let end = (start + size).min(rows);
        start..end
    }
}

#[cfg(test)]
#[path = "pagination_test.rs"]
mod tests;
