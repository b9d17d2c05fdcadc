//! Parts table engine.
//!
//! DESIGN
//! ======
//! `PartsTable` owns the normalized rows plus the table state (filters,
//! sort keys, page cursor, selection, hidden columns). Views are derived on
//! demand in a fixed pipeline: filter → sort → paginate. Nothing is cached,
//! so every mutation is immediately reflected in the next `view()`.
//!
//! Manual reordering edits the underlying row order only. It does not clear
//! or re-run the active sort; with a sort active, a drag is visible only
//! among rows whose sort keys compare equal.

pub mod columns;
pub mod filter;
pub mod pagination;
pub mod reorder;
pub mod selection;
pub mod sort;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::part::{self, Part, Status};
use columns::{ColumnId, ColumnVisibility};
use filter::ColumnFilters;
use pagination::{PageSize, Pagination};
use selection::{PageSelection, RowSelection};
use sort::SortKey;

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("unknown row id: {0}")]
    UnknownRow(i64),
    #[error("column {0} is not sortable")]
    NotSortable(ColumnId),
    #[error("column {0} has no filter")]
    NotFilterable(ColumnId),
    #[error("column {0} cannot be hidden")]
    NotHideable(ColumnId),
    #[error("invalid page size {0} (expected one of 10, 20, 30, 40, 50)")]
    InvalidPageSize(usize),
    #[error("unknown status: {0}")]
    UnknownStatus(String),
}

// =============================================================================
// VIEW
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ColumnHeader {
    pub id: ColumnId,
    pub header: &'static str,
    pub sortable: bool,
    /// `"asc"` / `"desc"` when this column is part of the active sort.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sorted: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RowView {
    pub id: i64,
    pub selected: bool,
    pub cells: Map<String, Value>,
}

/// Everything a client needs to draw the table and its controls.
#[derive(Debug, Clone, Serialize)]
pub struct TableView {
    pub columns: Vec<ColumnHeader>,
    pub rows: Vec<RowView>,
    pub page_index: usize,
    pub page_count: usize,
    pub page_size: usize,
    pub can_previous: bool,
    pub can_next: bool,
    pub total_rows: usize,
    pub filtered_rows: usize,
    pub selected_rows: usize,
    pub page_selection: PageSelection,
    pub filters: ColumnFilters,
    pub sorting: Vec<SortKey>,
    pub status_options: Vec<Status>,
}

// =============================================================================
// TABLE
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct PartsTable {
    data: Vec<Part>,
    filters: ColumnFilters,
    sorting: Vec<SortKey>,
    pagination: Pagination,
    selection: RowSelection,
    visibility: ColumnVisibility,
}

impl PartsTable {
    #[must_use]
    pub fn new(data: Vec<Part>) -> Self {
        Self { data, ..Self::default() }
    }

    /// Build a table straight from upstream rows.
    #[must_use]
    pub fn from_raw(raw: &[Value]) -> Self {
        Self::new(part::load_parts(raw))
    }

    #[must_use]
    pub fn data(&self) -> &[Part] {
        &self.data
    }

    #[must_use]
    pub fn filters(&self) -> &ColumnFilters {
        &self.filters
    }

    #[must_use]
    pub fn sorting(&self) -> &[SortKey] {
        &self.sorting
    }

    #[must_use]
    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    // -------------------------------------------------------------------------
    // filters
    // -------------------------------------------------------------------------

    /// Set or clear one column filter; resets to the first page.
    ///
    /// # Errors
    ///
    /// See [`ColumnFilters::set`].
    pub fn set_filter(&mut self, column: ColumnId, value: Option<&str>) -> Result<(), TableError> {
        self.filters.set(column, value)?;
        self.pagination.first();
        Ok(())
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.pagination.first();
    }

    /// Rows passing every active filter, in underlying order.
    #[must_use]
    pub fn filtered_rows(&self) -> Vec<&Part> {
        self.data.iter().filter(|p| self.filters.matches(p)).collect()
    }

    #[must_use]
    pub fn status_options(&self) -> Vec<Status> {
        filter::status_options(&self.data)
    }

    // -------------------------------------------------------------------------
    // sorting
    // -------------------------------------------------------------------------

    /// Replace the sort keys; resets to the first page.
    ///
    /// # Errors
    ///
    /// Returns `NotSortable` if any key targets a widget column.
    pub fn set_sorting(&mut self, sorting: Vec<SortKey>) -> Result<(), TableError> {
        self.sorting = sort::normalize_sorting(sorting)?;
        self.pagination.first();
        Ok(())
    }

    /// Header-click sort toggle; resets to the first page.
    ///
    /// # Errors
    ///
    /// Returns `NotSortable` for widget columns.
    pub fn toggle_sort(&mut self, column: ColumnId, multi: bool) -> Result<(), TableError> {
        sort::toggle_sorting(&mut self.sorting, column, multi)?;
        self.pagination.first();
        Ok(())
    }

    /// Filtered rows in sort order.
    #[must_use]
    pub fn sorted_rows(&self) -> Vec<&Part> {
        let mut rows = self.filtered_rows();
        sort::sort_rows(&mut rows, &self.sorting);
        rows
    }

    // -------------------------------------------------------------------------
    // pagination
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn page_rows(&self) -> Vec<&Part> {
        let rows = self.sorted_rows();
        let range = self.pagination.range(rows.len());
        rows[range].to_vec()
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pagination.page_count(self.filtered_rows().len())
    }

    /// # Errors
    ///
    /// Returns `InvalidPageSize` for sizes outside the offered set.
    pub fn set_page_size(&mut self, size: usize) -> Result<(), TableError> {
        self.pagination.set_page_size(PageSize::try_from(size)?);
        Ok(())
    }

    pub fn set_page_index(&mut self, index: usize) {
        let rows = self.filtered_rows().len();
        self.pagination.set_page_index(index, rows);
    }

    pub fn first_page(&mut self) {
        self.pagination.first();
    }

    pub fn previous_page(&mut self) {
        self.pagination.previous();
    }

    pub fn next_page(&mut self) {
        let rows = self.filtered_rows().len();
        self.pagination.next(rows);
    }

    pub fn last_page(&mut self) {
        let rows = self.filtered_rows().len();
        self.pagination.last(rows);
    }

    // -------------------------------------------------------------------------
    // reorder / selection / visibility
    // -------------------------------------------------------------------------

    /// Drag `source` onto `target` in the underlying list.
    pub fn reorder(&mut self, source: i64, target: i64) -> bool {
        let moved = reorder::move_row(&mut self.data, source, target);
        debug!(source, target, moved, "table reorder");
        moved
    }

    /// # Errors
    ///
    /// Returns `UnknownRow` if no row has this id.
    pub fn toggle_row_selected(&mut self, id: i64, value: Option<bool>) -> Result<(), TableError> {
        if !self.data.iter().any(|p| p.id == id) {
            return Err(TableError::UnknownRow(id));
        }
        self.selection.toggle(id, value);
        Ok(())
    }

    /// Header checkbox: select or clear every row on the current page.
    pub fn toggle_all_page_rows_selected(&mut self, value: bool) {
        let ids: Vec<i64> = self.page_rows().iter().map(|p| p.id).collect();
        self.selection.set_all(ids, value);
    }

    /// Selected rows among the filtered set.
    #[must_use]
    pub fn selected_filtered_count(&self) -> usize {
        self.selection.count_in(self.filtered_rows().iter().map(|p| p.id))
    }

    /// # Errors
    ///
    /// Returns `NotHideable` for the product column and widget columns.
    pub fn set_column_visibility(&mut self, column: ColumnId, visible: bool) -> Result<(), TableError> {
        self.visibility.set(column, visible)
    }

    // -------------------------------------------------------------------------
    // view
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn view(&self) -> TableView {
        let sorted = self.sorted_rows();
        let filtered_rows = sorted.len();
        let page = &sorted[self.pagination.range(filtered_rows)];
        let visible = self.visibility.visible_data_columns();

        let columns = visible
            .iter()
            .map(|&id| ColumnHeader {
                id,
                header: id.header(),
                sortable: id.is_sortable(),
                sorted: self
                    .sorting
                    .iter()
                    .find(|k| k.column == id)
                    .map(|k| if k.desc { "desc" } else { "asc" }),
            })
            .collect();

        let rows = page
            .iter()
            .map(|part| RowView {
                id: part.id,
                selected: self.selection.is_selected(part.id),
                cells: visible.iter().map(|c| (c.as_str().to_owned(), c.cell(part))).collect(),
            })
            .collect();

        let page_ids: Vec<i64> = page.iter().map(|p| p.id).collect();

        TableView {
            columns,
            rows,
            page_index: self.pagination.effective_index(filtered_rows),
            page_count: self.pagination.page_count(filtered_rows),
            page_size: self.pagination.page_size.get(),
            can_previous: self.pagination.can_previous(),
            can_next: self.pagination.can_next(filtered_rows),
            total_rows: self.data.len(),
            filtered_rows,
            selected_rows: self.selected_filtered_count(),
            page_selection: self.selection.page_state(&page_ids),
            filters: self.filters.clone(),
            sorting: self.sorting.clone(),
            status_options: self.status_options(),
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
