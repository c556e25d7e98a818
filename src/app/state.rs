//! Controller state layered over the row index.
//!
//! This module defines [`AppState`], the interaction controller of a grid. It
//! owns the [`RowIndex`] together with the UI state that is not part of the
//! indexed data: the current page, the page size, the selected rows, the
//! search box text and the column list that maps header positions to columns.
//!
//! # Architecture
//!
//! Every intent goes through the engine first. The returned [`Snapshot`] is
//! stored, the page is clamped against the new filtered count, and the row
//! window is re-requested from the engine. Rejected edits (`NotFound`,
//! `DuplicateKey`) leave all of that untouched.
//!
//! # Column Indices
//!
//! Header index 0 is the selection checkbox. Header index `n >= 1` is data
//! column `n - 1`.
//!
//! # Example
//!
//! ```rust
//! use tabula::{AppState, Record, RowIndex, Schema};
//!
//! let records = vec![
//!     Record::new().with("id", "1").with("amount", 10),
//!     Record::new().with("id", "2").with("amount", 5),
//! ];
//! let engine = RowIndex::new(records, Schema::new("id").numeric(["amount"]))?;
//! let mut state = AppState::new(engine, vec!["id".into(), "amount".into()], 25);
//!
//! state.click_header(2);
//! assert_eq!(state.visible_rows()[0].get("id").to_string(), "2");
//! # Ok::<(), tabula::TabulaError>(())
//! ```

use super::pagination::Pagination;
use crate::domain::{
    CellValue, FilterPredicate, Record, Result, RowId, SortDirection,
};
use crate::engine::{RowIndex, Snapshot};
use crate::ui::viewmodel::{EmptyState, GridViewModel, HeaderCell, PageInfo, RowItem, SelectionInfo};
use std::collections::BTreeSet;

/// Interaction controller of one grid.
#[derive(Debug, Clone)]
pub struct AppState {
    engine: RowIndex,
    snapshot: Snapshot,
    columns: Vec<String>,
    pagination: Pagination,
    selected: BTreeSet<RowId>,
    search_query: String,
    window: Vec<Record>,
}

impl AppState {
    /// Wraps an engine with fresh controller state on the first page.
    ///
    /// When `columns` is empty the column list is derived from the engine:
    /// the identifier field first, then the remaining columns of the first
    /// displayed record in name order.
    #[must_use]
    pub fn new(engine: RowIndex, columns: Vec<String>, page_size: usize) -> Self {
        let columns = if columns.is_empty() {
            derive_columns(&engine)
        } else {
            columns
        };

        let mut state = Self {
            snapshot: engine.snapshot(),
            engine,
            columns,
            pagination: Pagination::new(page_size),
            selected: BTreeSet::new(),
            search_query: String::new(),
            window: Vec::new(),
        };
        state.refresh_window();
        state
    }

    #[must_use]
    pub const fn engine(&self) -> &RowIndex {
        &self.engine
    }

    /// Latest snapshot published by the engine.
    #[must_use]
    pub const fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Data columns in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Resolves a header index to its data column; `None` for the checkbox column.
    #[must_use]
    pub fn column_for_index(&self, ui_index: usize) -> Option<&str> {
        ui_index
            .checked_sub(1)
            .and_then(|data_index| self.columns.get(data_index))
            .map(String::as_str)
    }

    #[must_use]
    pub const fn page(&self) -> usize {
        self.pagination.page()
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.pagination.page_size()
    }

    #[must_use]
    pub const fn page_count(&self) -> usize {
        self.pagination.page_count(self.snapshot.filtered_count)
    }

    #[must_use]
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Records of the current page, as last requested from the engine.
    #[must_use]
    pub fn visible_rows(&self) -> &[Record] {
        &self.window
    }

    /// Handles a click on header `ui_index`.
    ///
    /// Clicking the active column cycles `none → asc → desc → none`; any other
    /// column starts at ascending. The checkbox column and out-of-range
    /// indices are ignored. Returns `true` if the grid changed.
    pub fn click_header(&mut self, ui_index: usize) -> bool {
        let Some(column) = self.column_for_index(ui_index).map(str::to_string) else {
            tracing::debug!(ui_index, "header click ignored");
            return false;
        };
        self.sort_by_name(&column)
    }

    /// Applies the header-click cycle to `column` by name.
    pub fn sort_by_name(&mut self, column: &str) -> bool {
        let current = &self.snapshot.current_sort;
        let direction = if current.column.as_deref() == Some(column) {
            current.direction.cycle()
        } else {
            SortDirection::Ascending
        };

        tracing::debug!(column = %column, direction = ?direction, "sort triggered");
        let snapshot = self.engine.sort_by(column, direction);
        self.pagination.reset();
        self.apply_snapshot(snapshot);
        true
    }

    /// Replaces the search text and returns to the first page.
    pub fn set_search_query(&mut self, query: &str) -> bool {
        query.clone_into(&mut self.search_query);
        let snapshot = self.engine.filter_by_search(query);
        self.pagination.reset();
        self.apply_snapshot(snapshot);
        true
    }

    /// Adds or replaces a column filter and returns to the first page.
    pub fn add_filter(&mut self, predicate: FilterPredicate) -> bool {
        let snapshot = self.engine.add_filter(predicate);
        self.pagination.reset();
        self.apply_snapshot(snapshot);
        true
    }

    /// Removes the filter on `column`; a no-op when the column is unfiltered.
    ///
    /// # Errors
    ///
    /// Propagates engine errors other than `NotFound`/`DuplicateKey`.
    pub fn remove_filter(&mut self, column: &str) -> Result<bool> {
        let result = self.engine.remove_filter(column);
        let changed = self.absorb(result)?;
        if changed && self.pagination.reset() {
            self.refresh_window();
        }
        Ok(changed)
    }

    /// Removes every column filter and returns to the first page.
    pub fn clear_filters(&mut self) -> bool {
        let snapshot = self.engine.clear_filters();
        self.pagination.reset();
        self.apply_snapshot(snapshot);
        true
    }

    /// Stores a new text value in one cell.
    ///
    /// Editing the identifier column renames the row in the selection too.
    ///
    /// # Errors
    ///
    /// Propagates engine errors other than `NotFound`/`DuplicateKey`.
    pub fn update_cell(&mut self, id: &str, column: &str, value: &str) -> Result<bool> {
        let result = self
            .engine
            .update_cell(id, column, CellValue::from(value));
        let changed = self.absorb(result)?;

        if changed && column == self.engine.schema().id_field && self.selected.remove(id) {
            self.selected.insert(value.to_string());
        }
        Ok(changed)
    }

    /// Inserts a new record.
    ///
    /// # Errors
    ///
    /// Propagates `MissingIdentifier`; duplicates are a no-op.
    pub fn add_row(&mut self, record: Record) -> Result<bool> {
        let result = self.engine.add_row(record);
        self.absorb(result)
    }

    /// Deletes a record and drops it from the selection.
    ///
    /// # Errors
    ///
    /// Propagates engine errors other than `NotFound`/`DuplicateKey`.
    pub fn delete_row(&mut self, id: &str) -> Result<bool> {
        let result = self.engine.delete_row(id);
        let changed = self.absorb(result)?;
        if changed {
            self.selected.remove(id);
        }
        Ok(changed)
    }

    /// Toggles one row in the selection. Unknown ids are ignored.
    pub fn toggle_row(&mut self, id: &str) -> bool {
        if !self.engine.contains(id) {
            tracing::debug!(row_id = %id, "selection toggle for unknown row ignored");
            return false;
        }
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        }
        true
    }

    /// Toggles between an empty selection and exactly the filtered rows.
    ///
    /// Rows outside the current filter are never selected by this.
    pub fn toggle_select_all(&mut self) -> bool {
        if self.is_all_selected() {
            self.selected.clear();
        } else {
            self.selected = self.engine.filtered_ids().map(str::to_string).collect();
        }
        tracing::debug!(selected_count = self.selected.len(), "select all toggled");
        true
    }

    /// Empties the selection. Returns `false` if it was already empty.
    pub fn clear_selection(&mut self) -> bool {
        let changed = !self.selected.is_empty();
        self.selected.clear();
        changed
    }

    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// `true` when at least one row is visible and every filtered row is selected.
    #[must_use]
    pub fn is_all_selected(&self) -> bool {
        let filtered = self.engine.filtered_index();
        !filtered.is_empty() && filtered.iter().all(|id| self.selected.contains(id))
    }

    /// Selected ids in identifier order.
    pub fn selected_ids(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }

    /// Selected records in identifier order.
    #[must_use]
    pub fn selected_records(&self) -> Vec<&Record> {
        self.selected
            .iter()
            .filter_map(|id| self.engine.record(id))
            .collect()
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        let changed = self.pagination.go_to(page, self.snapshot.filtered_count);
        if changed {
            self.refresh_window();
        }
        changed
    }

    pub fn next_page(&mut self) -> bool {
        let changed = self.pagination.next(self.snapshot.filtered_count);
        if changed {
            self.refresh_window();
        }
        changed
    }

    pub fn prev_page(&mut self) -> bool {
        let changed = self.pagination.prev();
        if changed {
            self.refresh_window();
        }
        changed
    }

    /// Changes the page size (zero becomes one) and re-clamps the page.
    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        let changed = self
            .pagination
            .set_page_size(page_size, self.snapshot.filtered_count);
        if changed {
            self.refresh_window();
        }
        changed
    }

    /// Computes a render-ready view model from the current state.
    ///
    /// Rows are the current page projected onto the column list. Headers
    /// carry the sort indicator of the active column.
    #[must_use]
    pub fn compute_viewmodel(&self) -> GridViewModel {
        let id_field = &self.engine.schema().id_field;
        let sort = &self.snapshot.current_sort;

        let headers = std::iter::once(HeaderCell {
            index: 0,
            column: None,
            sort: SortDirection::None,
        })
        .chain(self.columns.iter().enumerate().map(|(i, column)| HeaderCell {
            index: i + 1,
            column: Some(column.clone()),
            sort: sort.direction_for(column),
        }))
        .collect();

        let rows = self
            .window
            .iter()
            .map(|record| {
                let id = record.id(id_field).unwrap_or_default();
                RowItem {
                    is_selected: self.selected.contains(&id),
                    cells: record.project(&self.columns),
                    record: record.clone(),
                    id,
                }
            })
            .collect();

        let filtered_count = self.snapshot.filtered_count;
        let first_row = if self.window.is_empty() {
            0
        } else {
            self.pagination.offset() + 1
        };

        GridViewModel {
            headers,
            rows,
            page: PageInfo {
                page: self.pagination.page(),
                page_size: self.pagination.page_size(),
                page_count: self.page_count(),
                total_rows: self.snapshot.total_rows,
                filtered_count,
                first_row,
                last_row: self.pagination.offset() + self.window.len(),
            },
            selection: SelectionInfo {
                selected_count: self.selected.len(),
                all_selected: self.is_all_selected(),
            },
            search_query: self.search_query.clone(),
            empty_state: self.compute_empty_state(),
        }
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        if self.snapshot.total_rows == 0 {
            Some(EmptyState {
                message: "No rows".to_string(),
                subtitle: "Add a row to get started".to_string(),
            })
        } else if self.snapshot.filtered_count == 0 {
            Some(EmptyState {
                message: "No matching rows".to_string(),
                subtitle: "Change the search or remove a filter".to_string(),
            })
        } else {
            None
        }
    }

    /// Folds an engine result into controller state.
    ///
    /// Rejections become `Ok(false)`; other errors propagate.
    fn absorb(&mut self, result: Result<Snapshot>) -> Result<bool> {
        match result {
            Ok(snapshot) => {
                self.apply_snapshot(snapshot);
                Ok(true)
            }
            Err(e) if e.is_rejection() => {
                tracing::debug!(error = %e, "command rejected, state unchanged");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    fn apply_snapshot(&mut self, snapshot: Snapshot) {
        self.snapshot = snapshot;
        self.pagination.clamp(self.snapshot.filtered_count);
        self.refresh_window();
    }

    fn refresh_window(&mut self) {
        self.window = self
            .engine
            .visible_rows(self.pagination.offset(), self.pagination.page_size());
    }
}

fn derive_columns(engine: &RowIndex) -> Vec<String> {
    let id_field = &engine.schema().id_field;
    let first = engine
        .display_index()
        .first()
        .and_then(|id| engine.record(id));

    std::iter::once(id_field.clone())
        .chain(
            first
                .into_iter()
                .flat_map(Record::columns)
                .filter(|column| *column != id_field.as_str())
                .map(str::to_string),
        )
        .collect()
}
