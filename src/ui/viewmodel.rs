//! View model types representing renderable grid state.
//!
//! This module defines immutable view models computed from controller state.
//! View models are optimized for rendering: cells are already projected to
//! display strings in column order, and header sort indicators and page
//! counters are precomputed.
//!
//! # Architecture
//!
//! View models are created via `AppState::compute_viewmodel()` and consumed by
//! the host page. They contain no business logic, only display-ready data, and
//! serialize to JSON for hand-off across the host boundary.
//!
//! # Example
//!
//! ```rust
//! use tabula::{AppState, Record, RowIndex, Schema};
//!
//! let engine = RowIndex::new(vec![Record::new().with("id", "a")], Schema::new("id"))?;
//! let state = AppState::new(engine, vec!["id".into()], 10);
//!
//! let vm = state.compute_viewmodel();
//! assert_eq!(vm.rows[0].cells, ["a"]);
//! let json = serde_json::to_string(&vm)?;
//! assert!(json.contains("\"page_count\":1"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::domain::{Record, RowId, SortDirection};
use serde::Serialize;

/// Complete view model for rendering one grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridViewModel {
    /// Header cells, the selection checkbox column first.
    pub headers: Vec<HeaderCell>,

    /// Rows of the current page.
    pub rows: Vec<RowItem>,

    /// Pagination counters.
    pub page: PageInfo,

    /// Selection summary for the select-all checkbox.
    pub selection: SelectionInfo,

    /// Current search box text.
    pub search_query: String,

    /// Optional empty state message (when no rows are visible).
    pub empty_state: Option<EmptyState>,
}

/// One header cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderCell {
    /// Header position; 0 is the selection column.
    pub index: usize,

    /// Data column name, `None` for the selection column.
    pub column: Option<String>,

    /// Sort indicator to draw.
    pub sort: SortDirection,
}

/// Display information for a single row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowItem {
    /// Row identifier.
    pub id: RowId,

    /// Cell display strings in column order.
    pub cells: Vec<String>,

    /// Whether the row's checkbox is ticked.
    pub is_selected: bool,

    /// Full record, for editors that need typed values.
    pub record: Record,
}

/// Pagination counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    /// Zero-based current page.
    pub page: usize,

    pub page_size: usize,

    /// Number of pages, at least one.
    pub page_count: usize,

    pub total_rows: usize,

    pub filtered_count: usize,

    /// One-based position of the first row on this page, 0 when the page is empty.
    pub first_row: usize,

    /// One-based position of the last row on this page.
    pub last_row: usize,
}

/// Selection summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectionInfo {
    pub selected_count: usize,

    /// Every filtered row is selected.
    pub all_selected: bool,
}

/// Empty state message display information.
///
/// Shown when no rows are visible, distinguishing an empty grid from a
/// search or filter that matched nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    /// Primary message (e.g., "No matching rows").
    pub message: String,

    /// Secondary explanatory text.
    pub subtitle: String,
}
