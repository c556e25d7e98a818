//! Command dispatch from the host page into the controller.
//!
//! This module implements the event handler that processes UI commands and
//! translates them into controller calls. It is the narrow contract through
//! which header clicks, edits, search input, filter changes, paging and
//! selection reach the grid.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. The host page sends an [`Event`], typically as JSON
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. The returned flag tells the host whether to re-render
//!
//! # Wire Format
//!
//! Events are internally tagged by `type`:
//!
//! ```json
//! {"type": "header_clicked", "column_index": 2}
//! {"type": "update_cell", "id": "7", "column": "amount", "value": "100"}
//! {"type": "add_filter", "column": "amount", "operator": "gt", "value": 6}
//! ```
//!
//! # Example
//!
//! ```rust
//! use tabula::{handle_event, AppState, Event, Record, RowIndex, Schema};
//!
//! let engine = RowIndex::new(vec![Record::new().with("id", "1")], Schema::new("id"))?;
//! let mut state = AppState::new(engine, vec!["id".into()], 10);
//!
//! let event = Event::from_json(r#"{"type": "header_clicked", "column_index": 1}"#)?;
//! assert!(handle_event(&mut state, &event)?);
//! # Ok::<(), tabula::TabulaError>(())
//! ```

use super::state::AppState;
use crate::domain::{FilterPredicate, Record, Result, RowId};
use serde::{Deserialize, Serialize};

/// Commands sent by the host page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A header cell was clicked. Index 0 is the selection column.
    HeaderClicked {
        column_index: usize,
    },

    /// Same as a header click, addressed by column name.
    SortByColumn {
        column: String,
    },

    /// A cell editor committed a new text value.
    UpdateCell {
        id: RowId,
        column: String,
        value: String,
    },

    AddRow {
        record: Record,
    },

    DeleteRow {
        id: RowId,
    },

    /// The search box text changed.
    SetSearchQuery {
        query: String,
    },

    /// Adds a filter, replacing any filter on the same column.
    AddFilter(FilterPredicate),

    RemoveFilter {
        column: String,
    },

    ClearFilters,

    ToggleRowSelection {
        id: RowId,
    },

    /// The select-all checkbox was clicked.
    ToggleSelectAll,

    ClearSelection,

    GoToPage {
        page: usize,
    },

    NextPage,

    PrevPage,

    SetPageSize {
        page_size: usize,
    },
}

impl Event {
    /// Decodes an event from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns `Command` if the JSON does not describe a known event.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Processes an event and reports whether the grid needs to re-render.
///
/// Commands the engine rejects as `NotFound` or `DuplicateKey` are no-ops
/// and return `Ok(false)`.
///
/// # Errors
///
/// Returns `MissingIdentifier` when an added row has no identifier value.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event for debugging.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<bool> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    let changed = match event {
        Event::HeaderClicked { column_index } => state.click_header(*column_index),
        Event::SortByColumn { column } => state.sort_by_name(column),
        Event::UpdateCell { id, column, value } => state.update_cell(id, column, value)?,
        Event::AddRow { record } => state.add_row(record.clone())?,
        Event::DeleteRow { id } => state.delete_row(id)?,
        Event::SetSearchQuery { query } => state.set_search_query(query),
        Event::AddFilter(predicate) => state.add_filter(predicate.clone()),
        Event::RemoveFilter { column } => state.remove_filter(column)?,
        Event::ClearFilters => state.clear_filters(),
        Event::ToggleRowSelection { id } => state.toggle_row(id),
        Event::ToggleSelectAll => state.toggle_select_all(),
        Event::ClearSelection => state.clear_selection(),
        Event::GoToPage { page } => state.go_to_page(*page),
        Event::NextPage => state.next_page(),
        Event::PrevPage => state.prev_page(),
        Event::SetPageSize { page_size } => state.set_page_size(*page_size),
    };

    tracing::trace!(
        changed,
        page = state.page(),
        filtered_count = state.snapshot().filtered_count,
        "event handled"
    );
    Ok(changed)
}
