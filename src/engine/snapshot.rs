//! Read-only state bundle returned by engine operations.

use crate::domain::{FilterPredicate, Record, SortState};
use serde::{Deserialize, Serialize};

/// Consistent copy of the engine's visible state.
///
/// Snapshots are owned clones; mutating one has no effect on the engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Records of the filtered index, in display order.
    pub filtered_rows: Vec<Record>,
    /// Number of records in the store.
    pub total_rows: usize,
    /// Number of records passing search and filters.
    pub filtered_count: usize,
    /// Sort the display order follows.
    pub current_sort: SortState,
    /// Active column filters, in the order they were first added.
    pub active_filters: Vec<FilterPredicate>,
}
