//! Row store and derived indices.
//!
//! [`RowIndex`] owns every record of a grid together with the views derived
//! from them:
//!
//! - **Display index**: all row ids in the order of the current sort
//! - **Filtered index**: the subsequence of the display index passing the
//!   search query and every active filter
//! - **Search key cache**: lowercased searchable text per row
//! - **Sort key cache**: numeric comparison keys per typed column
//!
//! Every public mutator finishes all dependent index work before it returns,
//! so the indices never go stale between calls. Rejected operations return an
//! error before touching any state.
//!
//! # Example
//!
//! ```rust
//! use tabula::{FilterOperator, FilterPredicate, Record, RowIndex, Schema, SortDirection};
//!
//! let records = vec![
//!     Record::new().with("id", "1").with("amount", 10),
//!     Record::new().with("id", "2").with("amount", 5),
//!     Record::new().with("id", "3").with("amount", 20),
//! ];
//! let mut index = RowIndex::new(records, Schema::new("id").numeric(["amount"]))?;
//!
//! index.sort_by("amount", SortDirection::Ascending);
//! assert_eq!(index.display_index(), ["2", "1", "3"]);
//!
//! let snapshot = index.add_filter(FilterPredicate::new("amount", FilterOperator::GreaterThan, 6));
//! assert_eq!(snapshot.filtered_count, 2);
//! # Ok::<(), tabula::TabulaError>(())
//! ```

use super::cache::{SearchKeyCache, SortKeyCache};
use super::order::{compare_cells, compare_keys};
use super::snapshot::Snapshot;
use crate::domain::record::NULL;
use crate::domain::{
    CellValue, FilterPredicate, Record, Result, RowId, Schema, SortDirection, SortState,
    TabulaError,
};
use std::collections::HashMap;

/// Canonical record set of one grid and all of its derived indices.
#[derive(Debug, Clone)]
pub struct RowIndex {
    schema: Schema,
    rows: HashMap<RowId, Record>,
    /// Row ids in insertion order; the base sequence every sort starts from.
    insertion: Vec<RowId>,
    display: Vec<RowId>,
    filtered: Vec<RowId>,
    search_keys: SearchKeyCache,
    sort_keys: SortKeyCache,
    sort: SortState,
    search_query: String,
    filters: Vec<FilterPredicate>,
}

impl RowIndex {
    /// Builds the store and every index from an initial batch.
    ///
    /// The display index starts in insertion order and the filtered index
    /// starts as the full display index.
    ///
    /// # Errors
    ///
    /// - `MissingIdentifier` if a record has no value for the identifier field
    /// - `DuplicateKey` if two records share an identifier
    pub fn new(records: Vec<Record>, schema: Schema) -> Result<Self> {
        let _span = tracing::debug_span!("row_index_new",
            record_count = records.len(),
            id_field = %schema.id_field
        ).entered();

        let mut index = Self {
            sort_keys: SortKeyCache::new(&schema),
            search_keys: SearchKeyCache::default(),
            rows: HashMap::with_capacity(records.len()),
            insertion: Vec::with_capacity(records.len()),
            display: Vec::new(),
            filtered: Vec::new(),
            sort: SortState::default(),
            search_query: String::new(),
            filters: Vec::new(),
            schema,
        };

        for (position, record) in records.into_iter().enumerate() {
            let id = record.id(&index.schema.id_field).ok_or_else(|| {
                TabulaError::MissingIdentifier {
                    field: index.schema.id_field.clone(),
                    index: Some(position),
                }
            })?;

            if index.rows.contains_key(&id) {
                return Err(TabulaError::DuplicateKey(id));
            }

            index.insert_unchecked(id, record);
        }

        index.display.clone_from(&index.insertion);
        index.filtered.clone_from(&index.display);

        tracing::debug!(total_rows = index.rows.len(), "row index built");
        Ok(index)
    }

    /// Sorts the display index and recomputes the filtered index.
    ///
    /// [`SortDirection::None`] orders rows by identifier. Otherwise typed
    /// columns compare their cached keys and other columns compare raw cells.
    /// Ties keep insertion order.
    pub fn sort_by(&mut self, column: &str, direction: SortDirection) -> Snapshot {
        let _span =
            tracing::debug_span!("sort_by", column = %column, direction = ?direction).entered();

        self.sort = SortState {
            column: Some(column.to_string()),
            direction,
        };
        self.reorder();
        self.refilter();

        self.snapshot()
    }

    /// Stores `value` in one cell and brings every index up to date.
    ///
    /// Editing the identifier column re-keys the row. A typed column receiving
    /// a value it cannot coerce keeps its previous sort key.
    ///
    /// # Errors
    ///
    /// - `NotFound` if `id` is not in the store
    /// - `DuplicateKey` if an identifier edit collides with another row
    /// - `MissingIdentifier` if an identifier edit stores `Null`
    pub fn update_cell(
        &mut self,
        id: &str,
        column: &str,
        value: impl Into<CellValue>,
    ) -> Result<Snapshot> {
        let value = value.into();
        let _span = tracing::debug_span!("update_cell", row_id = %id, column = %column).entered();

        if !self.rows.contains_key(id) {
            return Err(TabulaError::not_found("row", id));
        }

        let key = if column == self.schema.id_field {
            self.rekey(id, &value)?
        } else {
            id.to_string()
        };

        let record = self
            .rows
            .get_mut(&key)
            .ok_or_else(|| TabulaError::not_found("row", key.as_str()))?;
        record.set(column, value.clone());

        if self.schema.is_searchable(column) {
            self.search_keys.refresh(&key, record, &self.schema);
        }

        if let Some(kind) = self.schema.key_kind(column) {
            if let Err(e) = self.sort_keys.refresh(&key, column, &value, kind) {
                tracing::debug!(row_id = %key, error = %e, "keeping previous sort key");
            }
        }

        let needs_reorder = match self.sort.active_column() {
            Some(active) => active == column,
            None => self.sort.in_effect() && column == self.schema.id_field,
        };
        if needs_reorder {
            self.reorder();
        }
        self.refilter();

        Ok(self.snapshot())
    }

    /// Inserts a new record.
    ///
    /// The row is appended to the display index until a sort has been applied.
    /// After that it is placed by the current sort, `none` included.
    ///
    /// # Errors
    ///
    /// - `MissingIdentifier` if the record has no identifier value
    /// - `DuplicateKey` if the identifier is already present
    pub fn add_row(&mut self, record: Record) -> Result<Snapshot> {
        let id = record
            .id(&self.schema.id_field)
            .ok_or_else(|| TabulaError::MissingIdentifier {
                field: self.schema.id_field.clone(),
                index: None,
            })?;
        let _span = tracing::debug_span!("add_row", row_id = %id).entered();

        if self.rows.contains_key(&id) {
            return Err(TabulaError::DuplicateKey(id));
        }

        self.insert_unchecked(id.clone(), record);
        self.display.push(id);

        if self.sort.in_effect() {
            self.reorder();
        }
        self.refilter();

        Ok(self.snapshot())
    }

    /// Removes a record from the store, every index and every cache.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `id` is not in the store.
    pub fn delete_row(&mut self, id: &str) -> Result<Snapshot> {
        let _span = tracing::debug_span!("delete_row", row_id = %id).entered();

        if self.rows.remove(id).is_none() {
            return Err(TabulaError::not_found("row", id));
        }

        self.insertion.retain(|row| row != id);
        self.display.retain(|row| row != id);
        self.filtered.retain(|row| row != id);
        self.search_keys.remove(id);
        self.sort_keys.remove(id);

        Ok(self.snapshot())
    }

    /// Sets the free-text search query; empty clears it.
    ///
    /// The query is always evaluated from the full display index together
    /// with the active filters, never against the previous search result.
    pub fn filter_by_search(&mut self, query: &str) -> Snapshot {
        let _span = tracing::debug_span!("filter_by_search", query_len = query.len()).entered();

        self.search_query = query.to_string();
        self.refilter();

        self.snapshot()
    }

    /// Adds a column filter, replacing any existing filter on the same column.
    pub fn add_filter(&mut self, predicate: FilterPredicate) -> Snapshot {
        let _span = tracing::debug_span!("add_filter",
            column = %predicate.column,
            operator = %predicate.operator
        ).entered();

        match self.filters.iter_mut().find(|f| f.column == predicate.column) {
            Some(existing) => *existing = predicate,
            None => self.filters.push(predicate),
        }
        self.refilter();

        self.snapshot()
    }

    /// Removes the filter on `column`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no filter is active on `column`.
    pub fn remove_filter(&mut self, column: &str) -> Result<Snapshot> {
        let _span = tracing::debug_span!("remove_filter", column = %column).entered();

        let position = self
            .filters
            .iter()
            .position(|f| f.column == column)
            .ok_or_else(|| TabulaError::not_found("filter", column))?;
        self.filters.remove(position);
        self.refilter();

        Ok(self.snapshot())
    }

    /// Removes every column filter. The search query stays.
    pub fn clear_filters(&mut self) -> Snapshot {
        let _span = tracing::debug_span!("clear_filters", removed = self.filters.len()).entered();

        self.filters.clear();
        self.refilter();

        self.snapshot()
    }

    /// Returns the records of the filtered index in `[offset, offset + limit)`.
    ///
    /// Offsets past the end yield an empty vector.
    #[must_use]
    pub fn visible_rows(&self, offset: usize, limit: usize) -> Vec<Record> {
        self.filtered
            .iter()
            .skip(offset)
            .take(limit)
            .filter_map(|id| self.rows.get(id))
            .cloned()
            .collect()
    }

    /// Returns a snapshot of the current state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            filtered_rows: self.visible_rows(0, self.filtered.len()),
            total_rows: self.rows.len(),
            filtered_count: self.filtered.len(),
            current_sort: self.sort.clone(),
            active_filters: self.filters.clone(),
        }
    }

    #[must_use]
    pub fn record(&self, id: &str) -> Option<&Record> {
        self.rows.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.rows.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn display_index(&self) -> &[RowId] {
        &self.display
    }

    #[must_use]
    pub fn filtered_index(&self) -> &[RowId] {
        &self.filtered
    }

    /// Iterates over the filtered row ids in display order.
    pub fn filtered_ids(&self) -> impl Iterator<Item = &str> {
        self.filtered.iter().map(String::as_str)
    }

    #[must_use]
    pub fn search_key(&self, id: &str) -> Option<&str> {
        self.search_keys.get(id)
    }

    #[must_use]
    pub fn sort_key(&self, column: &str, id: &str) -> Option<f64> {
        self.sort_keys.get(column, id)
    }

    /// Ids of every row that holds at least one cached sort key.
    pub fn sort_key_ids(&self) -> impl Iterator<Item = &str> {
        self.sort_keys.row_ids()
    }

    #[must_use]
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    #[must_use]
    pub const fn current_sort(&self) -> &SortState {
        &self.sort
    }

    #[must_use]
    pub fn active_filters(&self) -> &[FilterPredicate] {
        &self.filters
    }

    #[must_use]
    pub const fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Adds a record to the store, insertion order and caches without
    /// touching the display or filtered index.
    fn insert_unchecked(&mut self, id: RowId, record: Record) {
        self.search_keys.refresh(&id, &record, &self.schema);
        self.sort_keys.insert_record(&id, &record, &self.schema);
        self.insertion.push(id.clone());
        self.rows.insert(id, record);
    }

    /// Moves a row to the identifier carried by `value`, returning the new key.
    fn rekey(&mut self, id: &str, value: &CellValue) -> Result<RowId> {
        if value.is_null() {
            return Err(TabulaError::MissingIdentifier {
                field: self.schema.id_field.clone(),
                index: None,
            });
        }

        let new_id = value.to_string();
        if new_id == id {
            return Ok(new_id);
        }
        if self.rows.contains_key(&new_id) {
            return Err(TabulaError::DuplicateKey(new_id));
        }

        let record = self
            .rows
            .remove(id)
            .ok_or_else(|| TabulaError::not_found("row", id))?;
        self.rows.insert(new_id.clone(), record);

        for slot in self
            .insertion
            .iter_mut()
            .chain(self.display.iter_mut())
            .chain(self.filtered.iter_mut())
            .filter(|slot| slot.as_str() == id)
        {
            slot.clone_from(&new_id);
        }
        self.search_keys.rekey(id, &new_id);
        self.sort_keys.rekey(id, &new_id);

        tracing::debug!(from = %id, to = %new_id, "row re-keyed");
        Ok(new_id)
    }

    /// Rebuilds the display index from insertion order and the sort state.
    fn reorder(&mut self) {
        let mut ids = self.insertion.clone();

        match self.sort.active_column() {
            None => ids.sort_unstable(),
            Some(column) => {
                let descending = self.sort.direction == SortDirection::Descending;

                if let Some(keys) = self.sort_keys.column(column) {
                    let policy = self.schema.missing_sort_keys;
                    ids.sort_by(|a, b| {
                        compare_keys(keys.get(a).copied(), keys.get(b).copied(), policy, descending)
                    });
                } else {
                    let cell = |id: &RowId| {
                        self.rows.get(id).map_or(&NULL, |record| record.get(column))
                    };
                    ids.sort_by(|a, b| {
                        let ordering = compare_cells(cell(a), cell(b));
                        if descending {
                            ordering.reverse()
                        } else {
                            ordering
                        }
                    });
                }
            }
        }

        self.display = ids;
    }

    /// Recomputes the filtered index from the full display index.
    fn refilter(&mut self) {
        let needle = self.search_query.to_lowercase();

        let filtered: Vec<RowId> = self
            .display
            .iter()
            .filter(|id| self.passes(id, &needle))
            .cloned()
            .collect();

        tracing::trace!(
            filtered_count = filtered.len(),
            total_rows = self.display.len(),
            filter_count = self.filters.len(),
            "filtered index rebuilt"
        );
        self.filtered = filtered;
    }

    fn passes(&self, id: &str, needle: &str) -> bool {
        if !needle.is_empty() && !self.search_keys.matches(id, needle) {
            return false;
        }

        let Some(record) = self.rows.get(id) else {
            return false;
        };

        self.filters.iter().all(|predicate| {
            predicate.matches(record.get(&predicate.column), self.schema.is_date(&predicate.column))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FilterOperator, MissingKeyPolicy};

    fn amounts() -> RowIndex {
        let records = vec![
            Record::new().with("id", "1").with("amount", 10).with("name", "Alpha"),
            Record::new().with("id", "2").with("amount", 5).with("name", "Bravo"),
            Record::new().with("id", "3").with("amount", 20).with("name", "Charlie"),
        ];
        RowIndex::new(records, Schema::new("id").numeric(["amount"]).searchable(["name"])).unwrap()
    }

    fn ids(slice: &[RowId]) -> Vec<&str> {
        slice.iter().map(String::as_str).collect()
    }

    #[test]
    fn new_keeps_insertion_order() {
        let index = amounts();
        assert_eq!(ids(index.display_index()), ["1", "2", "3"]);
        assert_eq!(ids(index.filtered_index()), ["1", "2", "3"]);
        assert_eq!(index.search_key("2"), Some("bravo"));
        assert_eq!(index.sort_key("amount", "3"), Some(20.0));
    }

    #[test]
    fn new_rejects_missing_and_duplicate_ids() {
        let missing = RowIndex::new(
            vec![Record::new().with("id", "1"), Record::new().with("name", "x")],
            Schema::new("id"),
        );
        assert!(matches!(
            missing,
            Err(TabulaError::MissingIdentifier { index: Some(1), .. })
        ));

        let duplicate = RowIndex::new(
            vec![Record::new().with("id", 1), Record::new().with("id", "1")],
            Schema::new("id"),
        );
        assert!(matches!(duplicate, Err(TabulaError::DuplicateKey(id)) if id == "1"));
    }

    #[test]
    fn sort_filter_edit_scenario() {
        let mut index = amounts();

        index.sort_by("amount", SortDirection::Ascending);
        assert_eq!(ids(index.display_index()), ["2", "1", "3"]);

        index.add_filter(FilterPredicate::new("amount", FilterOperator::GreaterThan, 6));
        assert_eq!(ids(index.filtered_index()), ["1", "3"]);

        index.update_cell("2", "amount", "100").unwrap();
        let snapshot = index.sort_by("amount", SortDirection::Ascending);
        assert_eq!(ids(index.display_index()), ["1", "3", "2"]);
        assert_eq!(ids(index.filtered_index()), ["1", "3", "2"]);
        assert_eq!(snapshot.filtered_count, 3);
        assert_eq!(index.record("2").unwrap().get("amount"), &CellValue::from("100"));
    }

    #[test]
    fn editing_sort_column_resorts_immediately() {
        let mut index = amounts();
        index.sort_by("amount", SortDirection::Descending);
        assert_eq!(ids(index.display_index()), ["3", "1", "2"]);

        index.update_cell("2", "amount", 50).unwrap();
        assert_eq!(ids(index.display_index()), ["2", "3", "1"]);
    }

    #[test]
    fn sort_none_restores_identifier_order() {
        let records = ["b", "c", "a"]
            .into_iter()
            .map(|id| Record::new().with("id", id))
            .collect();
        let mut index = RowIndex::new(records, Schema::new("id")).unwrap();
        assert_eq!(ids(index.display_index()), ["b", "c", "a"]);

        index.sort_by("id", SortDirection::Descending);
        index.sort_by("id", SortDirection::None);
        assert_eq!(ids(index.display_index()), ["a", "b", "c"]);
    }

    #[test]
    fn sort_none_keeps_identifier_order_through_edits() {
        let records = ["b", "d"]
            .into_iter()
            .map(|id| Record::new().with("id", id))
            .collect();
        let mut index = RowIndex::new(records, Schema::new("id")).unwrap();
        index.sort_by("id", SortDirection::Descending);
        index.sort_by("id", SortDirection::None);

        index.add_row(Record::new().with("id", "a")).unwrap();
        assert_eq!(ids(index.display_index()), ["a", "b", "d"]);

        index.update_cell("d", "id", "c0").unwrap();
        assert_eq!(ids(index.display_index()), ["a", "b", "c0"]);
        assert_eq!(ids(index.filtered_index()), ["a", "b", "c0"]);
    }

    #[test]
    fn unsorted_index_appends_in_insertion_order() {
        let records = ["b", "d"]
            .into_iter()
            .map(|id| Record::new().with("id", id))
            .collect();
        let mut index = RowIndex::new(records, Schema::new("id")).unwrap();

        index.add_row(Record::new().with("id", "a")).unwrap();
        index.update_cell("d", "id", "c0").unwrap();
        assert_eq!(ids(index.display_index()), ["b", "c0", "a"]);
    }

    #[test]
    fn untyped_columns_compare_raw_values() {
        let mut index = amounts();
        index.sort_by("name", SortDirection::Descending);
        assert_eq!(ids(index.display_index()), ["3", "2", "1"]);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let records = vec![
            Record::new().with("id", "x").with("group", "b"),
            Record::new().with("id", "y").with("group", "a"),
            Record::new().with("id", "z").with("group", "b"),
            Record::new().with("id", "w").with("group", "a"),
        ];
        let mut index = RowIndex::new(records, Schema::new("id")).unwrap();

        index.sort_by("group", SortDirection::Ascending);
        assert_eq!(ids(index.display_index()), ["y", "w", "x", "z"]);

        index.sort_by("group", SortDirection::Descending);
        assert_eq!(ids(index.display_index()), ["x", "z", "y", "w"]);
    }

    #[test]
    fn missing_keys_follow_policy() {
        let records = vec![
            Record::new().with("id", "a").with("delta", -3),
            Record::new().with("id", "b"),
            Record::new().with("id", "c").with("delta", 4),
        ];

        let schema = Schema::new("id").numeric(["delta"]);
        let mut last = RowIndex::new(records.clone(), schema.clone()).unwrap();
        last.sort_by("delta", SortDirection::Ascending);
        assert_eq!(ids(last.display_index()), ["a", "c", "b"]);
        last.sort_by("delta", SortDirection::Descending);
        assert_eq!(ids(last.display_index()), ["c", "a", "b"]);

        let schema = schema.missing_sort_keys(MissingKeyPolicy::Zero);
        let mut zero = RowIndex::new(records, schema).unwrap();
        zero.sort_by("delta", SortDirection::Ascending);
        assert_eq!(ids(zero.display_index()), ["a", "b", "c"]);
    }

    #[test]
    fn unparsable_edit_keeps_sort_key() {
        let mut index = amounts();
        index.update_cell("1", "amount", "lots").unwrap();
        assert_eq!(index.sort_key("amount", "1"), Some(10.0));
        assert_eq!(index.record("1").unwrap().get("amount"), &CellValue::from("lots"));
    }

    #[test]
    fn update_unknown_row_is_not_found() {
        let mut index = amounts();
        let err = index.update_cell("9", "amount", 1).unwrap_err();
        assert!(matches!(err, TabulaError::NotFound { what: "row", .. }));
    }

    #[test]
    fn searchable_edit_refreshes_search_key() {
        let mut index = amounts();
        index.filter_by_search("delta");
        assert_eq!(index.filtered_index().len(), 0);

        index.update_cell("3", "name", "Delta").unwrap();
        assert_eq!(ids(index.filtered_index()), ["3"]);
        assert_eq!(index.search_key("3"), Some("delta"));
    }

    #[test]
    fn identifier_edit_rekeys_row() {
        let mut index = amounts();
        index.sort_by("amount", SortDirection::Ascending);
        index.update_cell("2", "id", "7").unwrap();

        assert!(!index.contains("2"));
        assert_eq!(index.record("7").unwrap().get("amount"), &CellValue::Number(5.0));
        assert_eq!(ids(index.display_index()), ["7", "1", "3"]);
        assert_eq!(index.sort_key("amount", "7"), Some(5.0));
        assert_eq!(index.search_key("7"), Some("bravo"));
        assert_eq!(index.search_key("2"), None);
    }

    #[test]
    fn identifier_edit_onto_existing_id_is_rejected() {
        let mut index = amounts();
        let before = index.snapshot();
        let err = index.update_cell("2", "id", "3").unwrap_err();
        assert!(matches!(err, TabulaError::DuplicateKey(id) if id == "3"));
        assert_eq!(index.snapshot(), before);
    }

    #[test]
    fn add_row_places_by_active_sort() {
        let mut index = amounts();
        index.add_row(Record::new().with("id", "4").with("amount", 1)).unwrap();
        assert_eq!(ids(index.display_index()), ["1", "2", "3", "4"]);

        index.sort_by("amount", SortDirection::Ascending);
        index.add_row(Record::new().with("id", "5").with("amount", 7)).unwrap();
        assert_eq!(ids(index.display_index()), ["4", "2", "5", "1", "3"]);
    }

    #[test]
    fn duplicate_add_leaves_state_unchanged() {
        let mut index = amounts();
        index.sort_by("amount", SortDirection::Ascending);
        let display = index.display_index().to_vec();
        let filtered = index.filtered_index().to_vec();
        let before = index.snapshot();

        let err = index.add_row(Record::new().with("id", "1").with("amount", 1)).unwrap_err();
        assert!(matches!(err, TabulaError::DuplicateKey(_)));
        assert_eq!(index.display_index(), display.as_slice());
        assert_eq!(index.filtered_index(), filtered.as_slice());
        assert_eq!(index.snapshot(), before);
        assert_eq!(index.sort_key("amount", "1"), Some(10.0));
    }

    #[test]
    fn delete_row_purges_every_index() {
        let mut index = amounts();
        index.sort_by("amount", SortDirection::Ascending);
        index.add_filter(FilterPredicate::new("amount", FilterOperator::GreaterThan, 6));

        let snapshot = index.delete_row("1").unwrap();
        assert_eq!(snapshot.total_rows, 2);
        assert_eq!(snapshot.filtered_count, 1);
        assert_eq!(ids(index.display_index()), ["2", "3"]);
        assert_eq!(ids(index.filtered_index()), ["3"]);
        assert_eq!(index.search_key("1"), None);
        assert_eq!(index.sort_key("amount", "1"), None);

        assert!(index.delete_row("1").is_err());
    }

    #[test]
    fn search_does_not_compound_with_previous_search() {
        let mut index = amounts();
        index.add_filter(FilterPredicate::new("amount", FilterOperator::LessThan, 15));

        index.filter_by_search("alp");
        assert_eq!(ids(index.filtered_index()), ["1"]);
        index.filter_by_search("bra");
        assert_eq!(ids(index.filtered_index()), ["2"]);
        index.filter_by_search("");
        assert_eq!(ids(index.filtered_index()), ["1", "2"]);
    }

    #[test]
    fn add_filter_replaces_same_column() {
        let mut index = amounts();
        index.add_filter(FilterPredicate::new("amount", FilterOperator::GreaterThan, 6));
        let snapshot =
            index.add_filter(FilterPredicate::new("amount", FilterOperator::LessThan, 6));
        assert_eq!(snapshot.active_filters.len(), 1);
        assert_eq!(ids(index.filtered_index()), ["2"]);

        index.remove_filter("amount").unwrap();
        assert_eq!(index.filtered_index().len(), 3);
        assert!(matches!(
            index.remove_filter("amount"),
            Err(TabulaError::NotFound { what: "filter", .. })
        ));
    }

    #[test]
    fn visible_rows_slices_filtered_index() {
        let index = amounts();
        let rows = index.visible_rows(1, 5);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("id"), &CellValue::from("2"));
        assert!(index.visible_rows(3, 5).is_empty());
        assert!(index.visible_rows(100, 5).is_empty());
    }
}
