//! Per-record caches derived from cell values.
//!
//! Both caches are keyed by row identifier and maintained by the engine's
//! mutators, so they are consistent whenever a public engine call returns.

use crate::domain::{CellValue, KeyKind, Record, RowId, Schema, TabulaError};
use std::collections::HashMap;

/// Lowercased searchable text per row.
#[derive(Debug, Clone, Default)]
pub struct SearchKeyCache {
    keys: HashMap<RowId, String>,
}

impl SearchKeyCache {
    /// Builds the search key of `record`: searchable values joined by a space.
    #[must_use]
    pub fn compute(record: &Record, schema: &Schema) -> String {
        schema
            .searchable
            .iter()
            .map(|column| record.get(column).to_string())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }

    /// Recomputes the key of one row.
    pub fn refresh(&mut self, id: &str, record: &Record, schema: &Schema) {
        let key = Self::compute(record, schema);
        tracing::trace!(row_id = %id, search_key = %key, "search key refreshed");
        self.keys.insert(id.to_string(), key);
    }

    /// Returns `true` if the key of `id` contains `needle`, which must already be lowercase.
    #[must_use]
    pub fn matches(&self, id: &str, needle: &str) -> bool {
        self.keys.get(id).is_some_and(|key| key.contains(needle))
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&str> {
        self.keys.get(id).map(String::as_str)
    }

    pub fn remove(&mut self, id: &str) {
        self.keys.remove(id);
    }

    pub fn rekey(&mut self, from: &str, to: &str) {
        if let Some(key) = self.keys.remove(from) {
            self.keys.insert(to.to_string(), key);
        }
    }
}

/// Canonical comparison keys for every typed column.
///
/// Each typed column of the schema owns one map, even while it is empty, so
/// "is this column typed" and "does this column have a map" are the same
/// question.
#[derive(Debug, Clone, Default)]
pub struct SortKeyCache {
    columns: HashMap<String, HashMap<RowId, f64>>,
}

impl SortKeyCache {
    /// Creates empty maps for the typed columns of `schema`.
    #[must_use]
    pub fn new(schema: &Schema) -> Self {
        Self {
            columns: schema
                .typed_columns()
                .map(|(column, _)| (column.to_string(), HashMap::new()))
                .collect(),
        }
    }

    /// Computes the comparison key of `value` for a column of kind `kind`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn key_for(value: &CellValue, kind: KeyKind) -> Option<f64> {
        match kind {
            KeyKind::Date => value.as_timestamp_millis().map(|millis| millis as f64),
            KeyKind::Number => value.as_number(),
        }
    }

    /// Fills in keys for every typed column of a newly inserted row.
    ///
    /// Values that cannot be coerced leave the row without a key.
    pub fn insert_record(&mut self, id: &str, record: &Record, schema: &Schema) {
        for (column, kind) in schema.typed_columns() {
            let value = record.get(column);
            match Self::key_for(value, kind) {
                Some(key) => {
                    if let Some(keys) = self.columns.get_mut(column) {
                        keys.insert(id.to_string(), key);
                    }
                }
                None if !value.is_null() => {
                    tracing::trace!(
                        row_id = %id,
                        column = %column,
                        value = %value,
                        "no sort key for value"
                    );
                }
                None => {}
            }
        }
    }

    /// Refreshes the key of one cell after an edit.
    ///
    /// `Null` clears the key. Any other value that cannot be coerced keeps the
    /// previous key and reports [`TabulaError::UnparsableTypedValue`].
    ///
    /// # Errors
    ///
    /// Returns `UnparsableTypedValue` when `value` is neither null nor coercible.
    pub fn refresh(
        &mut self,
        id: &str,
        column: &str,
        value: &CellValue,
        kind: KeyKind,
    ) -> Result<(), TabulaError> {
        let Some(keys) = self.columns.get_mut(column) else {
            return Ok(());
        };

        if value.is_null() {
            keys.remove(id);
            return Ok(());
        }

        let key = Self::key_for(value, kind).ok_or_else(|| TabulaError::UnparsableTypedValue {
            column: column.to_string(),
            value: value.to_string(),
        })?;
        keys.insert(id.to_string(), key);
        Ok(())
    }

    /// Returns the keys of `column` if it is typed.
    #[must_use]
    pub fn column(&self, column: &str) -> Option<&HashMap<RowId, f64>> {
        self.columns.get(column)
    }

    #[must_use]
    pub fn get(&self, column: &str, id: &str) -> Option<f64> {
        self.columns.get(column)?.get(id).copied()
    }

    /// Drops every key of `id`.
    pub fn remove(&mut self, id: &str) {
        for keys in self.columns.values_mut() {
            keys.remove(id);
        }
    }

    pub fn rekey(&mut self, from: &str, to: &str) {
        for keys in self.columns.values_mut() {
            if let Some(key) = keys.remove(from) {
                keys.insert(to.to_string(), key);
            }
        }
    }

    /// Iterates over every row id that holds at least one key.
    pub fn row_ids(&self) -> impl Iterator<Item = &str> {
        self.columns
            .values()
            .flat_map(HashMap::keys)
            .map(String::as_str)
    }
}
