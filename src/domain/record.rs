//! Grid record model.
//!
//! A [`Record`] maps column names to [`CellValue`]s. Reading a column the record
//! does not carry yields [`CellValue::Null`], so predicates and comparators never
//! need to special-case sparse rows.

use super::value::CellValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Row identifier: the display form of a record's identifier field.
pub type RowId = String;

pub(crate) static NULL: CellValue = CellValue::Null;

/// One row of grid data.
///
/// Serialized transparently as a JSON object of column → scalar.
///
/// # Examples
///
/// ```
/// use tabula::{CellValue, Record};
///
/// let record = Record::new()
///     .with("id", "7")
///     .with("amount", 12.5);
///
/// assert_eq!(record.get("amount"), &CellValue::Number(12.5));
/// assert!(record.get("missing").is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    cells: BTreeMap<String, CellValue>,
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter used mostly by tests and host glue.
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.set(column, value);
        self
    }

    /// Returns the value of `column`, or `Null` when absent.
    #[must_use]
    pub fn get(&self, column: &str) -> &CellValue {
        self.cells.get(column).unwrap_or(&NULL)
    }

    /// Stores `value` under `column`, returning the previous value if any.
    pub fn set(
        &mut self,
        column: impl Into<String>,
        value: impl Into<CellValue>,
    ) -> Option<CellValue> {
        self.cells.insert(column.into(), value.into())
    }

    /// Returns the identifier of this record under `id_field`.
    ///
    /// `None` when the field is absent or null.
    #[must_use]
    pub fn id(&self, id_field: &str) -> Option<RowId> {
        match self.get(id_field) {
            CellValue::Null => None,
            value => Some(value.to_string()),
        }
    }

    /// Iterates over `(column, value)` pairs in column-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(column, value)| (column.as_str(), value))
    }

    /// Iterates over column names in column-name order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    /// Projects the record onto `columns`, yielding display strings.
    #[must_use]
    pub fn project<S: AsRef<str>>(&self, columns: &[S]) -> Vec<String> {
        columns
            .iter()
            .map(|column| self.get(column.as_ref()).to_string())
            .collect()
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(column, value)| (column.into(), value.into()))
                .collect(),
        }
    }
}
