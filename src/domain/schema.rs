//! Column roles for one grid.
//!
//! The [`Schema`] tells the engine which column identifies a row, which columns
//! feed the free-text search, and which columns get precomputed sort keys.
//! It is supplied at construction so one engine type serves every grid.

use serde::{Deserialize, Serialize};

/// How rows without a cached sort key order against rows that have one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingKeyPolicy {
    /// Keyless rows go after keyed rows in both directions.
    #[default]
    Last,
    /// Keyless rows compare as `0.0`.
    Zero,
}

impl MissingKeyPolicy {
    /// Parses `last`/`zero`, case-insensitively.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "last" | "nulls_last" => Some(Self::Last),
            "zero" => Some(Self::Zero),
            _ => None,
        }
    }
}

/// Kind of precomputed sort key a typed column carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// Epoch milliseconds.
    Date,
    /// Numeric value.
    Number,
}

/// Column roles for a grid.
///
/// # Examples
///
/// ```
/// use tabula::Schema;
///
/// let schema = Schema::new("id")
///     .searchable(["name", "email"])
///     .numeric(["amount"])
///     .dates(["created_at"]);
///
/// assert!(schema.is_searchable("email"));
/// assert!(schema.key_kind("amount").is_some());
/// assert!(schema.key_kind("name").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Column whose display form keys each record.
    pub id_field: String,

    /// Columns concatenated into the search key, in this order.
    #[serde(default)]
    pub searchable: Vec<String>,

    /// Columns with numeric sort keys.
    #[serde(default)]
    pub numeric: Vec<String>,

    /// Columns with date sort keys.
    #[serde(default)]
    pub dates: Vec<String>,

    /// Ordering of rows without a sort key.
    #[serde(default)]
    pub missing_sort_keys: MissingKeyPolicy,
}

impl Default for Schema {
    fn default() -> Self {
        Self::new("id")
    }
}

impl Schema {
    /// Creates a schema with only an identifier field.
    pub fn new(id_field: impl Into<String>) -> Self {
        Self {
            id_field: id_field.into(),
            searchable: Vec::new(),
            numeric: Vec::new(),
            dates: Vec::new(),
            missing_sort_keys: MissingKeyPolicy::default(),
        }
    }

    /// Sets the searchable columns.
    #[must_use]
    pub fn searchable<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.searchable = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the numeric columns.
    #[must_use]
    pub fn numeric<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.numeric = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the date columns.
    #[must_use]
    pub fn dates<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dates = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the missing sort key policy.
    #[must_use]
    pub const fn missing_sort_keys(mut self, policy: MissingKeyPolicy) -> Self {
        self.missing_sort_keys = policy;
        self
    }

    /// Returns `true` if `column` feeds the search key.
    #[must_use]
    pub fn is_searchable(&self, column: &str) -> bool {
        self.searchable.iter().any(|c| c == column)
    }

    /// Returns `true` if `column` is a date column.
    #[must_use]
    pub fn is_date(&self, column: &str) -> bool {
        self.dates.iter().any(|c| c == column)
    }

    /// Returns the sort key kind of `column`, if it is typed.
    ///
    /// A column listed as both date and numeric is treated as a date.
    #[must_use]
    pub fn key_kind(&self, column: &str) -> Option<KeyKind> {
        if self.is_date(column) {
            Some(KeyKind::Date)
        } else if self.numeric.iter().any(|c| c == column) {
            Some(KeyKind::Number)
        } else {
            None
        }
    }

    /// Iterates over every typed column with its key kind.
    pub fn typed_columns(&self) -> impl Iterator<Item = (&str, KeyKind)> {
        self.dates
            .iter()
            .map(|c| (c.as_str(), KeyKind::Date))
            .chain(
                self.numeric
                    .iter()
                    .filter(|c| !self.is_date(c))
                    .map(|c| (c.as_str(), KeyKind::Number)),
            )
    }
}
