//! Column filter predicates.
//!
//! A [`FilterPredicate`] restricts the visible rows by comparing one column
//! against a value. Predicates are conjunctive: a row must pass every active
//! one. Operator names coming from the UI are decoded leniently, so an
//! unrecognized operator behaves as `eq` rather than rejecting the command.

use super::error::TabulaError;
use super::value::CellValue;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Comparison performed by a [`FilterPredicate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FilterOperator {
    /// Value equality (numeric when both sides are numbers).
    #[default]
    Equals,
    /// Negation of [`FilterOperator::Equals`].
    NotEquals,
    /// Cell orders after the comparison value.
    GreaterThan,
    /// Cell orders before the comparison value.
    LessThan,
    /// Case-insensitive substring match.
    Contains,
    /// Case-insensitive prefix match.
    StartsWith,
    /// Case-insensitive suffix match.
    EndsWith,
}

impl FilterOperator {
    /// Canonical wire name of the operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equals => "eq",
            Self::NotEquals => "neq",
            Self::GreaterThan => "gt",
            Self::LessThan => "lt",
            Self::Contains => "contains",
            Self::StartsWith => "starts_with",
            Self::EndsWith => "ends_with",
        }
    }

    /// Parses an operator name, falling back to [`FilterOperator::Equals`].
    ///
    /// # Examples
    ///
    /// ```
    /// use tabula::FilterOperator;
    ///
    /// assert_eq!(FilterOperator::parse_lenient("gt"), FilterOperator::GreaterThan);
    /// assert_eq!(FilterOperator::parse_lenient("between"), FilterOperator::Equals);
    /// ```
    #[must_use]
    pub fn parse_lenient(name: &str) -> Self {
        name.parse().unwrap_or_else(|e: TabulaError| {
            tracing::warn!(operator = %name, error = %e, "unsupported filter operator, using eq");
            Self::Equals
        })
    }
}

impl FromStr for FilterOperator {
    type Err = TabulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "eq" | "equals" | "=" | "==" => Ok(Self::Equals),
            "neq" | "ne" | "not_equals" | "notEquals" | "!=" => Ok(Self::NotEquals),
            "gt" | "greater_than" | "greaterThan" | ">" => Ok(Self::GreaterThan),
            "lt" | "less_than" | "lessThan" | "<" => Ok(Self::LessThan),
            "contains" => Ok(Self::Contains),
            "starts_with" | "startsWith" => Ok(Self::StartsWith),
            "ends_with" | "endsWith" => Ok(Self::EndsWith),
            other => Err(TabulaError::InvalidPredicate(format!(
                "unknown operator `{other}`"
            ))),
        }
    }
}

impl From<String> for FilterOperator {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

impl From<FilterOperator> for String {
    fn from(value: FilterOperator) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single-column filter.
///
/// # Examples
///
/// ```
/// use tabula::{FilterOperator, FilterPredicate};
///
/// let predicate = FilterPredicate::new("amount", FilterOperator::GreaterThan, 6);
/// assert_eq!(predicate.column, "amount");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterPredicate {
    /// Column the predicate reads.
    pub column: String,

    /// Value the cell is compared against.
    #[serde(alias = "comparison_value", alias = "comparisonValue")]
    pub value: CellValue,

    /// Comparison to perform.
    #[serde(default)]
    pub operator: FilterOperator,
}

impl FilterPredicate {
    /// Creates a predicate.
    pub fn new(
        column: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<CellValue>,
    ) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
            operator,
        }
    }

    /// Evaluates the predicate against one cell.
    ///
    /// `date_column` selects timestamp comparison for `gt`/`lt` when both
    /// sides parse as dates.
    #[must_use]
    pub fn matches(&self, cell: &CellValue, date_column: bool) -> bool {
        match self.operator {
            FilterOperator::Equals => values_equal(cell, &self.value),
            FilterOperator::NotEquals => !values_equal(cell, &self.value),
            FilterOperator::GreaterThan => {
                order_values(cell, &self.value, date_column) == Some(Ordering::Greater)
            }
            FilterOperator::LessThan => {
                order_values(cell, &self.value, date_column) == Some(Ordering::Less)
            }
            FilterOperator::Contains => lowered(cell).contains(&lowered(&self.value)),
            FilterOperator::StartsWith => lowered(cell).starts_with(&lowered(&self.value)),
            FilterOperator::EndsWith => lowered(cell).ends_with(&lowered(&self.value)),
        }
    }
}

fn lowered(value: &CellValue) -> String {
    value.to_string().to_lowercase()
}

fn values_equal(cell: &CellValue, target: &CellValue) -> bool {
    match (cell.as_number(), target.as_number()) {
        (Some(a), Some(b)) => a == b,
        _ => cell.to_string() == target.to_string(),
    }
}

/// Orders a cell against a comparison value; `None` when the cell is empty.
fn order_values(cell: &CellValue, target: &CellValue, date_column: bool) -> Option<Ordering> {
    if cell.is_null() {
        return None;
    }

    if date_column {
        if let (Some(a), Some(b)) = (cell.as_timestamp_millis(), target.as_timestamp_millis()) {
            return Some(a.cmp(&b));
        }
    }

    match (cell.as_number(), target.as_number()) {
        (Some(a), Some(b)) => a.partial_cmp(&b),
        _ => Some(cell.to_string().cmp(&target.to_string())),
    }
}
