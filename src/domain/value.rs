//! Dynamically typed cell values and their coercion rules.
//!
//! Grid records arrive from the host page as loosely typed JSON. [`CellValue`]
//! is the tagged form the engine works with: every cell is text, a number, a
//! timestamp or empty. Coercion into sort keys is best-effort and lives here so
//! that the search cache, the sort cache and filter predicates all agree on
//! what "numeric" and "date-like" mean.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Integral floats below this magnitude are rendered without a fractional part.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Naive date-time layouts accepted for date columns, tried in order after RFC 3339.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Date-only layouts accepted for date columns, interpreted as midnight UTC.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// A single cell of a grid record.
///
/// Serializes to plain JSON scalars (timestamps as RFC 3339 strings) and
/// deserializes from any JSON value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum CellValue {
    /// Free text, including date-like strings that have not been parsed.
    Text(String),
    /// A finite or non-finite float.
    Number(f64),
    /// A point in time.
    Timestamp(DateTime<Utc>),
    /// Absent value.
    #[default]
    Null,
}

impl CellValue {
    /// Returns `true` for [`CellValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Coerces the value to a finite number.
    ///
    /// Numbers pass through, text is trimmed and parsed, everything else
    /// yields `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tabula::CellValue;
    ///
    /// assert_eq!(CellValue::from(" 12.5 ").as_number(), Some(12.5));
    /// assert_eq!(CellValue::from("12abc").as_number(), None);
    /// ```
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// Coerces the value to epoch milliseconds.
    ///
    /// Numbers are taken as epoch milliseconds already. Text is tried as
    /// RFC 3339, then as a naive date-time, then as a bare date at midnight UTC.
    ///
    /// # Examples
    ///
    /// ```
    /// use tabula::CellValue;
    ///
    /// assert_eq!(CellValue::from("1970-01-02").as_timestamp_millis(), Some(86_400_000));
    /// assert_eq!(CellValue::from("yesterday").as_timestamp_millis(), None);
    /// ```
    #[must_use]
    pub fn as_timestamp_millis(&self) -> Option<i64> {
        match self {
            Self::Timestamp(ts) => Some(ts.timestamp_millis()),
            #[allow(clippy::cast_possible_truncation)]
            Self::Number(n) if n.is_finite() => Some(*n as i64),
            Self::Text(s) => parse_datetime(s.trim()).map(|ts| ts.timestamp_millis()),
            _ => None,
        }
    }
}

fn parse_datetime(text: &str) -> Option<DateTime<Utc>> {
    if text.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.with_timezone(&Utc));
    }

    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    DATE_FORMATS.iter().find_map(|format| {
        NaiveDate::parse_from_str(text, format)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Utc.from_utc_datetime(&naive))
    })
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            #[allow(clippy::cast_possible_truncation)]
            Self::Number(n) if n.fract() == 0.0 && n.abs() < MAX_EXACT_INTEGER => {
                write!(f, "{}", *n as i64)
            }
            Self::Number(n) => write!(f, "{n}"),
            Self::Timestamp(ts) => f.write_str(&ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Self::Null => Ok(()),
        }
    }
}

impl From<Value> for CellValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::String(s) => Self::Text(s),
            Value::Number(n) => n.as_f64().map_or(Self::Null, Self::Number),
            Value::Bool(b) => Self::Text(b.to_string()),
            other @ (Value::Array(_) | Value::Object(_)) => Self::Text(other.to_string()),
        }
    }
}

impl From<CellValue> for Value {
    fn from(value: CellValue) -> Self {
        match value {
            CellValue::Null => Self::Null,
            CellValue::Text(s) => Self::String(s),
            CellValue::Number(n) => {
                serde_json::Number::from_f64(n).map_or(Self::Null, Self::Number)
            }
            CellValue::Timestamp(ts) => {
                Self::String(ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for CellValue {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
