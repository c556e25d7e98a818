//! Error types for the tabula grid engine.
//!
//! This module defines the centralized error type [`TabulaError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for grid engine and controller operations.
///
/// The engine-level variants (`NotFound`, `DuplicateKey`, `MissingIdentifier`)
/// describe rejected commands and leave the engine untouched. The remaining
/// variants cover configuration loading and command decoding.
///
/// # Examples
///
/// ```
/// use tabula::TabulaError;
///
/// let err = TabulaError::not_found("row", "42");
/// assert_eq!(err.to_string(), "row not found: 42");
/// assert!(err.is_rejection());
/// ```
#[derive(Debug, Error)]
pub enum TabulaError {
    /// An operation referenced an unknown row identifier or filter column.
    #[error("{what} not found: {key}")]
    NotFound {
        /// Kind of thing that was looked up (`"row"`, `"filter"`).
        what: &'static str,
        /// The identifier or column name that was missing.
        key: String,
    },

    /// An insert (or identifier edit) collided with an existing identifier.
    #[error("duplicate row identifier: {0}")]
    DuplicateKey(String),

    /// A record carried no value for the identifier field.
    ///
    /// `index` is the position in the initial batch, or `None` for single-row
    /// operations.
    #[error("record {} has no value for identifier field `{field}`", describe_index(.index))]
    MissingIdentifier {
        /// Name of the identifier field.
        field: String,
        /// Position of the offending record in the initial batch.
        index: Option<usize>,
    },

    /// A filter operator name could not be recognized.
    ///
    /// Only produced by strict parsing; decoding of UI commands falls back to
    /// `eq` instead.
    #[error("invalid filter predicate: {0}")]
    InvalidPredicate(String),

    /// A value in a date or numeric column could not be coerced to a sort key.
    ///
    /// The engine logs this and keeps the previous key; it never fails an
    /// operation.
    #[error("column `{column}` cannot use `{value}` as a sort key")]
    UnparsableTypedValue {
        /// Typed column receiving the value.
        column: String,
        /// Display form of the rejected value.
        value: String,
    },

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A UI command could not be decoded.
    #[error("invalid command: {0}")]
    Command(#[from] serde_json::Error),
}

impl TabulaError {
    /// Shorthand for [`TabulaError::NotFound`].
    pub fn not_found(what: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            what,
            key: key.into(),
        }
    }

    /// Returns `true` for errors the controller treats as no-ops.
    ///
    /// These are commands the UI may legitimately race against (a row deleted
    /// while its edit was in flight, a double submit of the same new row).
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::DuplicateKey(_))
    }
}

fn describe_index(index: &Option<usize>) -> String {
    index.map_or_else(|| "<new>".to_string(), |i| format!("#{i}"))
}

/// A specialized `Result` type for tabula operations.
pub type Result<T> = std::result::Result<T, TabulaError>;
