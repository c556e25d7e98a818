//! Domain layer for the grid engine.
//!
//! This module contains the value types shared by the engine and the
//! controller, independent of any rendering or host concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`value`]: Tagged cell values and coercion rules
//! - [`record`]: Record model and row identifiers
//! - [`filter`]: Column filter predicates
//! - [`sort`]: Sort direction and sort state
//! - [`schema`]: Column roles supplied at construction
//!
//! # Examples
//!
//! ```
//! use tabula::domain::{Record, Result, Schema};
//!
//! fn first_id(records: &[Record], schema: &Schema) -> Result<Option<String>> {
//!     Ok(records.first().and_then(|r| r.id(&schema.id_field)))
//! }
//! ```

pub mod error;
pub mod filter;
pub mod record;
pub mod schema;
pub mod sort;
pub mod value;

pub use error::{Result, TabulaError};
pub use filter::{FilterOperator, FilterPredicate};
pub use record::{Record, RowId};
pub use schema::{KeyKind, MissingKeyPolicy, Schema};
pub use sort::{SortDirection, SortState};
pub use value::CellValue;
