//! Tabula: the row-indexing core of a browser data grid.
//!
//! Tabula keeps an in-memory record set and the views a grid needs over it:
//! - A display ordering driven by the active column sort
//! - A filtered subset driven by free-text search and column filters
//! - Precomputed search text and numeric/date sort keys per row
//! - Pagination and row selection layered on the filtered view
//!
//! All views stay consistent as rows are added, edited or removed, without
//! rebuilding from scratch on every interaction.
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Host page (header clicks, editors, search box)     │  ← External
//! └─────────────────────────────────────────────────────┘
//!                        │ Event (JSON)
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Controller
//! │  - Event dispatch                                   │
//! │  - Pagination and selection                         │
//! │  - Row window and view model                        │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Engine Layer (engine/)                             │  ← Indices
//! │  - Row store, display and filtered indices          │
//! │  - Search and sort key caches                       │
//! │  - Snapshots                                        │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain Layer (domain/)                             │
//! │  - Cell values, records, predicates, sort state     │
//! │  - Schema and error types                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Interaction controller with event dispatch
//! - [`domain`]: Core value types (records, predicates, errors)
//! - [`engine`]: Row store and derived indices
//! - [`ui`]: Render-ready view models
//! - [`observability`]: Tracing subscriber setup
//!
//! # Configuration
//!
//! A grid is configured with a TOML document:
//!
//! ```toml
//! columns = ["id", "name", "amount", "created"]
//! page_size = 25
//! trace_level = "info"
//!
//! [schema]
//! id_field = "id"
//! searchable = ["name"]
//! numeric = ["amount"]
//! dates = ["created"]
//! missing_sort_keys = "last"
//! ```
//!
//! or with a flat key/value map, as a host page would read from `data-*`
//! attributes (see [`Config::from_map`]).
//!
//! # Examples
//!
//! ```rust
//! use tabula::{handle_event, initialize, Config, Event, Record, Schema};
//!
//! let config = Config {
//!     schema: Schema::new("id").numeric(["amount"]),
//!     columns: vec!["id".to_string(), "amount".to_string()],
//!     ..Default::default()
//! };
//!
//! let records = vec![
//!     Record::new().with("id", "1").with("amount", 10),
//!     Record::new().with("id", "2").with("amount", 5),
//! ];
//! let mut state = initialize(&config, records)?;
//!
//! handle_event(&mut state, &Event::HeaderClicked { column_index: 2 })?;
//! let vm = state.compute_viewmodel();
//! assert_eq!(vm.rows[0].id, "2");
//! # Ok::<(), tabula::TabulaError>(())
//! ```
//!
//! # Key Design Decisions
//!
//! ## Eager Index Maintenance
//!
//! Every mutation recomputes the indices it affects before returning:
//! - Sorting rebuilds the display order from insertion order (stable)
//! - The filtered index is always rebuilt from the full display index
//! - Caches are refreshed per row and per column, never globally
//!
//! ## Identifier Edits Re-key
//!
//! Editing the identifier column moves the row to its new key in the store,
//! every index, every cache and the selection.
//!
//! ## Missing Sort Keys
//!
//! Rows without a usable sort key go last in both directions by default;
//! [`MissingKeyPolicy::Zero`] restores zero-point ordering.

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod engine;
pub mod observability;
pub mod ui;

pub use app::{handle_event, AppState, Event, Pagination};
pub use domain::{
    CellValue, FilterOperator, FilterPredicate, MissingKeyPolicy, Record, Result, RowId, Schema,
    SortDirection, SortState, TabulaError,
};
pub use engine::{RowIndex, Snapshot};
pub use ui::GridViewModel;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Grid configuration.
///
/// Loaded from TOML ([`Config::from_toml_str`], [`Config::from_file`]) or from
/// a flat string map ([`Config::from_map`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Column roles.
    #[serde(default)]
    pub schema: Schema,

    /// Data columns in header order.
    ///
    /// Empty means "derive from the first record". Default: empty
    #[serde(default)]
    pub columns: Vec<String>,

    /// Rows per page. Zero is treated as one. Default: 25
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Tracing level for the subscriber installed by
    /// [`observability::init_tracing`].
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`, or any
    /// `EnvFilter` directive. Default: `"info"`
    #[serde(default)]
    pub trace_level: Option<String>,
}

const fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema: Schema::default(),
            columns: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from a flat string map.
    ///
    /// # Parsing Rules
    ///
    /// - `id_field`: String (default `"id"`)
    /// - `columns`, `searchable`, `numeric`, `dates`: comma-separated lists
    ///   (empty entries dropped)
    /// - `page_size`: String → `usize` (falls back to 25 on parse error)
    /// - `missing_sort_keys`: `last` or `zero` (falls back to `last`)
    /// - `trace_level`: String → `Option<String>`
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use tabula::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("id_field".to_string(), "sku".to_string());
    /// map.insert("numeric".to_string(), "price, stock".to_string());
    /// map.insert("page_size".to_string(), "50".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.schema.id_field, "sku");
    /// assert_eq!(config.schema.numeric, vec!["price", "stock"]);
    /// assert_eq!(config.page_size, 50);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let list = |key: &str| -> Vec<String> {
            map.get(key)
                .map(|s| {
                    s.split(',')
                        .map(str::trim)
                        .filter(|c| !c.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default()
        };

        let id_field = map
            .get("id_field")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .unwrap_or("id");

        let missing_sort_keys = map
            .get("missing_sort_keys")
            .and_then(|s| {
                let policy = MissingKeyPolicy::parse(s);
                if policy.is_none() {
                    tracing::debug!(value = %s, "unknown missing_sort_keys policy, using last");
                }
                policy
            })
            .unwrap_or_default();

        let page_size = map
            .get("page_size")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_PAGE_SIZE);

        Self {
            schema: Schema::new(id_field)
                .searchable(list("searchable"))
                .numeric(list("numeric"))
                .dates(list("dates"))
                .missing_sort_keys(missing_sort_keys),
            columns: list("columns"),
            page_size,
            trace_level: map.get("trace_level").cloned(),
        }
    }

    /// Parses configuration from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the TOML is malformed or the identifier field is empty.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| TabulaError::Config(format!("failed to parse TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read and `Config` if it cannot be parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = ?path, "loading grid configuration");
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    fn validate(&self) -> Result<()> {
        if self.schema.id_field.trim().is_empty() {
            return Err(TabulaError::Config("id_field must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Builds a controller from configuration and an initial record batch.
///
/// # Errors
///
/// Returns `MissingIdentifier` or `DuplicateKey` if the batch violates the
/// identifier invariant.
///
/// # Example
///
/// ```rust
/// use tabula::{initialize, Config, Record};
///
/// let state = initialize(&Config::default(), vec![Record::new().with("id", 1)])?;
/// assert_eq!(state.snapshot().total_rows, 1);
/// # Ok::<(), tabula::TabulaError>(())
/// ```
pub fn initialize(config: &Config, records: Vec<Record>) -> Result<AppState> {
    tracing::debug!(
        record_count = records.len(),
        id_field = %config.schema.id_field,
        page_size = config.page_size,
        "initializing grid"
    );

    let engine = RowIndex::new(records, config.schema.clone())?;
    Ok(AppState::new(engine, config.columns.clone(), config.page_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const GRID_TOML: &str = r#"
columns = ["id", "name", "amount"]
page_size = 10

[schema]
id_field = "id"
searchable = ["name"]
numeric = ["amount"]
missing_sort_keys = "zero"
"#;

    #[test]
    fn parses_toml() {
        let config = Config::from_toml_str(GRID_TOML).unwrap();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.schema.searchable, vec!["name"]);
        assert_eq!(config.schema.missing_sort_keys, MissingKeyPolicy::Zero);
        assert!(config.schema.dates.is_empty());
        assert_eq!(config.trace_level, None);
    }

    #[test]
    fn toml_defaults_apply() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn rejects_bad_toml() {
        assert!(matches!(
            Config::from_toml_str("page_size = \"many\""),
            Err(TabulaError::Config(_))
        ));
        assert!(matches!(
            Config::from_toml_str("[schema]\nid_field = \" \""),
            Err(TabulaError::Config(_))
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(GRID_TOML.as_bytes()).unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.columns, vec!["id", "name", "amount"]);

        let missing = Config::from_file(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(TabulaError::Io(_))));
    }

    #[test]
    fn map_falls_back_to_defaults() {
        let mut map = BTreeMap::new();
        map.insert("page_size".to_string(), "lots".to_string());
        map.insert("missing_sort_keys".to_string(), "sideways".to_string());
        map.insert("columns".to_string(), "id,, name ".to_string());

        let config = Config::from_map(&map);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.schema.id_field, "id");
        assert_eq!(config.schema.missing_sort_keys, MissingKeyPolicy::Last);
        assert_eq!(config.columns, vec!["id", "name"]);
    }

    #[test]
    fn initialize_wires_config_into_state() {
        let config = Config::from_toml_str(GRID_TOML).unwrap();
        let records = (0..25).map(|i| Record::new().with("id", i).with("amount", i)).collect();
        let state = initialize(&config, records).unwrap();
        assert_eq!(state.page_size(), 10);
        assert_eq!(state.page_count(), 3);
        assert_eq!(state.columns(), ["id", "name", "amount"]);
    }
}
