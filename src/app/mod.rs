//! Application layer coordinating the controller and its commands.
//!
//! This module defines the interaction controller that sits between the host
//! page and the row index engine.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Host Input → Events → Event Handler → AppState → RowIndex
//!                                          ↓
//!                         Snapshot → Page Window → View Model → Host Render
//! ```
//!
//! # Modules
//!
//! - [`handler`]: Event types and dispatch into the controller
//! - [`pagination`]: Page and page size bookkeeping
//! - [`state`]: The controller itself: sorting triggers, selection, paging
//!
//! # Example
//!
//! ```rust
//! use tabula::app::{handle_event, AppState, Event};
//! use tabula::{Record, RowIndex, Schema};
//!
//! let engine = RowIndex::new(vec![Record::new().with("id", "1")], Schema::new("id"))?;
//! let mut state = AppState::new(engine, Vec::new(), 25);
//! let changed = handle_event(&mut state, &Event::ToggleSelectAll)?;
//! assert!(changed);
//! # Ok::<(), tabula::TabulaError>(())
//! ```

pub mod handler;
pub mod pagination;
pub mod state;

pub use handler::{handle_event, Event};
pub use pagination::Pagination;
pub use state::AppState;
