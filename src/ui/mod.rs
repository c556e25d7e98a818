//! Presentation boundary of the grid.
//!
//! The crate does not render anything itself. It hands the host page a view
//! model computed from controller state:
//!
//! ```text
//! AppState → compute_viewmodel → GridViewModel → host page render
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable grid state

pub mod viewmodel;

pub use viewmodel::{EmptyState, GridViewModel, HeaderCell, PageInfo, RowItem, SelectionInfo};
