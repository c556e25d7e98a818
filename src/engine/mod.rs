//! Row store and index engine.
//!
//! This module owns the canonical record set of a grid and every view derived
//! from it. It has no knowledge of pages, selection or rendering; the
//! controller in [`crate::app`] layers those on top.
//!
//! # Modules
//!
//! - `index`: [`RowIndex`], the store and its display/filtered indices
//! - `cache`: search and sort key caches maintained by the mutators
//! - `order`: total-order comparators used for sorting
//! - `snapshot`: [`Snapshot`], the read-only state bundle

pub mod cache;
pub mod index;
pub mod order;
pub mod snapshot;

pub use cache::{SearchKeyCache, SortKeyCache};
pub use index::RowIndex;
pub use snapshot::Snapshot;
