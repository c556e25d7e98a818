//! Structured logging for the grid engine.
//!
//! Every public engine and controller operation opens a `debug` span carrying
//! its row ids, columns and counts; rejected commands log at `debug`, lenient
//! fallbacks at `warn`, and per-row cache work at `trace`. This module only
//! installs a subscriber for hosts that do not bring their own.
//!
//! # Configuration
//!
//! Trace level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! # Usage
//!
//! ```rust
//! use tabula::observability::init_tracing;
//! use tabula::Config;
//!
//! init_tracing(&Config::default());
//! tracing::info!("grid ready");
//! ```

mod init;

pub use init::init_tracing;
