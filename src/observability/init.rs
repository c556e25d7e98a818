//! Tracing initialization and subscriber setup.

use crate::Config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the tracing subscriber.
///
/// Sets up a subscriber pipeline that:
/// 1. Filters spans and events by level
/// 2. Formats them as compact single-line records on stderr
///
/// # Level Resolution
///
/// 1. `RUST_LOG` if set and valid
/// 2. `config.trace_level` if set
/// 3. Default: `"info"`
///
/// # Initialization Behavior
///
/// Idempotent: safe to call multiple times, only the first call takes effect.
/// A host that installs its own subscriber first simply wins.
///
/// # Example
///
/// ```rust
/// use tabula::observability::init_tracing;
/// use tabula::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
///
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let fmt_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
