//! Subscriber installation.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info";

/// Build the filter: an explicit directive wins, then `RUST_LOG`, then
/// [`DEFAULT_FILTER`].
pub fn filter(directive: Option<&str>) -> EnvFilter {
    match directive.filter(|d| !d.trim().is_empty()) {
        Some(d) => EnvFilter::try_new(d).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    }
}

/// Install the JSON subscriber.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(directive: Option<&str>) {
    // JSON logs + timestamps, written to stderr so command output stays clean.
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter(directive))
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok();

    if installed {
        ::tracing::debug!("logging initialised");
    }
}
