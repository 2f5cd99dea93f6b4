//! Process-wide logging setup shared by the stockroom binaries.

/// Initialize logging with the `RUST_LOG` filter (default `info`).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(None);
}

/// Initialize logging with an explicit filter directive, e.g. one read from
/// the application settings. Invalid directives fall back to `info`.
pub fn init_with_filter(filter: &str) {
    tracing::init(Some(filter));
}

/// Subscriber configuration (filters, layers).
pub mod tracing;
