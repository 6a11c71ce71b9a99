//! Tracing/logging setup shared by storefront binaries.

/// Initialize process-wide tracing with the format chosen by the environment.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::LogFormat::from_env());
}

/// Subscriber configuration (filters, output format).
pub mod tracing;
