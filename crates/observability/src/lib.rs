//! Logging setup shared by the SMP binaries.

pub mod tracing;

pub use tracing::LogFormat;

/// Install process-wide logging: `RUST_LOG` filter (default `info`), format
/// from `SMP_LOG_FORMAT`.
///
/// Safe to call more than once.
pub fn init() {
    tracing::init("info", LogFormat::from_env());
}
