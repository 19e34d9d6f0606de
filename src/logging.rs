//! Log setup shared by the binaries.

use tracing_subscriber::EnvFilter;

/// Builds the filter: `RUST_LOG` when set, otherwise `default_directive`.
///
/// An unparsable directive falls back to `jobflow=info`.
pub fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .unwrap_or_else(|_| EnvFilter::new("jobflow=info"))
}

/// Installs the global `fmt` subscriber, writing to stderr so stdout stays
/// free for RPC responses. Calling it twice is a no-op.
pub fn init(default_directive: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_directive))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
