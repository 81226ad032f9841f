//! Shared startup for the workload binaries.
//!
//! Each binary is one build-time-instantiated variant of a workload family;
//! the per-family `cfg` modules in `src/bin/` include the resolver output
//! from `OUT_DIR`. This library only carries what every binary does before
//! its timed region.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

use tracing_subscriber::EnvFilter;

/// Initialize tracing from `RUST_LOG`, quiet by default.
///
/// Diagnostics go to stderr; stdout is reserved for the fixed report lines
/// the external tooling scrapes.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
