//! Fatal error types shared by all workload families.
//!
//! The suite recognizes exactly two runtime error kinds, both unrecoverable
//! by design: resource exhaustion while acquiring a buffer, and I/O failure
//! in the syscall family. A failed acquisition invalidates the whole
//! measurement, so there are no retries and no partial-failure semantics;
//! binaries print the diagnostic and terminate with a non-zero status.
//!
//! Family-level errors compose with [`StressError`] through a transparent
//! variant rather than duplicating these patterns.

use std::collections::TryReserveError;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Standard result type using [`StressError`].
pub type StressResult<T> = Result<T, StressError>;

/// Unrecoverable failures surfaced by a workload.
#[derive(Debug, Error)]
pub enum StressError {
    /// The allocator could not provide a workload buffer.
    #[error("unable to allocate {what} ({bytes} bytes): {source}")]
    Alloc {
        /// Which resource was being allocated.
        what: &'static str,
        /// Requested size in bytes.
        bytes: usize,
        #[source]
        source: TryReserveError,
    },

    /// A file operation against the working file failed.
    #[error("{call} on '{path}' failed: {source}")]
    Io {
        /// The failing call, e.g. `seek` or `reopen`.
        call: &'static str,
        /// The file the call was issued against.
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StressError {
    /// Allocation failure for `what`, requested at `bytes` bytes.
    pub fn alloc(what: &'static str, bytes: usize, source: TryReserveError) -> Self {
        Self::Alloc { what, bytes, source }
    }

    /// I/O failure in `call` against `path`.
    pub fn io(call: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { call, path: path.into(), source }
    }
}
