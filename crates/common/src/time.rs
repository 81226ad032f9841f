//! Monotonic timing for the measured region of a workload.

use std::time::Instant;

/// Microseconds per second.
pub const MICROS_PER_SEC: u64 = 1_000_000;

/// A started monotonic stopwatch.
///
/// Captured immediately before the hot loop and read immediately after it;
/// nothing else belongs inside the measured interval.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    begin: Instant,
}

impl Stopwatch {
    /// Start the stopwatch now.
    pub fn start() -> Self {
        Self { begin: Instant::now() }
    }

    /// Elapsed whole microseconds since `start`.
    pub fn elapsed_us(&self) -> u64 {
        // Saturating: a u64 of microseconds covers ~584k years.
        u64::try_from(self.begin.elapsed().as_micros()).unwrap_or(u64::MAX)
    }
}
