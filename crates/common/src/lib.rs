//! Shared infrastructure for the StressKit workloads.
//!
//! This crate carries the pieces every benchmark binary needs and nothing
//! else: the monotonic stopwatch around the timed region, the explicitly
//! seeded noise source, the fatal error types, and the fixed-format report
//! lines the external tooling scrapes from stdout.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod error;
#[macro_use]
pub mod macros;
pub mod report;
pub mod rng;
pub mod time;

pub use error::{StressError, StressResult};
pub use rng::Noise;
pub use time::Stopwatch;
