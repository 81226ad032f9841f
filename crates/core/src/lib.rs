//! # StressKit Core
//!
//! The workload skeletons: one module per benchmark family, each built from
//! a state type owning the stressed resource plus a set of zero-sized
//! operation types wired into a generic hot loop.
//!
//! ## Slot instantiation
//!
//! Every skeleton's `run` function is generic over five slot type
//! parameters bounded by the family's operation trait. The configuration
//! resolver (the CLI crate's build script) picks the concrete types, so the
//! operation sequence is fully monomorphized: selected slots inline to their
//! operation bodies and the shared [`slots::Nop`] compiles to nothing. The
//! hot loops contain no dispatch of any kind.
//!
//! Setup work (allocation, fills, ring construction, file creation) happens
//! in the state constructors, outside the caller's timed region.

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod bus;
pub mod cache;
pub mod chase;
pub mod element;
pub mod errors;
pub mod mem;
pub mod pipeline;
pub mod slots;
pub mod syscall;
pub mod wcet;

pub use errors::{WorkloadError, WorkloadResult};
