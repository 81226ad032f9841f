//! # StressKit Domain
//!
//! Configuration vocabulary for the stress workloads.
//!
//! This crate contains:
//! - The closed per-family operation catalogs (what a slot may hold)
//! - Slot lists, element widths and iteration counts
//! - Per-family configuration structs with defaults and validation
//! - Configuration error types
//!
//! ## Architecture
//! - No dependencies on other StressKit crates
//! - Pure data types; nothing here touches the stressed resources
//!
//! Everything in this crate is resolved *before* a workload is built: the
//! CLI crate's build script parses and validates these types at compile
//! time, so an out-of-catalog operation or an impossible size fails the
//! build rather than the run.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod catalog;
pub mod config;
pub mod constants;
pub mod errors;

pub use catalog::{BusOp, ChaseOp, FileOp, PageOp, PipeOp, ProbeOp, SlotOp, WcetKernel};
pub use config::{
    BusConfig, CacheConfig, ChaseConfig, ChaseTopology, ElemWidth, IterationCount, MemConfig,
    PipelineConfig, SlotList, SyscallConfig, WcetConfig,
};
pub use errors::{ConfigError, ConfigResult};
