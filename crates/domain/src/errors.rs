//! Configuration error types.

use serde::Serialize;
use thiserror::Error;

/// Errors produced while resolving a workload configuration.
///
/// These are build-time errors by contract: every path that constructs a
/// workload variant validates its configuration before any resource is
/// acquired, and the CLI build script turns any of these into a failed
/// build.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum ConfigError {
    /// An operation identifier outside the family's closed catalog.
    #[error("unknown {family} operation '{name}' (expected one of: {allowed})")]
    UnknownOperation { family: &'static str, name: String, allowed: String },

    /// More slots configured than the skeleton has positions for.
    #[error("{family} accepts at most {max} slots, got {got}")]
    TooManySlots { family: &'static str, max: usize, got: usize },

    /// A size, stride or count knob with an impossible value.
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: &'static str, message: String },

    /// A strided pointer-chase ring whose stride shares a factor with the
    /// node count. This would split the ring into disjoint cycles, so it is
    /// rejected instead of silently altered.
    #[error(
        "stride {stride} and element count {elements} share a common factor; \
         the chase ring would decompose into disjoint cycles (gcd must be 1)"
    )]
    NotCoprime { stride: u64, elements: u64 },
}

impl ConfigError {
    /// Invalid knob value, with the offending field name.
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue { field, message: message.into() }
    }
}

/// Result type alias for configuration resolution.
pub type ConfigResult<T> = Result<T, ConfigError>;
