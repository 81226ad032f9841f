//! Workload-level error type.
//!
//! Composes the shared fatal-error patterns with configuration errors
//! instead of duplicating either: runtime failures arrive as
//! [`StressError`], rejected configurations as [`ConfigError`].

use stresskit_common::StressError;
use stresskit_domain::ConfigError;
use thiserror::Error;

/// Any failure a workload constructor or run can surface.
#[derive(Debug, Error)]
pub enum WorkloadError {
    #[error(transparent)]
    Common(#[from] StressError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type alias for workload operations.
pub type WorkloadResult<T> = Result<T, WorkloadError>;
