//! Exported helper macros.

/// Report a fatal error and terminate the process.
///
/// Prints `(<file>, <line>): <error>` to stderr and exits with status 1.
/// This is the only termination path for workload binaries on allocation or
/// I/O failure; nothing is retried and no cleanup beyond process teardown is
/// attempted.
#[macro_export]
macro_rules! die {
    ($err:expr) => {{
        eprintln!("({}, {}): {}", file!(), line!(), $err);
        ::std::process::exit(1)
    }};
}
