//! Default knob values for every family.
//!
//! These mirror the fixed constants of the non-parameterized baselines, so a
//! binary built with no `STRESSKIT_*` environment behaves like the original
//! hand-written stress programs.

/// One mebibyte.
pub const MB: usize = 1 << 20;
/// One kibibyte.
pub const KB: usize = 1 << 10;
/// Cache line size assumed by the cache and pointer-chase families.
pub const CACHE_LINE_BYTES: usize = 64;

// Bus / memory thrash
pub const DEFAULT_BUS_SIZE_MB: usize = 50;
pub const DEFAULT_BUS_ITERATIONS: u64 = 1;

// Cache probe
pub const DEFAULT_CACHE_SIZE_BYTES: usize = 32 * KB;
pub const DEFAULT_CACHE_STRIDE_BYTES: usize = CACHE_LINE_BYTES;
pub const DEFAULT_CACHE_PASSES: u64 = 500;

// Pointer chase. The node count is a power of two, so the default stride
// must be odd to keep the ring a single cycle.
pub const DEFAULT_CHASE_ELEMENTS: usize = 2_097_152;
pub const DEFAULT_CHASE_STRIDE: usize = 1_001;
pub const DEFAULT_CHASE_STEPS: u64 = 1_000_000;

// Pipeline stress
pub const DEFAULT_PIPELINE_ITERATIONS: u64 = 10_000_000;

/// Minimax polynomial coefficients for sine on the odd powers x^1..x^15.
/// Both evaluation forms must use exactly these values so their outputs
/// agree to floating-point precision.
pub const SIN_COEFFS: [f64; 8] = [
    1.0,
    -1.666_666_666_666_580_8e-1,
    8.333_333_333_262_716e-3,
    -1.984_126_982_005_911_4e-4,
    2.755_731_607_338_689e-6,
    -2.505_185_130_214_293_6e-8,
    1.604_729_591_825_977_4e-10,
    -7.364_589_573_262_28e-13,
];

// Syscall spam
pub const DEFAULT_SYSCALL_ITERATIONS: u64 = 10_000;
/// Clearly scoped scratch file name; must never collide with caller files.
pub const DEFAULT_SYSCALL_FILE: &str = "stresskit-scratch.dat";
/// Bound for the random value threaded through the square-root transform;
/// chosen so `value as u64` is always a sane file offset.
pub const SYSCALL_VALUE_BOUND: u64 = 32_768;

// Mem thrash (page-granular memset variant)
pub const DEFAULT_MEM_SIZE_MB: usize = 200;
pub const DEFAULT_MEM_PAGE_BYTES: usize = 4_096;
pub const DEFAULT_MEM_ITERATIONS: u64 = 100_000;

// WCET capture driver
pub const DEFAULT_WCET_ITERATIONS: u64 = 1_500;
