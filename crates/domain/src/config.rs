//! Per-family configuration structs and their validation.
//!
//! A configuration is the complete build-time description of one workload
//! variant: which operation occupies each of the five slots, how large the
//! stressed resource is, and whether the loop is bounded. `validate()` is
//! the single gate every resolver path goes through; a configuration that
//! passes it can always be instantiated.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::{BusOp, ChaseOp, FileOp, PageOp, PipeOp, ProbeOp, SlotOp, WcetKernel};
use crate::constants;
use crate::errors::{ConfigError, ConfigResult};

/// Number of operation slots per loop iteration.
pub const SLOT_COUNT: usize = 5;

/// The ordered operation slots of one loop iteration.
///
/// Unfilled positions are unselected and compile to nothing in the
/// instantiated skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotList<O: SlotOp> {
    slots: [Option<O>; SLOT_COUNT],
}

impl<O: SlotOp> Default for SlotList<O> {
    fn default() -> Self {
        Self { slots: [None; SLOT_COUNT] }
    }
}

impl<O: SlotOp> SlotList<O> {
    /// Slot list with the given leading operations selected.
    pub fn of(ops: &[O]) -> ConfigResult<Self> {
        if ops.len() > SLOT_COUNT {
            return Err(ConfigError::TooManySlots {
                family: O::FAMILY,
                max: SLOT_COUNT,
                got: ops.len(),
            });
        }
        let mut slots = [None; SLOT_COUNT];
        for (slot, op) in slots.iter_mut().zip(ops) {
            *slot = Some(*op);
        }
        Ok(Self { slots })
    }

    /// Parse a comma-separated identifier list, e.g. `"load,store,load"`.
    /// An empty string selects nothing.
    pub fn parse(list: &str) -> ConfigResult<Self> {
        let trimmed = list.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        let ops = trimmed
            .split(',')
            .map(|name| O::parse(name.trim()))
            .collect::<ConfigResult<Vec<O>>>()?;
        Self::of(&ops)
    }

    /// The slot at `index` (0-based).
    pub fn get(&self, index: usize) -> Option<O> {
        self.slots.get(index).copied().flatten()
    }

    /// All five positions in order.
    pub fn as_array(&self) -> [Option<O>; SLOT_COUNT] {
        self.slots
    }

    /// Number of selected slots.
    pub fn selected(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

/// Element width of the bus-thrash buffers.
///
/// Operation cost and cache-line utilization per element differ by width,
/// so the width is a first-class knob rather than a fixed type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElemWidth {
    U8,
    I8,
    U16,
    I16,
    U32,
    #[default]
    I32,
    U64,
    I64,
}

impl ElemWidth {
    /// Width in bytes.
    pub fn bytes(self) -> usize {
        match self {
            Self::U8 | Self::I8 => 1,
            Self::U16 | Self::I16 => 2,
            Self::U32 | Self::I32 => 4,
            Self::U64 | Self::I64 => 8,
        }
    }

    /// The Rust primitive this width maps to (used by the resolver codegen).
    pub fn rust_type(self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::I8 => "i8",
            Self::U16 => "u16",
            Self::I16 => "i16",
            Self::U32 => "u32",
            Self::I32 => "i32",
            Self::U64 => "u64",
            Self::I64 => "i64",
        }
    }
}

impl FromStr for ElemWidth {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        match s {
            "u8" => Ok(Self::U8),
            "i8" => Ok(Self::I8),
            "u16" => Ok(Self::U16),
            "i16" => Ok(Self::I16),
            "u32" => Ok(Self::U32),
            "i32" => Ok(Self::I32),
            "u64" => Ok(Self::U64),
            "i64" => Ok(Self::I64),
            other => Err(ConfigError::invalid(
                "width",
                format!("'{other}' is not one of u8,i8,u16,i16,u32,i32,u64,i64"),
            )),
        }
    }
}

/// Bounded or unbounded loop count, fixed at build time.
///
/// Infinite mode is intentional: it produces a continuously running stressor
/// for use under an external sampling tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IterationCount {
    Finite(u64),
    Infinite,
}

impl IterationCount {
    /// `Some(n)` for finite runs, `None` for infinite ones.
    pub fn bound(self) -> Option<u64> {
        match self {
            Self::Finite(n) => Some(n),
            Self::Infinite => None,
        }
    }
}

impl FromStr for IterationCount {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        if s.eq_ignore_ascii_case("infinite") {
            return Ok(Self::Infinite);
        }
        s.parse::<u64>().map(Self::Finite).map_err(|_| {
            ConfigError::invalid("iterations", format!("'{s}' is not a count or 'infinite'"))
        })
    }
}

/// Ring topology of the pointer-chase family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChaseTopology {
    /// `next[i] = (i + stride) mod n`; requires gcd(stride, n) = 1.
    #[default]
    Strided,
    /// Strictly forward chain, last node wraps to the first.
    Forward,
}

impl FromStr for ChaseTopology {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        match s {
            "strided" => Ok(Self::Strided),
            "forward" => Ok(Self::Forward),
            other => Err(ConfigError::invalid(
                "topology",
                format!("'{other}' is not 'strided' or 'forward'"),
            )),
        }
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Bus/memory-thrash configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusConfig {
    pub size_mb: usize,
    pub width: ElemWidth,
    pub slots: SlotList<BusOp>,
    pub iterations: IterationCount,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            size_mb: constants::DEFAULT_BUS_SIZE_MB,
            width: ElemWidth::default(),
            slots: SlotList::of(&[BusOp::ComputeAToB]).unwrap_or_default(),
            iterations: IterationCount::Finite(constants::DEFAULT_BUS_ITERATIONS),
        }
    }
}

impl BusConfig {
    /// Total buffer size in bytes (one buffer; two are allocated).
    pub fn size_bytes(&self) -> usize {
        self.size_mb * constants::MB
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.size_mb == 0 {
            return Err(ConfigError::invalid("size_mb", "buffer size must be positive"));
        }
        Ok(())
    }
}

/// Cache-probe configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Working-set size in bytes, sized to the probed cache level.
    pub size_bytes: usize,
    /// Access granularity in bytes, typically the cache line size.
    pub stride_bytes: usize,
    /// Associativity scale factor; > 1 spaces accesses to induce conflict
    /// misses.
    pub associativity: usize,
    pub slots: SlotList<ProbeOp>,
    pub passes: IterationCount,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            size_bytes: constants::DEFAULT_CACHE_SIZE_BYTES,
            stride_bytes: constants::DEFAULT_CACHE_STRIDE_BYTES,
            associativity: 1,
            slots: SlotList::of(&[ProbeOp::Load]).unwrap_or_default(),
            passes: IterationCount::Finite(constants::DEFAULT_CACHE_PASSES),
        }
    }
}

impl CacheConfig {
    /// Array length in `i32` elements.
    pub fn elements(&self) -> usize {
        self.size_bytes / std::mem::size_of::<i32>()
    }

    /// Visit step in elements: stride scaled by the associativity factor.
    pub fn step_elements(&self) -> usize {
        self.stride_bytes * self.associativity / std::mem::size_of::<i32>()
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.elements() == 0 {
            return Err(ConfigError::invalid("size_bytes", "array must hold at least one element"));
        }
        if self.stride_bytes == 0 || self.associativity == 0 {
            return Err(ConfigError::invalid(
                "stride_bytes",
                "stride and associativity must be positive",
            ));
        }
        if self.step_elements() == 0 {
            return Err(ConfigError::invalid(
                "stride_bytes",
                "stride times associativity must cover at least one element",
            ));
        }
        if self.step_elements() > self.elements() {
            return Err(ConfigError::invalid(
                "stride_bytes",
                format!(
                    "step of {} elements exceeds the {}-element array",
                    self.step_elements(),
                    self.elements()
                ),
            ));
        }
        Ok(())
    }
}

/// Pointer-chase configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChaseConfig {
    /// Number of 64-byte nodes.
    pub elements: usize,
    /// Permutation stride for the strided topology.
    pub stride: usize,
    pub topology: ChaseTopology,
    pub slots: SlotList<ChaseOp>,
    pub steps: IterationCount,
}

impl Default for ChaseConfig {
    fn default() -> Self {
        Self {
            elements: constants::DEFAULT_CHASE_ELEMENTS,
            stride: constants::DEFAULT_CHASE_STRIDE,
            topology: ChaseTopology::default(),
            slots: SlotList::default(),
            steps: IterationCount::Finite(constants::DEFAULT_CHASE_STEPS),
        }
    }
}

impl ChaseConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.elements < 2 {
            return Err(ConfigError::invalid("elements", "the ring needs at least two nodes"));
        }
        match self.topology {
            ChaseTopology::Strided => {
                if self.stride == 0 || self.stride >= self.elements {
                    return Err(ConfigError::invalid(
                        "stride",
                        format!("stride must be in 1..{} (element count)", self.elements),
                    ));
                }
                if gcd(self.stride as u64, self.elements as u64) != 1 {
                    return Err(ConfigError::NotCoprime {
                        stride: self.stride as u64,
                        elements: self.elements as u64,
                    });
                }
            }
            ChaseTopology::Forward => {}
        }
        Ok(())
    }
}

/// Pipeline-stress configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub slots: SlotList<PipeOp>,
    pub iterations: IterationCount,
    /// The eight polynomial coefficients shared by both evaluation forms.
    pub coeffs: [f64; 8],
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            slots: SlotList::of(&[PipeOp::Independent]).unwrap_or_default(),
            iterations: IterationCount::Finite(constants::DEFAULT_PIPELINE_ITERATIONS),
            coeffs: constants::SIN_COEFFS,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.coeffs.iter().any(|c| !c.is_finite()) {
            return Err(ConfigError::invalid("coeffs", "coefficients must be finite"));
        }
        Ok(())
    }
}

/// Syscall-spam configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyscallConfig {
    /// Working file name, created in the current directory.
    pub file_name: String,
    pub slots: SlotList<FileOp>,
    pub iterations: IterationCount,
}

impl Default for SyscallConfig {
    fn default() -> Self {
        Self {
            file_name: constants::DEFAULT_SYSCALL_FILE.to_string(),
            slots: SlotList::of(&[FileOp::Seek, FileOp::Write]).unwrap_or_default(),
            iterations: IterationCount::Finite(constants::DEFAULT_SYSCALL_ITERATIONS),
        }
    }
}

impl SyscallConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.file_name.is_empty() {
            return Err(ConfigError::invalid("file_name", "working file name must not be empty"));
        }
        // Keep the side effect scoped to the current directory.
        if self.file_name.contains(['/', '\\']) {
            return Err(ConfigError::invalid(
                "file_name",
                "working file must be a bare file name, not a path",
            ));
        }
        Ok(())
    }
}

/// Mem-thrash (page-granular memset) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemConfig {
    pub size_mb: usize,
    pub page_bytes: usize,
    pub slots: SlotList<PageOp>,
    pub iterations: IterationCount,
}

impl Default for MemConfig {
    fn default() -> Self {
        Self {
            size_mb: constants::DEFAULT_MEM_SIZE_MB,
            page_bytes: constants::DEFAULT_MEM_PAGE_BYTES,
            slots: SlotList::of(&[PageOp::SetPage]).unwrap_or_default(),
            iterations: IterationCount::Finite(constants::DEFAULT_MEM_ITERATIONS),
        }
    }
}

impl MemConfig {
    /// Total buffer size in bytes.
    pub fn size_bytes(&self) -> usize {
        self.size_mb * constants::MB
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.size_mb == 0 {
            return Err(ConfigError::invalid("size_mb", "buffer size must be positive"));
        }
        if self.page_bytes == 0 || self.page_bytes > self.size_bytes() {
            return Err(ConfigError::invalid(
                "page_bytes",
                "page size must be positive and no larger than the buffer",
            ));
        }
        Ok(())
    }
}

/// WCET capture driver configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WcetConfig {
    pub kernel: WcetKernel,
    /// Default replay count, used when the runtime argument is absent or
    /// non-numeric.
    pub default_iterations: u64,
    pub infinite: bool,
}

impl Default for WcetConfig {
    fn default() -> Self {
        Self {
            kernel: WcetKernel::Fibcall,
            default_iterations: constants::DEFAULT_WCET_ITERATIONS,
            infinite: false,
        }
    }
}

impl WcetConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.default_iterations == 0 {
            return Err(ConfigError::invalid("default_iterations", "replay count must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for config.
    use super::*;

    /// Validates `SlotList::parse` behavior for the ordered-list scenario.
    ///
    /// Assertions:
    /// - Confirms parsed slots keep their declaration order.
    /// - Confirms trailing positions stay unselected.
    #[test]
    fn test_slot_list_parse_preserves_order() {
        let slots: SlotList<ProbeOp> = SlotList::parse("load, store ,load").expect("parse");
        assert_eq!(slots.get(0), Some(ProbeOp::Load));
        assert_eq!(slots.get(1), Some(ProbeOp::Store));
        assert_eq!(slots.get(2), Some(ProbeOp::Load));
        assert_eq!(slots.get(3), None);
        assert_eq!(slots.get(4), None);
        assert_eq!(slots.selected(), 3);
    }

    /// Validates `SlotList::parse` behavior for the overfull scenario.
    ///
    /// Assertions:
    /// - Confirms a sixth slot is rejected with `TooManySlots`.
    #[test]
    fn test_slot_list_rejects_sixth_slot() {
        let err = SlotList::<ProbeOp>::parse("load,load,load,load,load,load").unwrap_err();
        assert!(matches!(err, ConfigError::TooManySlots { max: 5, got: 6, .. }));
    }

    /// Validates `SlotList::parse` behavior for the empty scenario.
    #[test]
    fn test_slot_list_empty_selects_nothing() {
        let slots: SlotList<BusOp> = SlotList::parse("").expect("parse");
        assert_eq!(slots.selected(), 0);
    }

    /// Validates `ChaseConfig::validate` for the coprimality constraint.
    ///
    /// Assertions:
    /// - Confirms a shared factor is rejected with `NotCoprime`.
    /// - Confirms a coprime stride passes.
    /// - Confirms the forward topology ignores the stride.
    #[test]
    fn test_chase_validate_requires_coprime_stride() {
        let bad = ChaseConfig { elements: 1024, stride: 1000, ..ChaseConfig::default() };
        assert!(matches!(bad.validate(), Err(ConfigError::NotCoprime { .. })));

        let good = ChaseConfig { elements: 1024, stride: 1001, ..ChaseConfig::default() };
        assert_eq!(good.validate(), Ok(()));

        let forward = ChaseConfig {
            elements: 1024,
            stride: 1000,
            topology: ChaseTopology::Forward,
            ..ChaseConfig::default()
        };
        assert_eq!(forward.validate(), Ok(()));
    }

    /// Validates `CacheConfig` step computation and bounds.
    ///
    /// Assertions:
    /// - Confirms the default 64-byte stride visits every 16th element.
    /// - Confirms a step wider than the array is rejected.
    #[test]
    fn test_cache_step_and_bounds() {
        let cfg = CacheConfig::default();
        assert_eq!(cfg.step_elements(), 16);
        assert_eq!(cfg.validate(), Ok(()));

        let overwide = CacheConfig {
            size_bytes: 256,
            stride_bytes: 1024,
            ..CacheConfig::default()
        };
        assert!(overwide.validate().is_err());
    }

    /// Validates every family default passes its own `validate`.
    #[test]
    fn test_defaults_validate() {
        assert_eq!(BusConfig::default().validate(), Ok(()));
        assert_eq!(CacheConfig::default().validate(), Ok(()));
        assert_eq!(ChaseConfig::default().validate(), Ok(()));
        assert_eq!(PipelineConfig::default().validate(), Ok(()));
        assert_eq!(SyscallConfig::default().validate(), Ok(()));
        assert_eq!(MemConfig::default().validate(), Ok(()));
        assert_eq!(WcetConfig::default().validate(), Ok(()));
    }

    /// Validates `IterationCount::from_str` accepts counts and "infinite".
    #[test]
    fn test_iteration_count_parse() {
        assert_eq!("500".parse::<IterationCount>(), Ok(IterationCount::Finite(500)));
        assert_eq!("infinite".parse::<IterationCount>(), Ok(IterationCount::Infinite));
        assert!("five".parse::<IterationCount>().is_err());
    }

    /// Validates `SyscallConfig::validate` keeps the file in the CWD.
    #[test]
    fn test_syscall_file_must_be_bare_name() {
        let cfg = SyscallConfig { file_name: "../escape.dat".into(), ..SyscallConfig::default() };
        assert!(cfg.validate().is_err());
    }
}
