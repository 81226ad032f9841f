//! Page-granular memory-thrash workload.
//!
//! One large buffer, one random page-aligned chunk per iteration: each
//! selected slot fills some window of that chunk with a fresh noise byte.
//! Randomizing both the target page and the fill byte keeps the iterations
//! from collapsing into a single large fill the optimizer or the kernel
//! could satisfy lazily.

use stresskit_common::{Noise, StressError};
use stresskit_domain::MemConfig;

use crate::errors::WorkloadResult;
use crate::slots::Nop;

/// The thrash buffer and its page geometry.
#[derive(Debug)]
pub struct MemState {
    buf: Vec<u8>,
    page: usize,
}

impl MemState {
    /// Allocate and zero-fill the buffer.
    pub fn allocate(config: &MemConfig) -> WorkloadResult<Self> {
        config.validate()?;

        let len = config.size_mb * stresskit_domain::constants::MB;
        let mut buf: Vec<u8> = Vec::new();
        buf.try_reserve_exact(len)
            .map_err(|e| StressError::alloc("mem buffer", len, e))?;
        buf.resize(len, 0);
        tracing::debug!(size_mb = config.size_mb, page = config.page_bytes, "mem buffer allocated");
        Ok(Self { buf, page: config.page_bytes })
    }

    /// Number of whole pages in the buffer.
    pub fn pages(&self) -> usize {
        self.buf.len() / self.page
    }

    /// Current buffer contents.
    pub fn buf(&self) -> &[u8] {
        &self.buf
    }

    fn set_page(&mut self, offset: usize, value: u8) {
        self.buf[offset..offset + self.page].fill(value);
    }

    fn set_half_page(&mut self, offset: usize, value: u8) {
        self.buf[offset..offset + self.page / 2].fill(value);
    }

    fn set_half_offset(&mut self, offset: usize, value: u8) {
        let half = offset / 2;
        self.buf[half..half + self.page / 2].fill(value);
    }
}

/// One per-iteration operation of the mem family.
pub trait PageSlot {
    fn apply(state: &mut MemState, offset: usize, value: u8);
}

/// Fill the whole page at the chosen offset.
#[derive(Debug, Clone, Copy)]
pub struct SetPage;

/// Fill the first half of the page at the chosen offset.
#[derive(Debug, Clone, Copy)]
pub struct SetHalfPage;

/// Fill half a page starting at half the chosen offset.
#[derive(Debug, Clone, Copy)]
pub struct SetHalfOffset;

impl PageSlot for SetPage {
    #[inline(always)]
    fn apply(state: &mut MemState, offset: usize, value: u8) {
        state.set_page(offset, value);
    }
}

impl PageSlot for SetHalfPage {
    #[inline(always)]
    fn apply(state: &mut MemState, offset: usize, value: u8) {
        state.set_half_page(offset, value);
    }
}

impl PageSlot for SetHalfOffset {
    #[inline(always)]
    fn apply(state: &mut MemState, offset: usize, value: u8) {
        state.set_half_offset(offset, value);
    }
}

impl PageSlot for Nop {
    #[inline(always)]
    fn apply(_state: &mut MemState, _offset: usize, _value: u8) {}
}

#[inline(always)]
fn one_iteration<S1, S2, S3, S4, S5>(state: &mut MemState, noise: &mut Noise)
where
    S1: PageSlot,
    S2: PageSlot,
    S3: PageSlot,
    S4: PageSlot,
    S5: PageSlot,
{
    let offset = noise.below(state.pages() as u64) as usize * state.page;
    let value = noise.next_byte();
    S1::apply(state, offset, value);
    S2::apply(state, offset, value);
    S3::apply(state, offset, value);
    S4::apply(state, offset, value);
    S5::apply(state, offset, value);
}

/// Run the resolved slot sequence for `bound` iterations, or forever.
pub fn run<S1, S2, S3, S4, S5>(state: &mut MemState, noise: &mut Noise, bound: Option<u64>)
where
    S1: PageSlot,
    S2: PageSlot,
    S3: PageSlot,
    S4: PageSlot,
    S5: PageSlot,
{
    match bound {
        Some(n) => {
            for _ in 0..n {
                one_iteration::<S1, S2, S3, S4, S5>(state, noise);
            }
        }
        None => loop {
            one_iteration::<S1, S2, S3, S4, S5>(state, noise);
        },
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for mem.
    use stresskit_domain::{IterationCount, SlotList};

    use super::*;

    fn small_config() -> MemConfig {
        MemConfig {
            size_mb: 1,
            page_bytes: 4_096,
            slots: SlotList::default(),
            iterations: IterationCount::Finite(1),
        }
    }

    /// Validates page geometry: a 1 MiB buffer at a 4 KiB page holds 256
    /// pages and starts zeroed.
    #[test]
    fn test_allocation_geometry() {
        let state = MemState::allocate(&small_config()).expect("allocate");
        assert_eq!(state.pages(), 256);
        assert!(state.buf().iter().all(|&b| b == 0));
    }

    /// Validates `SetPage` fills exactly one page and nothing around it.
    #[test]
    fn test_set_page_fills_one_page() {
        let mut state = MemState::allocate(&small_config()).expect("allocate");
        state.set_page(8_192, 0xAB);

        assert!(state.buf()[..8_192].iter().all(|&b| b == 0));
        assert!(state.buf()[8_192..12_288].iter().all(|&b| b == 0xAB));
        assert!(state.buf()[12_288..].iter().all(|&b| b == 0));
    }

    /// Validates the half-page operations touch the windows they name.
    ///
    /// Assertions:
    /// - Confirms `SetHalfPage` fills the first half page at the offset.
    /// - Confirms `SetHalfOffset` fills a half page starting at offset/2.
    #[test]
    fn test_half_page_windows() {
        let mut state = MemState::allocate(&small_config()).expect("allocate");
        state.set_half_page(8_192, 0x11);
        assert!(state.buf()[8_192..10_240].iter().all(|&b| b == 0x11));
        assert!(state.buf()[10_240..12_288].iter().all(|&b| b == 0));

        state.set_half_offset(8_192, 0x22);
        assert!(state.buf()[4_096..6_144].iter().all(|&b| b == 0x22));
    }

    /// Validates a bounded run touches memory without ranging outside the
    /// buffer (no panic over many random offsets).
    #[test]
    fn test_run_stays_in_bounds() {
        let mut state = MemState::allocate(&small_config()).expect("allocate");
        let mut noise = Noise::seeded(41);
        run::<SetPage, SetHalfOffset, Nop, Nop, Nop>(&mut state, &mut noise, Some(2_000));
        assert!(state.buf().iter().any(|&b| b != 0));
    }
}
