//! Bus/memory-thrash workload.
//!
//! Keeps the memory bus and DRAM controller saturated by moving large
//! buffers that exceed cache capacity. Two parallel buffers are allocated
//! and filled with a noise-derived pattern before timing starts (the fill
//! defeats zero-page mapping and copy-on-write); each selected slot then
//! performs one full pass per iteration, either a straight copy or a
//! compute-and-store that adds fresh noise element-wise so nothing can be
//! constant-folded.

use std::mem::size_of;

use stresskit_common::{Noise, StressError};
use stresskit_domain::BusConfig;

use crate::element::Element;
use crate::errors::WorkloadResult;
use crate::slots::Nop;

/// The two parallel thrash buffers.
#[derive(Debug)]
pub struct BusState<E> {
    a: Vec<E>,
    b: Vec<E>,
}

impl<E: Element> BusState<E> {
    /// Allocate and fill both buffers.
    ///
    /// The element type `E` must match `config.width`; the resolver
    /// guarantees this for generated variants.
    pub fn allocate(config: &BusConfig, noise: &mut Noise) -> WorkloadResult<Self> {
        config.validate()?;
        debug_assert_eq!(size_of::<E>(), config.width.bytes());

        let len = config.size_bytes() / size_of::<E>();
        let a = filled_buffer(len, noise)?;
        let b = filled_buffer(len, noise)?;
        tracing::debug!(size_mb = config.size_mb, elements = len, "bus buffers allocated");
        Ok(Self { a, b })
    }

    /// Buffer A contents.
    pub fn a(&self) -> &[E] {
        &self.a
    }

    /// Buffer B contents.
    pub fn b(&self) -> &[E] {
        &self.b
    }

    fn copy_a_to_b(&mut self) {
        self.b.copy_from_slice(&self.a);
    }

    fn copy_b_to_a(&mut self) {
        self.a.copy_from_slice(&self.b);
    }

    fn compute_in_place_a(&mut self, noise: &mut Noise) {
        for elem in &mut self.a {
            *elem = elem.mix(noise.next_u64());
        }
    }

    fn compute_a_to_b(&mut self, noise: &mut Noise) {
        for i in 0..self.a.len() {
            self.b[i] = self.a[i].mix(noise.next_u64());
        }
    }

    fn compute_b_to_a(&mut self, noise: &mut Noise) {
        for i in 0..self.b.len() {
            self.a[i] = self.b[i].mix(noise.next_u64());
        }
    }
}

fn filled_buffer<E: Element>(len: usize, noise: &mut Noise) -> Result<Vec<E>, StressError> {
    let mut buf: Vec<E> = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|e| StressError::alloc("bus buffer", len * size_of::<E>(), e))?;
    // One noise-derived pattern per buffer, like a memset with a random
    // byte: enough to materialize real pages.
    buf.resize(len, E::from_noise(noise.next_u64()));
    Ok(buf)
}

/// One full-buffer operation of the bus family.
pub trait BusSlot {
    fn apply<E: Element>(state: &mut BusState<E>, noise: &mut Noise);
}

/// Copy buffer A into buffer B.
#[derive(Debug, Clone, Copy)]
pub struct CopyAToB;

/// Copy buffer B into buffer A.
#[derive(Debug, Clone, Copy)]
pub struct CopyBToA;

/// `a[i] = a[i] + noise`.
#[derive(Debug, Clone, Copy)]
pub struct ComputeInPlaceA;

/// `b[i] = a[i] + noise`.
#[derive(Debug, Clone, Copy)]
pub struct ComputeAToB;

/// `a[i] = b[i] + noise`.
#[derive(Debug, Clone, Copy)]
pub struct ComputeBToA;

impl BusSlot for CopyAToB {
    #[inline(always)]
    fn apply<E: Element>(state: &mut BusState<E>, _noise: &mut Noise) {
        state.copy_a_to_b();
    }
}

impl BusSlot for CopyBToA {
    #[inline(always)]
    fn apply<E: Element>(state: &mut BusState<E>, _noise: &mut Noise) {
        state.copy_b_to_a();
    }
}

impl BusSlot for ComputeInPlaceA {
    #[inline(always)]
    fn apply<E: Element>(state: &mut BusState<E>, noise: &mut Noise) {
        state.compute_in_place_a(noise);
    }
}

impl BusSlot for ComputeAToB {
    #[inline(always)]
    fn apply<E: Element>(state: &mut BusState<E>, noise: &mut Noise) {
        state.compute_a_to_b(noise);
    }
}

impl BusSlot for ComputeBToA {
    #[inline(always)]
    fn apply<E: Element>(state: &mut BusState<E>, noise: &mut Noise) {
        state.compute_b_to_a(noise);
    }
}

impl BusSlot for Nop {
    #[inline(always)]
    fn apply<E: Element>(_state: &mut BusState<E>, _noise: &mut Noise) {}
}

#[inline(always)]
fn one_iteration<E, S1, S2, S3, S4, S5>(state: &mut BusState<E>, noise: &mut Noise)
where
    E: Element,
    S1: BusSlot,
    S2: BusSlot,
    S3: BusSlot,
    S4: BusSlot,
    S5: BusSlot,
{
    S1::apply(state, noise);
    S2::apply(state, noise);
    S3::apply(state, noise);
    S4::apply(state, noise);
    S5::apply(state, noise);
}

/// Run the resolved slot sequence for `bound` iterations, or forever.
pub fn run<E, S1, S2, S3, S4, S5>(state: &mut BusState<E>, noise: &mut Noise, bound: Option<u64>)
where
    E: Element,
    S1: BusSlot,
    S2: BusSlot,
    S3: BusSlot,
    S4: BusSlot,
    S5: BusSlot,
{
    match bound {
        Some(n) => {
            for _ in 0..n {
                one_iteration::<E, S1, S2, S3, S4, S5>(state, noise);
            }
        }
        None => loop {
            one_iteration::<E, S1, S2, S3, S4, S5>(state, noise);
        },
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for bus.
    use stresskit_domain::{ElemWidth, IterationCount, SlotList};

    use super::*;

    fn small_config(width: ElemWidth) -> BusConfig {
        BusConfig {
            size_mb: 1,
            width,
            slots: SlotList::default(),
            iterations: IterationCount::Finite(1),
        }
    }

    /// Validates the copy operation for the byte-identity property: after a
    /// lone A->B copy with no compute step, B equals A exactly.
    #[test]
    fn test_copy_slot_makes_buffers_identical() {
        let mut noise = Noise::seeded(11);
        let mut state =
            BusState::<u32>::allocate(&small_config(ElemWidth::U32), &mut noise).expect("allocate");
        assert_ne!(state.a(), state.b(), "buffers start with distinct fills");

        run::<u32, CopyAToB, Nop, Nop, Nop, Nop>(&mut state, &mut noise, Some(1));
        assert_eq!(state.a(), state.b());
    }

    /// Validates `ComputeAToB` perturbs rather than copies.
    ///
    /// Assertions:
    /// - Confirms B differs from A after a compute pass (noise was added).
    /// - Confirms A is untouched by the A->B direction.
    #[test]
    fn test_compute_slot_adds_noise() {
        let mut noise = Noise::seeded(12);
        let mut state =
            BusState::<i64>::allocate(&small_config(ElemWidth::I64), &mut noise).expect("allocate");
        let a_before: Vec<i64> = state.a().to_vec();

        run::<i64, ComputeAToB, Nop, Nop, Nop, Nop>(&mut state, &mut noise, Some(1));
        assert_eq!(state.a(), a_before.as_slice());
        assert_ne!(state.a(), state.b());
    }

    /// Validates slot ordering: a compute into B followed by a B->A copy
    /// must leave A equal to the perturbed B, proving slot 1 feeds slot 2.
    #[test]
    fn test_slots_run_in_ascending_order() {
        let mut noise = Noise::seeded(13);
        let mut state =
            BusState::<u8>::allocate(&small_config(ElemWidth::U8), &mut noise).expect("allocate");

        run::<u8, ComputeAToB, CopyBToA, Nop, Nop, Nop>(&mut state, &mut noise, Some(1));
        assert_eq!(state.a(), state.b());
    }

    /// Validates buffer sizing across element widths.
    ///
    /// Assertions:
    /// - Confirms a 1 MiB buffer holds the width-appropriate element count.
    #[test]
    fn test_element_count_follows_width() {
        let mut noise = Noise::seeded(14);
        let s8 = BusState::<u8>::allocate(&small_config(ElemWidth::U8), &mut noise).expect("u8");
        let s64 =
            BusState::<u64>::allocate(&small_config(ElemWidth::U64), &mut noise).expect("u64");
        assert_eq!(s8.a().len(), 1 << 20);
        assert_eq!(s64.a().len(), (1 << 20) / 8);
    }

    /// Validates `allocate` rejects an invalid configuration before touching
    /// memory.
    #[test]
    fn test_zero_size_is_a_config_error() {
        let mut noise = Noise::seeded(15);
        let cfg = BusConfig { size_mb: 0, ..BusConfig::default() };
        assert!(BusState::<i32>::allocate(&cfg, &mut noise).is_err());
    }
}
