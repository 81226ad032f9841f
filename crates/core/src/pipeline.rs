//! Pipeline-stress workload.
//!
//! Contrasts processor behavior under independent versus dependent
//! arithmetic by evaluating the same degree-15 sine polynomial two ways:
//! as a sum of independently computable power terms (no dependency chain,
//! full pipeline utilization) and in Horner form (every step waits on the
//! previous one). Both forms share the same eight coefficients, so their
//! outputs agree to floating-point precision, which is what makes a slot
//! pair a meaningful pipelined-vs-stalled comparison.
//!
//! Each iteration draws one fresh pseudo-random input shared by all slots;
//! every slot accumulates into its own sum, and the sums are reported after
//! the loop to block dead-code elimination.

use stresskit_common::Noise;
use stresskit_domain::config::SLOT_COUNT;

use crate::slots::Nop;

/// Sine approximation as independent power terms.
///
/// Every term rebuilds its power of `x` from scratch, so the terms carry no
/// data dependencies between each other and can issue back to back.
#[inline(always)]
pub fn sin_independent(x: f64, c: &[f64; 8]) -> f64 {
    x * c[0]
        + x * x * x * c[1]
        + x * x * x * x * x * c[2]
        + x * x * x * x * x * x * x * c[3]
        + x * x * x * x * x * x * x * x * x * c[4]
        + x * x * x * x * x * x * x * x * x * x * x * c[5]
        + x * x * x * x * x * x * x * x * x * x * x * x * x * c[6]
        + x * x * x * x * x * x * x * x * x * x * x * x * x * x * x * c[7]
}

/// Sine approximation in Horner form.
///
/// Maximal stall chain: each multiply-add needs the previous one's result.
#[inline(always)]
pub fn sin_dependent(x: f64, c: &[f64; 8]) -> f64 {
    let x2 = x * x;
    let tail = c[4] + x2 * (c[5] + x2 * (c[6] + x2 * c[7]));
    x * (c[0] + x2 * (c[1] + x2 * (c[2] + x2 * (c[3] + x2 * tail))))
}

/// One per-iteration operation of the pipeline family.
pub trait PipeSlot {
    fn apply(x: f64, coeffs: &[f64; 8], sum: &mut f64);
}

/// Evaluate the independent-terms form.
#[derive(Debug, Clone, Copy)]
pub struct Independent;

/// Evaluate the Horner form.
#[derive(Debug, Clone, Copy)]
pub struct Dependent;

impl PipeSlot for Independent {
    #[inline(always)]
    fn apply(x: f64, coeffs: &[f64; 8], sum: &mut f64) {
        *sum += sin_independent(x, coeffs);
    }
}

impl PipeSlot for Dependent {
    #[inline(always)]
    fn apply(x: f64, coeffs: &[f64; 8], sum: &mut f64) {
        *sum += sin_dependent(x, coeffs);
    }
}

impl PipeSlot for Nop {
    #[inline(always)]
    fn apply(_x: f64, _coeffs: &[f64; 8], _sum: &mut f64) {}
}

/// Per-slot accumulated sums after a finished run.
#[derive(Debug, Clone, Copy)]
pub struct PipelineOutcome {
    /// One running sum per slot position; unselected slots stay at zero.
    pub sums: [f64; SLOT_COUNT],
}

#[inline(always)]
fn one_iteration<S1, S2, S3, S4, S5>(x: f64, coeffs: &[f64; 8], sums: &mut [f64; SLOT_COUNT])
where
    S1: PipeSlot,
    S2: PipeSlot,
    S3: PipeSlot,
    S4: PipeSlot,
    S5: PipeSlot,
{
    S1::apply(x, coeffs, &mut sums[0]);
    S2::apply(x, coeffs, &mut sums[1]);
    S3::apply(x, coeffs, &mut sums[2]);
    S4::apply(x, coeffs, &mut sums[3]);
    S5::apply(x, coeffs, &mut sums[4]);
}

/// Run the resolved slot sequence for `bound` iterations, or forever.
pub fn run<S1, S2, S3, S4, S5>(
    coeffs: &[f64; 8],
    noise: &mut Noise,
    bound: Option<u64>,
) -> PipelineOutcome
where
    S1: PipeSlot,
    S2: PipeSlot,
    S3: PipeSlot,
    S4: PipeSlot,
    S5: PipeSlot,
{
    let mut sums = [0.0; SLOT_COUNT];
    match bound {
        Some(n) => {
            for _ in 0..n {
                let x = noise.unit_f64();
                one_iteration::<S1, S2, S3, S4, S5>(x, coeffs, &mut sums);
            }
        }
        None => loop {
            let x = noise.unit_f64();
            one_iteration::<S1, S2, S3, S4, S5>(x, coeffs, &mut sums);
        },
    }
    PipelineOutcome { sums }
}
