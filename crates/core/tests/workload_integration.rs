//! End-to-end workload scenarios across crate boundaries: default
//! configurations from the domain crate driving full skeleton runs.

use stresskit_common::Noise;
use stresskit_core::cache::{self, Load, ProbeState};
use stresskit_core::chase::{self, ChaseRing};
use stresskit_core::pipeline::{self, Dependent, Independent};
use stresskit_core::slots::Nop;
use stresskit_core::syscall::{self, FileState, Reader, Reopen, Seeker, Writer};
use stresskit_domain::constants::SIN_COEFFS;
use stresskit_domain::{CacheConfig, ChaseConfig};

/// The canonical cache scenario: 32 KiB working set, 64-byte stride, one
/// load slot, 500 passes. The deterministic fill makes the printed sum an
/// exact function of the visited indices.
#[test]
fn test_cache_probe_default_scenario_sum() {
    let config = CacheConfig::default();
    let mut state = ProbeState::allocate(&config).expect("allocate");

    let sum = cache::run::<Load, Nop, Nop, Nop, Nop>(&mut state, Some(500));

    let per_pass: u64 = (0..config.elements() as u64)
        .step_by(state.step())
        .sum();
    assert_eq!(sum, per_pass.wrapping_mul(500));
}

/// The pipeline comparison scenario: both evaluation forms on shared inputs
/// accumulate per-slot sums whose means agree within floating-point
/// tolerance.
#[test]
fn test_pipeline_forms_agree_over_long_run() {
    let iterations = 200_000u64;
    let outcome = pipeline::run::<Independent, Dependent, Nop, Nop, Nop>(
        &SIN_COEFFS,
        &mut Noise::seeded(99),
        Some(iterations),
    );

    let mean_independent = outcome.sums[0] / iterations as f64;
    let mean_dependent = outcome.sums[1] / iterations as f64;
    assert!(
        (mean_independent - mean_dependent).abs() <= 1e-9,
        "{mean_independent} vs {mean_dependent}"
    );
}

/// A full strided chase over the default-shaped ring (scaled down) returns
/// to the start after exactly `elements` steps.
#[test]
fn test_chase_full_cycle_on_scaled_default() {
    let config = ChaseConfig { elements: 1 << 16, stride: 1_001, ..ChaseConfig::default() };
    let mut ring = ChaseRing::build(&config).expect("build");

    let end = chase::run::<Nop, Nop, Nop, Nop, Nop>(&mut ring, Some(config.elements as u64));
    assert_eq!(end, 0);
}

/// The syscall family survives a bounded run with every operation selected
/// and cleans up its scratch file afterwards.
#[test]
fn test_syscall_spam_bounded_run_with_cleanup() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut state = FileState::open_at(&dir.path().join("scratch.dat")).expect("open");

    syscall::run::<Seeker, Reader, Writer, Reopen, Nop>(
        &mut state,
        &mut Noise::seeded(7),
        Some(500),
    )
    .expect("bounded run");

    let path = state.path().to_path_buf();
    state.remove().expect("remove scratch file");
    assert!(!path.exists());
}
