//! Workload skeleton benchmarks
//!
//! Benchmarks cover the sine evaluation forms, cache-probe passes and
//! pointer-chase walks so regressions in the hot loops are visible outside
//! a full stress run.
//!
//! Run with: `cargo bench --bench kernel_bench -p stresskit-core`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use stresskit_common::Noise;
use stresskit_core::cache::{self, Load as ProbeLoad, ProbeState};
use stresskit_core::chase::{self, ChaseRing};
use stresskit_core::pipeline::{sin_dependent, sin_independent};
use stresskit_core::slots::Nop;
use stresskit_core::wcet;
use stresskit_domain::constants::SIN_COEFFS;
use stresskit_domain::{
    CacheConfig, ChaseConfig, ChaseTopology, IterationCount, SlotList, WcetKernel,
};

// -----------------------------------------------------------------------------
// Sine evaluation forms
// -----------------------------------------------------------------------------

fn bench_sine_forms(c: &mut Criterion) {
    let mut noise = Noise::seeded(1);
    let inputs: Vec<f64> = (0..1_024).map(|_| noise.unit_f64()).collect();

    let mut group = c.benchmark_group("sine_forms");
    group.throughput(Throughput::Elements(inputs.len() as u64));

    group.bench_function("independent", |b| {
        b.iter(|| {
            let mut sum = 0.0;
            for &x in &inputs {
                sum += sin_independent(black_box(x), &SIN_COEFFS);
            }
            black_box(sum);
        });
    });

    group.bench_function("dependent", |b| {
        b.iter(|| {
            let mut sum = 0.0;
            for &x in &inputs {
                sum += sin_dependent(black_box(x), &SIN_COEFFS);
            }
            black_box(sum);
        });
    });

    group.finish();
}

// -----------------------------------------------------------------------------
// Cache-probe passes
// -----------------------------------------------------------------------------

fn bench_cache_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache_pass");

    for size_kb in [32usize, 256, 2_048] {
        let config = CacheConfig { size_bytes: size_kb * 1_024, ..CacheConfig::default() };
        let mut state = ProbeState::allocate(&config).expect("allocate probe state");

        group.throughput(Throughput::Elements((config.elements() / state.step()) as u64));
        group.bench_with_input(BenchmarkId::new("load", size_kb), &size_kb, |b, _| {
            b.iter(|| {
                black_box(cache::run::<ProbeLoad, Nop, Nop, Nop, Nop>(&mut state, Some(1)));
            });
        });
    }

    group.finish();
}

// -----------------------------------------------------------------------------
// Pointer-chase walks
// -----------------------------------------------------------------------------

fn bench_chase_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("chase_walk");

    for elements in [4_096usize, 65_536, 1_048_576] {
        let config = ChaseConfig {
            elements,
            stride: 1_001,
            topology: ChaseTopology::Strided,
            slots: SlotList::default(),
            steps: IterationCount::Finite(0),
        };
        let mut ring = ChaseRing::build(&config).expect("build chase ring");

        group.throughput(Throughput::Elements(elements as u64));
        group.bench_with_input(BenchmarkId::new("strided", elements), &elements, |b, &n| {
            b.iter(|| {
                black_box(chase::run::<Nop, Nop, Nop, Nop, Nop>(&mut ring, Some(n as u64)));
            });
        });
    }

    group.finish();
}

// -----------------------------------------------------------------------------
// WCET kernels
// -----------------------------------------------------------------------------

fn bench_wcet_kernels(c: &mut Criterion) {
    let mut group = c.benchmark_group("wcet_kernels");

    for kernel in [WcetKernel::Fibcall, WcetKernel::Matmult, WcetKernel::Crc, WcetKernel::Prime] {
        let run = wcet::entry(kernel);
        group.bench_with_input(
            BenchmarkId::new("entry", format!("{kernel:?}")),
            &run,
            |b, run| {
                b.iter(|| black_box(run()));
            },
        );
    }

    group.finish();
}

criterion_group!(
    kernel_benches,
    bench_sine_forms,
    bench_cache_pass,
    bench_chase_walk,
    bench_wcet_kernels,
);
criterion_main!(kernel_benches);
