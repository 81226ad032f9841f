//! WCET capture driver.
//!
//! Replays one build-time-selected kernel a runtime-selectable number of
//! times. The first CLI argument overrides the replay count; anything
//! non-numeric (or no argument) falls back to the build-time default, so the
//! driver never fails on its arguments.

mod cfg {
    include!(concat!(env!("OUT_DIR"), "/wcet_variant.rs"));
}

use std::hint::black_box;

use stresskit_common::{report, Stopwatch};
use stresskit_core::wcet;

fn main() {
    stresskit_cli::init();

    let iterations = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(cfg::DEFAULT_ITERATIONS);
    let entry = wcet::entry(cfg::KERNEL);
    tracing::info!(
        kernel = ?cfg::KERNEL,
        iterations,
        infinite = cfg::INFINITE,
        "wcet driver starting"
    );

    let watch = Stopwatch::start();
    let mut checksum = 0u64;
    if cfg::INFINITE {
        loop {
            checksum = checksum.wrapping_add(entry());
        }
    }
    for _ in 0..iterations {
        checksum = checksum.wrapping_add(entry());
    }
    let elapsed = watch.elapsed_us();

    black_box(checksum);
    report::total_iterations(iterations);
    report::elapsed_us(elapsed);
}
