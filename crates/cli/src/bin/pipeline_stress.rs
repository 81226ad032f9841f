//! Pipeline-stress variant binary.
//!
//! Every slot's accumulated sum is printed after the loop; the sums are what
//! keep the polynomial evaluations from being folded away.

mod cfg {
    include!(concat!(env!("OUT_DIR"), "/pipeline_variant.rs"));
}

use stresskit_common::{report, Noise, Stopwatch};
use stresskit_core::pipeline;

fn main() {
    stresskit_cli::init();

    let mut noise = Noise::from_wall_clock();

    let watch = Stopwatch::start();
    let outcome = pipeline::run::<cfg::Slot1, cfg::Slot2, cfg::Slot3, cfg::Slot4, cfg::Slot5>(
        &cfg::COEFFS,
        &mut noise,
        cfg::ITERATIONS,
    );
    let elapsed = watch.elapsed_us();

    for (slot, sum) in outcome.sums.iter().enumerate() {
        report::slot_sum(slot + 1, *sum);
    }
    report::elapsed_us(elapsed);
}
