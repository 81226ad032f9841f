//! Pointer-chase variant binary.

mod cfg {
    include!(concat!(env!("OUT_DIR"), "/chase_variant.rs"));
}

use std::hint::black_box;

use stresskit_common::{die, report, Stopwatch};
use stresskit_core::chase::{self, ChaseRing};

fn main() {
    stresskit_cli::init();

    let config = cfg::config();
    let mut ring = match ChaseRing::build(&config) {
        Ok(ring) => ring,
        Err(err) => die!(err),
    };

    report::ring_geometry(cfg::ELEMENTS, cfg::STRIDE);

    let watch = Stopwatch::start();
    let end = chase::run::<cfg::Slot1, cfg::Slot2, cfg::Slot3, cfg::Slot4, cfg::Slot5>(
        &mut ring, cfg::STEPS,
    );
    let elapsed = watch.elapsed_us();

    // The final node index is the walk's only data result; consuming it pins
    // the dependency chain.
    black_box(end);
    report::elapsed_us(elapsed);
}
