//! Cache-probe variant binary.
//!
//! Prints the accumulated sum before the time line; consuming the sum is
//! what keeps the probe loop alive under optimization.

mod cfg {
    include!(concat!(env!("OUT_DIR"), "/cache_variant.rs"));
}

use stresskit_common::{die, report, Stopwatch};
use stresskit_core::cache::{self, ProbeState};

fn main() {
    stresskit_cli::init();

    let config = cfg::config();
    let mut state = match ProbeState::allocate(&config) {
        Ok(state) => state,
        Err(err) => die!(err),
    };

    let watch = Stopwatch::start();
    let sum = cache::run::<cfg::Slot1, cfg::Slot2, cfg::Slot3, cfg::Slot4, cfg::Slot5>(
        &mut state,
        cfg::PASSES,
    );
    let elapsed = watch.elapsed_us();

    report::sum(sum);
    report::elapsed_us(elapsed);
}
