//! Bus/memory-thrash variant binary.
//!
//! Buffer size, element width, slot sequence and iteration count were all
//! resolved by the build script; the hot loop below is fully monomorphized.

mod cfg {
    include!(concat!(env!("OUT_DIR"), "/bus_variant.rs"));
}

use stresskit_common::{die, report, Noise, Stopwatch};
use stresskit_core::bus::{self, BusState};

fn main() {
    stresskit_cli::init();

    let config = cfg::config();
    tracing::info!(size_mb = config.size_mb, iterations = ?cfg::ITERATIONS, "bus-thrash starting");

    let mut noise = Noise::from_wall_clock();
    let mut state = match BusState::<cfg::Elem>::allocate(&config, &mut noise) {
        Ok(state) => state,
        Err(err) => die!(err),
    };

    let watch = Stopwatch::start();
    bus::run::<cfg::Elem, cfg::Slot1, cfg::Slot2, cfg::Slot3, cfg::Slot4, cfg::Slot5>(
        &mut state,
        &mut noise,
        cfg::ITERATIONS,
    );
    report::elapsed_us(watch.elapsed_us());
}
