//! Page-granular mem-thrash variant binary.

mod cfg {
    include!(concat!(env!("OUT_DIR"), "/mem_variant.rs"));
}

use stresskit_common::{die, report, Noise, Stopwatch};
use stresskit_core::mem::{self, MemState};

fn main() {
    stresskit_cli::init();

    let config = cfg::config();
    let mut noise = Noise::from_wall_clock();
    let mut state = match MemState::allocate(&config) {
        Ok(state) => state,
        Err(err) => die!(err),
    };

    let watch = Stopwatch::start();
    mem::run::<cfg::Slot1, cfg::Slot2, cfg::Slot3, cfg::Slot4, cfg::Slot5>(
        &mut state,
        &mut noise,
        cfg::ITERATIONS,
    );
    report::elapsed_us(watch.elapsed_us());
}
