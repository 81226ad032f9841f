//! Syscall-spam variant binary.
//!
//! Finite runs remove the scratch file after reporting; infinite runs hold
//! it open for the process lifetime.

mod cfg {
    include!(concat!(env!("OUT_DIR"), "/syscall_variant.rs"));
}

use stresskit_common::{die, report, Noise, Stopwatch};
use stresskit_core::syscall::{self, FileState};

fn main() {
    stresskit_cli::init();

    let config = cfg::config();
    let mut noise = Noise::from_wall_clock();
    let mut state = match FileState::open(&config) {
        Ok(state) => state,
        Err(err) => die!(err),
    };

    let watch = Stopwatch::start();
    let outcome = syscall::run::<cfg::Slot1, cfg::Slot2, cfg::Slot3, cfg::Slot4, cfg::Slot5>(
        &mut state,
        &mut noise,
        cfg::ITERATIONS,
    );
    let elapsed = watch.elapsed_us();

    if let Err(err) = outcome {
        die!(err);
    }
    report::elapsed_us(elapsed);

    if let Err(err) = state.remove() {
        die!(err);
    }
}
