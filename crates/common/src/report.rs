//! Fixed-format stdout report lines.
//!
//! External monitoring scripts scrape these lines verbatim, so the formats
//! are part of the suite's interface and must not drift.

#![allow(clippy::print_stdout)]

/// Print the elapsed time of the measured region.
pub fn elapsed_us(us: u64) {
    println!("total time(us): {us}");
}

/// Print an accumulated integer sum (dead-code-elimination witness).
pub fn sum(value: u64) {
    println!("Sum: {value}");
}

/// Print one slot's accumulated floating-point sum.
pub fn slot_sum(slot: usize, value: f64) {
    println!("Sum[{slot}]: {value}");
}

/// Print the pointer-chase ring geometry ahead of the timed region.
pub fn ring_geometry(elements: usize, stride: usize) {
    println!("We have {elements} ELEMENTS");
    println!("The stride is {stride}");
}

/// Print the iteration count replayed by the WCET driver.
pub fn total_iterations(count: u64) {
    println!("{count} total-iterations");
}
