//! The advance capability: step to the next node while defeating
//! instruction-level reordering that would hide memory latency.
//!
//! The measurement depends on the traversal being a chain of dependent
//! loads with the current node in a register. On x86_64 and aarch64 the
//! advance is a single hand-written load instruction; elsewhere a volatile
//! load provides the architecture-neutral ordering guarantee. Either way
//! the compiler cannot batch, reorder or prefetch across steps.

use std::ptr;

use super::Node;

/// Advance to the node's successor through the dependency chain.
///
/// # Safety
///
/// `current` must point to a live, linked node; its `next` field must point
/// to another live node of the same ring.
#[cfg(target_arch = "x86_64")]
#[inline(always)]
pub(crate) unsafe fn advance(current: *mut Node) -> *mut Node {
    let mut p = current;
    // One dependent load; `next` sits at offset 0.
    std::arch::asm!(
        "mov {p}, qword ptr [{p}]",
        p = inout(reg) p,
        options(nostack, readonly, preserves_flags),
    );
    p
}

/// Advance to the node's successor through the dependency chain.
///
/// # Safety
///
/// Same contract as the x86_64 path.
#[cfg(target_arch = "aarch64")]
#[inline(always)]
pub(crate) unsafe fn advance(current: *mut Node) -> *mut Node {
    let mut p = current;
    std::arch::asm!(
        "ldr {p}, [{p}]",
        p = inout(reg) p,
        options(nostack, readonly, preserves_flags),
    );
    p
}

/// Architecture-neutral advance: an explicitly ordered load the optimizer
/// may not elide or hoist.
///
/// # Safety
///
/// Same contract as the hand-tuned paths.
#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
#[inline(always)]
pub(crate) unsafe fn advance(current: *mut Node) -> *mut Node {
    ptr::read_volatile(ptr::addr_of!((*current).next))
}

/// Dependent re-load of the node's next pointer (the chase family's load
/// operation).
///
/// # Safety
///
/// `current` must point to a live node.
#[inline(always)]
pub(crate) unsafe fn load_next(current: *mut Node) {
    let _ = ptr::read_volatile(ptr::addr_of!((*current).next));
}

/// Volatile store into the node's scratch word (the chase family's store
/// operation).
///
/// # Safety
///
/// `current` must point to a live node.
#[inline(always)]
pub(crate) unsafe fn store_payload(current: *mut Node, value: u64) {
    ptr::write_volatile(ptr::addr_of_mut!((*current).payload), value);
}
