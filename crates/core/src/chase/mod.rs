//! Pointer-chase workload.
//!
//! Walks a circular singly-linked list of cache-line-sized nodes whose next
//! pointers are permuted with a fixed stride, defeating both hardware
//! prefetch and memory-level parallelism: every step is a load whose address
//! depends on the previous load. The current node stays in a register across
//! steps; see [`walk`] for the advance capability and its per-architecture
//! paths.
//!
//! Topology: `strided` links node `i` to node `(i + stride) mod n` and is
//! only accepted when gcd(stride, n) = 1; otherwise the ring would
//! decompose into disjoint cycles, which validation rejects rather than
//! repairs. `forward` links strictly forward and wraps the last node to the
//! first.

// This module is the crate's one unsafe boundary: the walk operates on raw
// node pointers so the advance stays a single dependent load.
#![allow(unsafe_code)]

pub mod walk;

use std::mem::size_of;

use stresskit_common::StressError;
use stresskit_domain::{ChaseConfig, ChaseTopology};

use crate::errors::WorkloadResult;
use crate::slots::Nop;

/// One ring node, padded to exactly one cache line.
#[repr(C, align(64))]
#[derive(Debug)]
pub struct Node {
    /// Address of the successor node. Offset 0, so the advance is a single
    /// dependent load of the node's first word.
    next: *mut Node,
    /// Scratch word at offset 8; the store operation targets it.
    payload: u64,
}

// Compile-time check: one node spans exactly one cache line.
const _: () = assert!(size_of::<Node>() == 64);

/// A circular singly-linked ring of padded nodes in one contiguous
/// allocation.
#[derive(Debug)]
pub struct ChaseRing {
    nodes: Vec<Node>,
}

impl ChaseRing {
    /// Allocate the nodes and link them per the configured topology.
    pub fn build(config: &ChaseConfig) -> WorkloadResult<Self> {
        config.validate()?;

        let n = config.elements;
        let mut nodes: Vec<Node> = Vec::new();
        nodes
            .try_reserve_exact(n)
            .map_err(|e| StressError::alloc("chase ring", n * size_of::<Node>(), e))?;
        for _ in 0..n {
            nodes.push(Node { next: std::ptr::null_mut(), payload: 0 });
        }

        // The buffer never moves again, so node addresses taken here stay
        // valid for the lifetime of the ring.
        let base = nodes.as_mut_ptr();
        for (i, node) in nodes.iter_mut().enumerate() {
            let target = match config.topology {
                ChaseTopology::Strided => (i + config.stride) % n,
                ChaseTopology::Forward => {
                    if i + 1 == n {
                        0
                    } else {
                        i + 1
                    }
                }
            };
            node.next = base.wrapping_add(target);
        }

        tracing::debug!(
            elements = n,
            stride = config.stride,
            topology = ?config.topology,
            "chase ring linked"
        );
        Ok(Self { nodes })
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the ring is empty (never true for a built ring).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pointer to the ring's first node, the walk's starting point.
    pub fn start(&mut self) -> *mut Node {
        self.nodes.as_mut_ptr()
    }

    /// Index of the node `ptr` points at.
    pub fn index_of(&self, ptr: *const Node) -> usize {
        (ptr as usize - self.nodes.as_ptr() as usize) / size_of::<Node>()
    }

    /// The scratch payload of node `index`.
    pub fn payload_at(&self, index: usize) -> u64 {
        self.nodes[index].payload
    }
}

/// One per-step operation of the chase family.
pub trait ChaseSlot {
    /// Apply the operation at the node the walk just reached.
    ///
    /// # Safety
    ///
    /// `current` must point to a live node of the ring being walked, and no
    /// other reference to that node may exist for the duration of the call.
    unsafe fn apply(current: *mut Node);
}

/// Dependent re-load of the current node's next pointer.
#[derive(Debug, Clone, Copy)]
pub struct Load;

/// Store a constant into the current node's scratch word at offset 8.
#[derive(Debug, Clone, Copy)]
pub struct Store;

impl ChaseSlot for Load {
    #[inline(always)]
    unsafe fn apply(current: *mut Node) {
        walk::load_next(current);
    }
}

impl ChaseSlot for Store {
    #[inline(always)]
    unsafe fn apply(current: *mut Node) {
        walk::store_payload(current, 10);
    }
}

impl ChaseSlot for Nop {
    #[inline(always)]
    unsafe fn apply(_current: *mut Node) {}
}

/// Walk the ring for `steps` advances (or forever), applying the resolved
/// slot sequence at every node reached. Returns the index of the final
/// node.
pub fn run<S1, S2, S3, S4, S5>(ring: &mut ChaseRing, steps: Option<u64>) -> usize
where
    S1: ChaseSlot,
    S2: ChaseSlot,
    S3: ChaseSlot,
    S4: ChaseSlot,
    S5: ChaseSlot,
{
    let mut current = ring.start();

    // SAFETY: `current` starts at a live node, every `next` pointer set by
    // `build` targets a node of the same allocation, and the ring is
    // borrowed mutably for the whole walk so nothing else touches it.
    unsafe {
        match steps {
            Some(n) => {
                for _ in 0..n {
                    current = walk::advance(current);
                    S1::apply(current);
                    S2::apply(current);
                    S3::apply(current);
                    S4::apply(current);
                    S5::apply(current);
                }
            }
            None => loop {
                current = walk::advance(current);
                S1::apply(current);
                S2::apply(current);
                S3::apply(current);
                S4::apply(current);
                S5::apply(current);
            },
        }
    }

    ring.index_of(current)
}
