//! The per-family operation catalogs.
//!
//! Each family exposes a small closed enumeration of primitive operations a
//! slot may hold. Identifiers are kebab-case strings as accepted by the
//! `STRESSKIT_*_SLOTS` build-time knobs; anything outside a catalog is a
//! configuration error carrying the full list of accepted names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, ConfigResult};

/// A named member of a closed operation catalog.
pub trait SlotOp: Copy + Eq + fmt::Debug + 'static + Sized {
    /// Family name used in diagnostics.
    const FAMILY: &'static str;

    /// Every member of the catalog, in declaration order.
    fn catalog() -> &'static [Self];

    /// The member's kebab-case identifier.
    fn name(self) -> &'static str;

    /// Resolve an identifier against the catalog.
    fn parse(name: &str) -> ConfigResult<Self> {
        Self::catalog()
            .iter()
            .copied()
            .find(|op| op.name() == name)
            .ok_or_else(|| ConfigError::UnknownOperation {
                family: Self::FAMILY,
                name: name.to_string(),
                allowed: Self::catalog()
                    .iter()
                    .map(|op| op.name())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

macro_rules! catalog {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident, family = $family:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $ident:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        $vis enum $name {
            // The serde name is the catalog identifier itself, so the wire
            // form can never drift from what `parse` accepts.
            $( $(#[$vmeta])* #[serde(rename = $ident)] $variant, )+
        }

        impl SlotOp for $name {
            const FAMILY: &'static str = $family;

            fn catalog() -> &'static [Self] {
                &[ $( Self::$variant, )+ ]
            }

            fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => $ident, )+
                }
            }
        }

        impl FromStr for $name {
            type Err = ConfigError;

            fn from_str(s: &str) -> ConfigResult<Self> {
                <Self as SlotOp>::parse(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

catalog! {
    /// Bus/memory-thrash operations. Each performs one full pass over the
    /// two parallel buffers.
    pub enum BusOp, family = "bus" {
        /// Copy buffer A into buffer B.
        CopyAToB => "copy-a-b",
        /// Copy buffer B into buffer A.
        CopyBToA => "copy-b-a",
        /// `a[i] = a[i] + noise` (round-trips every element through the CPU).
        ComputeInPlaceA => "compute-a-a",
        /// `b[i] = a[i] + noise`.
        ComputeAToB => "compute-a-b",
        /// `a[i] = b[i] + noise`.
        ComputeBToA => "compute-b-a",
    }
}

catalog! {
    /// Cache-probe operations, applied at each visited array index.
    pub enum ProbeOp, family = "cache" {
        /// Store the index value at the visited position.
        Store => "store",
        /// Load the visited element and accumulate it into the running sum.
        Load => "load",
    }
}

catalog! {
    /// Pointer-chase operations, applied at each node of the walk without
    /// breaking the pointer-dependency chain.
    pub enum ChaseOp, family = "pointer-chase" {
        /// Store a constant at a fixed offset within the current node.
        Store => "store",
        /// Dependent re-load of the current node's next pointer.
        Load => "load",
    }
}

catalog! {
    /// Pipeline-stress operations; both evaluate the same sine polynomial.
    pub enum PipeOp, family = "pipeline" {
        /// Independent power terms; no data dependencies between them.
        Independent => "independent",
        /// Horner form; every step depends on the previous one.
        Dependent => "dependent",
    }
}

catalog! {
    /// Syscall-spam file operations against the working file.
    pub enum FileOp, family = "syscall" {
        /// Seek to the position derived from the threaded value.
        Seek => "seek",
        /// Read one byte at the current position.
        Read => "read",
        /// Write one byte at the current position.
        Write => "write",
        /// Close the working file and open it again.
        Reopen => "reopen",
    }
}

catalog! {
    /// Page-granular memset operations of the mem-thrash family.
    pub enum PageOp, family = "mem" {
        /// Fill the whole selected page with a noise byte.
        SetPage => "set-page",
        /// Fill the first half of the selected page.
        SetHalfPage => "set-half-page",
        /// Fill half a page starting at half the selected offset.
        SetHalfOffset => "set-half-offset",
    }
}

catalog! {
    /// Small deterministic workloads replayable by the WCET capture driver.
    pub enum WcetKernel, family = "wcet" {
        /// Iterative Fibonacci.
        Fibcall => "fibcall",
        /// Bubble sort over a fixed 100-element array.
        Bsort => "bsort",
        /// Insertion sort over a fixed array.
        Insertsort => "insertsort",
        /// Dense 20x20 integer matrix multiply.
        Matmult => "matmult",
        /// CRC over a fixed message.
        Crc => "crc",
        /// Count primes below a fixed bound.
        Prime => "prime",
        /// Element-wise float vector addition.
        VectorAdd => "vector-add",
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for catalog.
    use super::*;

    /// Validates `SlotOp::parse` behavior for the round-trip scenario.
    ///
    /// Assertions:
    /// - Confirms every catalog member parses back from its own name.
    #[test]
    fn test_names_round_trip() {
        for op in BusOp::catalog() {
            assert_eq!(BusOp::parse(op.name()).as_ref(), Ok(op));
        }
        for op in FileOp::catalog() {
            assert_eq!(FileOp::parse(op.name()).as_ref(), Ok(op));
        }
        for op in WcetKernel::catalog() {
            assert_eq!(WcetKernel::parse(op.name()).as_ref(), Ok(op));
        }
    }

    /// Validates `SlotOp::parse` behavior for the out-of-catalog scenario.
    ///
    /// Assertions:
    /// - Confirms the error names the family and lists the catalog.
    #[test]
    fn test_unknown_operation_lists_catalog() {
        let err = ProbeOp::parse("flush").unwrap_err();
        match err {
            ConfigError::UnknownOperation { family, name, allowed } => {
                assert_eq!(family, "cache");
                assert_eq!(name, "flush");
                assert!(allowed.contains("store") && allowed.contains("load"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    fn assert_serde_matches<O>()
    where
        O: SlotOp + Serialize + serde::de::DeserializeOwned,
    {
        for &op in O::catalog() {
            let json = serde_json::to_string(&op).expect("serialize");
            assert_eq!(json, format!("\"{}\"", op.name()), "{op:?}");
            let back: O = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(back, op);
        }
    }

    /// Validates serde naming stays aligned with `SlotOp::name` for every
    /// member of every catalog.
    ///
    /// Assertions:
    /// - Confirms the JSON form of each member equals its catalog
    ///   identifier, including multi-word names such as `compute-a-b`.
    /// - Confirms each JSON form deserializes back to the same member.
    #[test]
    fn test_serde_names_match_catalog() {
        assert_serde_matches::<BusOp>();
        assert_serde_matches::<ProbeOp>();
        assert_serde_matches::<ChaseOp>();
        assert_serde_matches::<PipeOp>();
        assert_serde_matches::<FileOp>();
        assert_serde_matches::<PageOp>();
        assert_serde_matches::<WcetKernel>();
    }
}
