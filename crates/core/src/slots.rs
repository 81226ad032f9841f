//! The shared unselected-slot type.

/// The unselected slot.
///
/// `Nop` implements every family's operation trait with an empty
/// `#[inline(always)]` body, so an unfilled slot costs nothing at run time:
/// no branch, no call, no instruction. This is what keeps the hot loop's
/// instruction-level characteristics reproducible across variants that
/// select fewer than five operations.
#[derive(Debug, Clone, Copy)]
pub struct Nop;
