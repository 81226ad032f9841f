//! Buffer element widths for the bus-thrash family.
//!
//! The element type is a build-time knob because operation cost and
//! cache-line utilization per element differ by width. All arithmetic is
//! wrapping; the noise operand only exists to defeat constant folding.

use std::fmt;

mod sealed {
    pub trait Sealed {}
}

/// An integer buffer element of one of the eight supported widths.
pub trait Element:
    Copy + Default + PartialEq + fmt::Debug + sealed::Sealed + Send + 'static
{
    /// Derive an element from a raw noise word (truncating).
    fn from_noise(noise: u64) -> Self;

    /// Wrapping add of a noise word (truncating).
    #[must_use]
    fn mix(self, noise: u64) -> Self;
}

macro_rules! element_impl {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Element for $ty {
                #[inline(always)]
                fn from_noise(noise: u64) -> Self {
                    noise as $ty
                }

                #[inline(always)]
                fn mix(self, noise: u64) -> Self {
                    self.wrapping_add(noise as $ty)
                }
            }
        )+
    };
}

element_impl!(u8, i8, u16, i16, u32, i32, u64, i64);

#[cfg(test)]
mod tests {
    //! Unit tests for element.
    use super::*;

    /// Validates `Element::mix` behavior for the wrapping scenario.
    ///
    /// Assertions:
    /// - Confirms an 8-bit element wraps instead of overflowing.
    /// - Confirms mixing zero noise is the identity.
    #[test]
    fn test_mix_wraps() {
        let e: u8 = Element::from_noise(0xFF);
        assert_eq!(e, 0xFF);
        assert_eq!(e.mix(1), 0);
        assert_eq!(e.mix(0), e);
    }

    /// Validates `Element::from_noise` truncation across widths.
    ///
    /// Assertions:
    /// - Confirms each width keeps its low-order bits of the noise word.
    #[test]
    fn test_from_noise_truncates() {
        let noise = 0x0102_0304_0506_0708_u64;
        assert_eq!(<u8 as Element>::from_noise(noise), 0x08);
        assert_eq!(<u16 as Element>::from_noise(noise), 0x0708);
        assert_eq!(<u32 as Element>::from_noise(noise), 0x0506_0708);
        assert_eq!(<u64 as Element>::from_noise(noise), noise);
        assert_eq!(<i8 as Element>::from_noise(noise), 0x08);
    }
}
