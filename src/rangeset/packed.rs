// This file is part of ICU4X. For terms of use, please see the file
// called LICENSE at the top level of the ICU4X source tree
// (online at: https://github.com/unicode-org/icu4x/blob/main/LICENSE ).

use core::ops::RangeInclusive;
use zerovec::ule::AsULE;

use super::CODE_POINT_MAX;

/// Upper bound of the byte band, inclusive
const BYTE_MAX: u32 = 0xFF;

/// Upper bound of the Basic Multilingual Plane, inclusive
const BMP_MAX: u32 = 0xFFFF;

/// One of the three magnitude bands a [`RangeSet`](super::RangeSet) stores ranges in.
///
/// A range is always stored in exactly one partition. The builder splits inputs
/// that straddle `0xFF` or `0xFFFF` so this holds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(clippy::exhaustive_enums)] // the bands are fixed by the Unicode code space
pub enum Partition {
    /// `U+0000..=U+00FF`, packed into [`u16`]
    Byte,
    /// `U+0100..=U+FFFF`, packed into [`u32`]
    Bmp,
    /// `U+10000..=U+10FFFF`, packed into [`u64`]
    Supplementary,
}

impl Partition {
    /// All partitions, in ascending order of magnitude.
    pub const ALL: [Partition; 3] = [Partition::Byte, Partition::Bmp, Partition::Supplementary];

    /// Returns the partition holding `code_point`, or `None` above `U+10FFFF`.
    ///
    /// # Examples
    ///
    /// ```
    /// use alphabets::rangeset::Partition;
    ///
    /// assert_eq!(Partition::of(0x41), Some(Partition::Byte));
    /// assert_eq!(Partition::of(0x100), Some(Partition::Bmp));
    /// assert_eq!(Partition::of(0x1F600), Some(Partition::Supplementary));
    /// assert_eq!(Partition::of(0x110000), None);
    /// ```
    pub const fn of(code_point: u32) -> Option<Self> {
        match code_point {
            0..=BYTE_MAX => Some(Partition::Byte),
            0x100..=BMP_MAX => Some(Partition::Bmp),
            0x10000..=CODE_POINT_MAX => Some(Partition::Supplementary),
            _ => None,
        }
    }

    /// Smallest code point of the partition.
    pub const fn min(self) -> u32 {
        match self {
            Partition::Byte => 0,
            Partition::Bmp => BYTE_MAX + 1,
            Partition::Supplementary => BMP_MAX + 1,
        }
    }

    /// Largest code point of the partition.
    pub const fn max(self) -> u32 {
        match self {
            Partition::Byte => BYTE_MAX,
            Partition::Bmp => BMP_MAX,
            Partition::Supplementary => CODE_POINT_MAX,
        }
    }

    /// The code points covered by the partition.
    pub const fn range(self) -> RangeInclusive<u32> {
        self.min()..=self.max()
    }

    /// Cuts `low..=high` into one piece per partition it touches, in ascending order.
    ///
    /// Expects `low <= high <= U+10FFFF`.
    pub(crate) fn split(low: u32, high: u32) -> impl Iterator<Item = (u32, u32)> {
        Self::ALL.into_iter().filter_map(move |partition| {
            let low = low.max(partition.min());
            let high = high.min(partition.max());
            (low <= high).then_some((low, high))
        })
    }
}

mod private {
    pub trait Sealed {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
    impl Sealed for u64 {}
}

/// An inclusive code point range packed into one unsigned integer.
///
/// The low bound occupies the upper half of the word and the high bound the lower
/// half, so packed values sort exactly like their low bounds. A sorted slice of
/// packed ranges can therefore be binary searched without unpacking.
///
/// Implemented for [`u16`] (bounds up to `0xFF`), [`u32`] (bounds up to `0xFFFF`)
/// and [`u64`] (bounds up to `0x10FFFF`).
///
/// # Examples
///
/// ```
/// use alphabets::rangeset::PackedRange;
///
/// let packed = u16::try_encode(0x41, 0x5A).unwrap();
/// assert_eq!(packed, 0x415A);
/// assert_eq!(packed.decode_low(), 0x41);
/// assert_eq!(packed.decode_high(), 0x5A);
///
/// assert_eq!(u16::try_encode(0x41, 0x100), None);
/// assert_eq!(u32::try_encode(0x5A, 0x41), None);
/// ```
pub trait PackedRange: private::Sealed + AsULE + Ord + Copy + 'static {
    /// Number of bits each bound occupies.
    const HALF_BITS: u32;

    /// Largest bound this width can hold.
    const MAX_BOUND: u32;

    /// The partition whose ranges are packed at this width.
    const PARTITION: Partition;

    /// Packs `low..=high` without checking `low <= high <= Self::MAX_BOUND`.
    ///
    /// Out-of-contract bounds produce a meaningless value, never undefined behavior.
    fn encode_unchecked(low: u32, high: u32) -> Self;

    /// The low bound of the packed range.
    fn decode_low(self) -> u32;

    /// The high bound of the packed range.
    fn decode_high(self) -> u32;

    /// Packs `low..=high`, or returns `None` unless `low <= high <= Self::MAX_BOUND`.
    fn try_encode(low: u32, high: u32) -> Option<Self> {
        (low <= high && high <= Self::MAX_BOUND).then(|| Self::encode_unchecked(low, high))
    }

    /// The largest packed value whose low bound is `code_point`.
    ///
    /// The range containing `code_point`, if stored, is the greatest element not above
    /// the probe.
    fn probe(code_point: u32) -> Self {
        Self::encode_unchecked(code_point, Self::MAX_BOUND)
    }

    /// The packed range as an inclusive range of code points.
    fn decode(self) -> RangeInclusive<u32> {
        self.decode_low()..=self.decode_high()
    }
}

macro_rules! impl_packed_range {
    ($word:ty, $half:ty, $partition:expr, $max:expr) => {
        impl PackedRange for $word {
            const HALF_BITS: u32 = <$half>::BITS;
            const MAX_BOUND: u32 = $max;
            const PARTITION: Partition = $partition;

            #[inline]
            fn encode_unchecked(low: u32, high: u32) -> Self {
                debug_assert!(low <= Self::MAX_BOUND && high <= Self::MAX_BOUND);
                ((low as $word) << Self::HALF_BITS) | (high as $word)
            }

            #[inline]
            fn decode_low(self) -> u32 {
                (self >> Self::HALF_BITS) as u32
            }

            #[inline]
            fn decode_high(self) -> u32 {
                (self & (<$half>::MAX as $word)) as u32
            }
        }
    };
}

impl_packed_range!(u16, u8, Partition::Byte, BYTE_MAX);
impl_packed_range!(u32, u16, Partition::Bmp, BMP_MAX);
impl_packed_range!(u64, u32, Partition::Supplementary, CODE_POINT_MAX);
