// This file is part of ICU4X. For terms of use, please see the file
// called LICENSE at the top level of the ICU4X source tree
// (online at: https://github.com/unicode-org/icu4x/blob/main/LICENSE ).

use alloc::vec::Vec;
use core::ops::RangeInclusive;
use zerovec::ZeroVec;

use super::{PackedRange, Partition, RangeSet, RangeSetError, CODE_POINT_MAX};
use crate::log;

/// A builder for [`RangeSet`].
///
/// Collects characters, code points, ranges and whole sets in any order, possibly
/// overlapping, and normalizes them in [`build()`](Self::build). Every addition is
/// checked when it is made; a rejected addition leaves the builder unchanged.
///
/// # Examples
///
/// ```
/// use alphabets::rangeset::RangeSetBuilder;
///
/// let mut builder = RangeSetBuilder::new();
/// builder.add_range(0x61, 0x7A).unwrap();
/// builder.add_range(0x41, 0x5A).unwrap();
/// builder.add_range(0x5B, 0x60).unwrap();
/// let set = builder.build();
///
/// assert_eq!(set.iter_ranges().collect::<Vec<_>>(), [0x41..=0x7A]);
/// ```
#[derive(Default, Debug, Clone)]
pub struct RangeSetBuilder {
    // Inclusive ranges in insertion order, each inside a single partition
    ranges: Vec<(u32, u32)>,
}

/// Sorted, merged ranges routed into their partitions.
#[derive(Default)]
struct PackedPartitions {
    byte: Vec<u16>,
    bmp: Vec<u32>,
    supplementary: Vec<u64>,
}

impl PackedPartitions {
    fn push(&mut self, low: u32, high: u32) {
        // Bounds were checked against U+10FFFF when added
        if let Some(partition) = Partition::of(low) {
            match partition {
                Partition::Byte => self.byte.push(u16::encode_unchecked(low, high)),
                Partition::Bmp => self.bmp.push(u32::encode_unchecked(low, high)),
                Partition::Supplementary => {
                    self.supplementary.push(u64::encode_unchecked(low, high))
                }
            }
        }
    }

    fn into_range_set(self) -> RangeSet<'static> {
        RangeSet::from_parts_unchecked(
            ZeroVec::alloc_from_slice(&self.byte),
            ZeroVec::alloc_from_slice(&self.bmp),
            ZeroVec::alloc_from_slice(&self.supplementary),
        )
    }
}

/// Checks an inclusive range supplied by a caller.
fn validate_range(low: u32, high: u32) -> Result<(), RangeSetError> {
    if low > high {
        log::debug!("Rejected reversed range {low:#X}..={high:#X}");
        Err(RangeSetError::InvalidRange(low, high))
    } else if high > CODE_POINT_MAX {
        log::debug!("Rejected range {low:#X}..={high:#X} above U+10FFFF");
        Err(RangeSetError::CodePointOutOfRange(high))
    } else {
        Ok(())
    }
}

impl RangeSetBuilder {
    /// Returns an empty [`RangeSetBuilder`]
    pub const fn new() -> Self {
        Self { ranges: Vec::new() }
    }

    /// Returns whether nothing has been added yet.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Records a validated range, split at partition boundaries.
    fn add(&mut self, low: u32, high: u32) {
        self.ranges.extend(Partition::split(low, high));
    }

    /// Adds a character.
    ///
    /// A [`char`] is always a valid scalar value, so this cannot fail.
    pub fn add_char(&mut self, c: char) {
        let c = c as u32;
        self.add(c, c);
    }

    /// Adds a code point.
    ///
    /// Fails with [`RangeSetError::CodePointOutOfRange`] for values above `U+10FFFF` and
    /// for surrogates, which are not characters on their own.
    ///
    /// # Examples
    ///
    /// ```
    /// use alphabets::rangeset::{RangeSetBuilder, RangeSetError};
    ///
    /// let mut builder = RangeSetBuilder::new();
    /// assert_eq!(builder.add_code_point(0xE9), Ok(()));
    /// assert_eq!(
    ///     builder.add_code_point(0xD800),
    ///     Err(RangeSetError::CodePointOutOfRange(0xD800))
    /// );
    /// assert_eq!(
    ///     builder.add_code_point(0x110000),
    ///     Err(RangeSetError::CodePointOutOfRange(0x110000))
    /// );
    /// assert!(builder.build().contains('é'));
    /// ```
    pub fn add_code_point(&mut self, code_point: u32) -> Result<(), RangeSetError> {
        match char::from_u32(code_point) {
            Some(c) => {
                self.add_char(c);
                Ok(())
            }
            None => {
                log::debug!("Rejected code point {code_point:#X}");
                Err(RangeSetError::CodePointOutOfRange(code_point))
            }
        }
    }

    /// Adds the inclusive range `low..=high` of code points.
    ///
    /// Fails with [`RangeSetError::InvalidRange`] if `low > high`, and with
    /// [`RangeSetError::CodePointOutOfRange`] if `high` is above `U+10FFFF`. A range may
    /// span the surrogate block, so that whole planes can be described.
    ///
    /// # Examples
    ///
    /// ```
    /// use alphabets::rangeset::{Partition, RangeSetBuilder, RangeSetError};
    ///
    /// let mut builder = RangeSetBuilder::new();
    /// assert_eq!(
    ///     builder.add_range(0x5A, 0x41),
    ///     Err(RangeSetError::InvalidRange(0x5A, 0x41))
    /// );
    /// builder.add_range(0xF0, 0x150).unwrap();
    /// let set = builder.build();
    ///
    /// assert!(set.contains32(0xFF));
    /// assert!(set.contains32(0x100));
    /// assert_eq!(set.partition_range_count(Partition::Byte), 1);
    /// assert_eq!(set.partition_range_count(Partition::Bmp), 1);
    /// ```
    pub fn add_range(&mut self, low: u32, high: u32) -> Result<(), RangeSetError> {
        validate_range(low, high)?;
        self.add(low, high);
        Ok(())
    }

    /// Adds an inclusive range of characters.
    ///
    /// Fails with [`RangeSetError::InvalidRange`] if the range is reversed.
    pub fn add_char_range(&mut self, range: RangeInclusive<char>) -> Result<(), RangeSetError> {
        self.add_range(*range.start() as u32, *range.end() as u32)
    }

    /// Adds inclusive `(low, high)` pairs, such as the rows of an alphabet table.
    ///
    /// Either every pair is added or, if any pair is rejected as by
    /// [`add_range()`](Self::add_range), none is.
    ///
    /// # Examples
    ///
    /// ```
    /// use alphabets::rangeset::{RangeSetBuilder, RangeSetError};
    ///
    /// let mut builder = RangeSetBuilder::new();
    /// let result = builder.add_ranges(&[(0x41, 0x5A), (0x61, 0x7A), (0x10000, 0x110000)]);
    /// assert_eq!(result, Err(RangeSetError::CodePointOutOfRange(0x110000)));
    /// assert!(builder.is_empty());
    /// ```
    pub fn add_ranges(&mut self, ranges: &[(u32, u32)]) -> Result<(), RangeSetError> {
        for &(low, high) in ranges {
            validate_range(low, high)?;
        }
        for &(low, high) in ranges {
            self.add(low, high);
        }
        Ok(())
    }

    /// Adds every character of `text`.
    pub fn add_str(&mut self, text: &str) {
        self.extend(text.chars());
    }

    /// Adds every code point of `set`.
    ///
    /// # Examples
    ///
    /// ```
    /// use alphabets::rangeset::{RangeSet, RangeSetBuilder};
    ///
    /// let latin = RangeSet::try_from_ranges(&[(0x41, 0x5A), (0x61, 0x7A)]).unwrap();
    ///
    /// let mut builder = RangeSetBuilder::new();
    /// builder.add_subset(&latin);
    /// builder.add_str("ÄÖÜäöüß");
    /// let german = builder.build();
    ///
    /// assert!(german.contains_all("Straße"));
    /// assert!(!latin.contains_all("Straße"));
    /// ```
    pub fn add_subset(&mut self, set: &RangeSet) {
        // Stored ranges never straddle a partition boundary
        self.ranges
            .extend(set.iter_ranges().map(|range| (*range.start(), *range.end())));
    }

    /// Consumes the builder and returns the normalized [`RangeSet`].
    ///
    /// Ranges are sorted by low bound, then high bound, and swept once: a range that
    /// overlaps or touches the current one in the same partition extends it, any
    /// other range starts a new one. Runs in `O(n log n)` for `n` additions.
    pub fn build(self) -> RangeSet<'static> {
        let mut ranges = self.ranges;
        ranges.sort_unstable();

        let mut partitions = PackedPartitions::default();
        let mut ranges = ranges.into_iter();
        let Some((mut current_low, mut current_high)) = ranges.next() else {
            return RangeSet::empty();
        };
        for (low, high) in ranges {
            if low <= current_high + 1 && Partition::of(low) == Partition::of(current_low) {
                current_high = current_high.max(high);
            } else {
                partitions.push(current_low, current_high);
                (current_low, current_high) = (low, high);
            }
        }
        partitions.push(current_low, current_high);
        partitions.into_range_set()
    }
}

impl Extend<char> for RangeSetBuilder {
    fn extend<T: IntoIterator<Item = char>>(&mut self, iter: T) {
        for c in iter {
            self.add_char(c);
        }
    }
}
