// This file is part of ICU4X. For terms of use, please see the file
// called LICENSE at the top level of the ICU4X source tree
// (online at: https://github.com/unicode-org/icu4x/blob/main/LICENSE ).

#[cfg(feature = "serde")]
use alloc::format;
#[cfg(feature = "serde")]
use alloc::vec::Vec;
use core::ops::RangeInclusive;
use yoke::Yokeable;
use zerofrom::ZeroFrom;
use zerovec::{ZeroSlice, ZeroVec};

use super::{InvalidSetError, PackedRange, Partition, RangeSetBuilder, RangeSetError};

/// First UTF-16 surrogate
const SURROGATE_MIN: u32 = 0xD800;

/// Last UTF-16 surrogate
const SURROGATE_MAX: u32 = 0xDFFF;

/// An immutable set of code points, stored as packed inclusive ranges.
///
/// Ranges live in three ascending arrays, one per [`Partition`], packed at the
/// width of their partition. Within a partition no two ranges overlap or touch.
///
/// A `RangeSet` is produced by [`RangeSetBuilder::build()`], or by deserializing
/// data that passes the same invariant checks. It never changes afterwards and can
/// be shared freely between threads.
///
/// # Examples
///
/// ```
/// use alphabets::rangeset::RangeSet;
///
/// let english = RangeSet::try_from_ranges(&[(0x41, 0x5A), (0x61, 0x7A)]).unwrap();
///
/// assert!(english.contains('A'));
/// assert!(english.contains('z'));
/// assert!(!english.contains('é'));
/// assert!(english.contains_all("Hello"));
/// assert!(!english.contains_all("Héllo"));
/// ```
#[derive(Debug, Eq, PartialEq, Clone, Yokeable, ZeroFrom)]
pub struct RangeSet<'data> {
    byte: ZeroVec<'data, u16>,
    bmp: ZeroVec<'data, u32>,
    supplementary: ZeroVec<'data, u64>,
}

impl Default for RangeSet<'_> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(feature = "serde")]
impl<'de: 'a, 'a> serde::Deserialize<'de> for RangeSet<'a> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;
        use serde::Deserialize;

        if deserializer.is_human_readable() {
            let parsed_strings = Vec::<alloc::borrow::Cow<'de, str>>::deserialize(deserializer)?;
            let mut builder = RangeSetBuilder::new();
            for range in parsed_strings {
                fn internal(range: &str) -> Option<(u32, u32)> {
                    let (start, range) = UnicodeCodePoint::parse(range)?;
                    if range.is_empty() {
                        return Some((start.0, start.0));
                    }
                    let range = range.strip_prefix('-')?;
                    let (end, range) = UnicodeCodePoint::parse(range)?;
                    range.is_empty().then_some((start.0, end.0))
                }
                let (start, end) = internal(&range).ok_or_else(|| {
                    Error::custom(format!("Cannot deserialize invalid range for RangeSet: {range:?}"))
                })?;
                builder.add_range(start, end).map_err(|e| {
                    Error::custom(format!("Cannot deserialize invalid range for RangeSet: {e}"))
                })?;
            }
            Ok(builder.build())
        } else {
            let (byte, bmp, supplementary) =
                <(ZeroVec<u16>, ZeroVec<u32>, ZeroVec<u64>)>::deserialize(deserializer)?;
            RangeSet::try_from_parts(byte, bmp, supplementary).map_err(|e| {
                Error::custom(format!("Cannot deserialize invalid RangeSet: {e}"))
            })
        }
    }
}

#[cfg(feature = "serde")]
#[derive(Debug, Copy, Clone)]
struct UnicodeCodePoint(u32);

#[cfg(feature = "serde")]
impl UnicodeCodePoint {
    fn parse(value: &str) -> Option<(Self, &str)> {
        Some(if let Some(hex) = value.strip_prefix("U+") {
            let digits = hex
                .find(|c: char| !c.is_ascii_hexdigit())
                .unwrap_or(hex.len());
            let (escape, remainder) = (hex.get(..digits)?, hex.get(digits..)?);
            if !(4..=6).contains(&escape.len()) {
                return None;
            }
            (Self(u32::from_str_radix(escape, 16).ok()?), remainder)
        } else {
            let c = value.chars().next()?;
            (Self(c as u32), value.get(c.len_utf8()..)?)
        })
    }
}

#[cfg(feature = "serde")]
impl core::fmt::Display for UnicodeCodePoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match char::from_u32(self.0) {
            // Surrogates, controls and the range separator are written as escapes
            Some(c) if !c.is_control() && c != '-' => write!(f, "{c}"),
            _ => write!(f, "U+{:04X}", self.0),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for RangeSet<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if serializer.is_human_readable() {
            use serde::ser::SerializeSeq;
            let mut seq = serializer.serialize_seq(Some(self.range_count()))?;
            for range in self.iter_ranges() {
                let start = UnicodeCodePoint(*range.start());
                if range.start() == range.end() {
                    seq.serialize_element(&format!("{start}"))?;
                } else {
                    let end = UnicodeCodePoint(*range.end());
                    seq.serialize_element(&format!("{start}-{end}"))?;
                }
            }
            seq.end()
        } else {
            use serde::ser::SerializeTuple;
            let mut tuple = serializer.serialize_tuple(3)?;
            tuple.serialize_element(&self.byte)?;
            tuple.serialize_element(&self.bmp)?;
            tuple.serialize_element(&self.supplementary)?;
            tuple.end()
        }
    }
}

/// Returns the stored range containing `code_point`, if any.
///
/// `code_point` must lie in the partition `T` packs.
fn find_packed<T: PackedRange>(ranges: &ZeroSlice<T>, code_point: u32) -> Option<T> {
    match ranges.binary_search(&T::probe(code_point)) {
        // Only a range ending at the partition maximum equals the probe
        Ok(pos) => ranges.get(pos),
        Err(pos) => ranges
            .get(pos.checked_sub(1)?)
            .filter(|range| range.decode_high() >= code_point),
    }
}

/// Checks that a partition is sorted, in bounds, disjoint and maximally merged.
///
/// Returns the index of the first offending range.
fn check_partition<T: PackedRange>(ranges: &ZeroSlice<T>) -> Result<(), usize> {
    let partition = T::PARTITION;
    let mut prev_high: Option<u32> = None;
    for (idx, range) in ranges.iter().enumerate() {
        let (low, high) = (range.decode_low(), range.decode_high());
        if low > high || low < partition.min() || high > partition.max() {
            return Err(idx);
        }
        if prev_high.is_some_and(|prev| prev + 1 >= low) {
            return Err(idx);
        }
        prev_high = Some(high);
    }
    Ok(())
}

impl<'data> RangeSet<'data> {
    /// Returns a [`RangeSet`] containing no code points.
    pub const fn empty() -> Self {
        Self {
            byte: ZeroVec::new(),
            bmp: ZeroVec::new(),
            supplementary: ZeroVec::new(),
        }
    }

    /// Builds a [`RangeSet`] from inclusive `(low, high)` pairs in any order.
    ///
    /// Fails without producing a set if any pair is rejected by
    /// [`RangeSetBuilder::add_range()`].
    ///
    /// # Examples
    ///
    /// ```
    /// use alphabets::rangeset::{RangeSet, RangeSetError};
    ///
    /// let set = RangeSet::try_from_ranges(&[(0x61, 0x7A), (0x41, 0x5A)]).unwrap();
    /// assert_eq!(set.range_count(), 2);
    ///
    /// let err = RangeSet::try_from_ranges(&[(0x41, 0x5A), (0x7A, 0x61)]);
    /// assert_eq!(err, Err(RangeSetError::InvalidRange(0x7A, 0x61)));
    /// ```
    pub fn try_from_ranges(ranges: &[(u32, u32)]) -> Result<RangeSet<'static>, RangeSetError> {
        let mut builder = RangeSetBuilder::new();
        builder.add_ranges(ranges)?;
        Ok(builder.build())
    }

    /// Assembles a set from already-normalized partitions without checking them.
    pub(crate) fn from_parts_unchecked(
        byte: ZeroVec<'data, u16>,
        bmp: ZeroVec<'data, u32>,
        supplementary: ZeroVec<'data, u64>,
    ) -> Self {
        let set = Self {
            byte,
            bmp,
            supplementary,
        };
        debug_assert_eq!(set.check_invariants(), Ok(()));
        set
    }

    /// Assembles a set from packed partitions, checking every storage invariant.
    #[cfg(feature = "serde")]
    fn try_from_parts(
        byte: ZeroVec<'data, u16>,
        bmp: ZeroVec<'data, u32>,
        supplementary: ZeroVec<'data, u64>,
    ) -> Result<Self, InvalidSetError> {
        let set = Self {
            byte,
            bmp,
            supplementary,
        };
        set.check_invariants()?;
        Ok(set)
    }

    pub(crate) fn check_invariants(&self) -> Result<(), InvalidSetError> {
        check_partition(&self.byte).map_err(|idx| InvalidSetError(Partition::Byte, idx))?;
        check_partition(&self.bmp).map_err(|idx| InvalidSetError(Partition::Bmp, idx))?;
        check_partition(&self.supplementary)
            .map_err(|idx| InvalidSetError(Partition::Supplementary, idx))
    }

    /// Converts this set into a fully-owned one. No-op if already fully owned
    pub fn into_owned(self) -> RangeSet<'static> {
        RangeSet {
            byte: self.byte.into_owned(),
            bmp: self.bmp.into_owned(),
            supplementary: self.supplementary.into_owned(),
        }
    }

    /// Checks whether `query` is in the set.
    ///
    /// Runs a binary search in `O(log(n))` where `n` is the number of ranges in the
    /// partition of `query`.
    ///
    /// # Examples
    ///
    /// ```
    /// use alphabets::rangeset::RangeSet;
    ///
    /// let set = RangeSet::try_from_ranges(&[(0x41, 0x5A)]).unwrap();
    /// assert!(set.contains('Q'));
    /// assert!(!set.contains('q'));
    /// ```
    pub fn contains(&self, query: char) -> bool {
        self.contains32(query as u32)
    }

    /// Checks whether the code point `query` is in the set.
    ///
    /// Unlike [`char`], a [`u32`] may be a surrogate or lie above `U+10FFFF`. Values
    /// above `U+10FFFF` are never contained.
    ///
    /// # Examples
    ///
    /// ```
    /// use alphabets::rangeset::RangeSet;
    ///
    /// let set = RangeSet::try_from_ranges(&[(0x1E900, 0x1E95F)]).unwrap();
    /// assert!(set.contains32(0x1E922));
    /// assert!(!set.contains32(0x1E960));
    /// assert!(!set.contains32(0x110000));
    /// ```
    pub fn contains32(&self, query: u32) -> bool {
        self.find(query).is_some()
    }

    /// The stored range containing `query`.
    fn find(&self, query: u32) -> Option<RangeInclusive<u32>> {
        match Partition::of(query)? {
            Partition::Byte => find_packed(&self.byte, query).map(PackedRange::decode),
            Partition::Bmp => find_packed(&self.bmp, query).map(PackedRange::decode),
            Partition::Supplementary => {
                find_packed(&self.supplementary, query).map(PackedRange::decode)
            }
        }
    }

    /// Checks whether every character of `text` is in the set.
    ///
    /// Stops at the first character that is not. The empty string is accepted.
    ///
    /// # Examples
    ///
    /// ```
    /// use alphabets::rangeset::RangeSet;
    ///
    /// let set = RangeSet::try_from_ranges(&[(0x41, 0x5A), (0x61, 0x7A)]).unwrap();
    /// assert!(set.contains_all("Hello"));
    /// assert!(!set.contains_all("Hello world"));
    /// assert!(set.contains_all(""));
    /// ```
    pub fn contains_all(&self, text: &str) -> bool {
        text.chars().all(|c| self.contains(c))
    }

    /// Checks whether every code point of the UTF-16 `text` is in the set.
    ///
    /// Surrogate pairs are combined into supplementary code points. An unpaired
    /// surrogate is never accepted.
    ///
    /// # Examples
    ///
    /// ```
    /// use alphabets::rangeset::RangeSet;
    ///
    /// let set = RangeSet::try_from_ranges(&[(0x41, 0x5A), (0x10400, 0x1044F)]).unwrap();
    /// // "A𐐀"
    /// assert!(set.contains_all_utf16(&[0x41, 0xD801, 0xDC00]));
    /// assert!(!set.contains_all_utf16(&[0x41, 0xD801]));
    /// ```
    pub fn contains_all_utf16(&self, text: &[u16]) -> bool {
        char::decode_utf16(text.iter().copied())
            .all(|decoded| decoded.is_ok_and(|c| self.contains(c)))
    }

    /// Returns the byte index and value of the first character of `text` outside the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use alphabets::rangeset::RangeSet;
    ///
    /// let set = RangeSet::try_from_ranges(&[(0x41, 0x5A), (0x61, 0x7A)]).unwrap();
    /// assert_eq!(set.first_rejected("Héllo"), Some((1, 'é')));
    /// assert_eq!(set.first_rejected("Hello"), None);
    /// ```
    pub fn first_rejected(&self, text: &str) -> Option<(usize, char)> {
        text.char_indices().find(|&(_, c)| !self.contains(c))
    }

    /// Checks whether every character of `range` is in the set.
    ///
    /// An empty range is never contained. Surrogates are not characters, so a range
    /// spanning the surrogate block does not need them in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use alphabets::rangeset::RangeSet;
    ///
    /// let set = RangeSet::try_from_ranges(&[(0xF0, 0x150)]).unwrap();
    /// assert!(set.contains_range('\u{F0}'..='\u{150}'));
    /// assert!(!set.contains_range('\u{EF}'..='\u{150}'));
    ///
    /// let set = RangeSet::try_from_ranges(&[(0xD000, 0xD7FF), (0xE000, 0xE0FF)]).unwrap();
    /// assert!(set.contains_range('\u{D7F0}'..='\u{E010}'));
    /// ```
    pub fn contains_range(&self, range: RangeInclusive<char>) -> bool {
        let (low, high) = (*range.start() as u32, *range.end() as u32);
        low <= high
            && Partition::split(low, high)
                .flat_map(|(low, high)| {
                    [
                        (low, high.min(SURROGATE_MIN - 1)),
                        (low.max(SURROGATE_MAX + 1), high),
                    ]
                    .into_iter()
                    .filter(|&(low, high)| low <= high)
                })
                .all(|(low, high)| self.find(low).is_some_and(|stored| *stored.end() >= high))
    }

    /// Returns the number of ranges stored across all partitions.
    ///
    /// A range added across a partition boundary counts once per partition.
    pub fn range_count(&self) -> usize {
        self.byte.len() + self.bmp.len() + self.supplementary.len()
    }

    /// Returns the number of ranges stored in `partition`.
    ///
    /// # Examples
    ///
    /// ```
    /// use alphabets::rangeset::{Partition, RangeSet};
    ///
    /// let set = RangeSet::try_from_ranges(&[(0xF0, 0x150)]).unwrap();
    /// assert_eq!(set.partition_range_count(Partition::Byte), 1);
    /// assert_eq!(set.partition_range_count(Partition::Bmp), 1);
    /// assert_eq!(set.partition_range_count(Partition::Supplementary), 0);
    /// assert_eq!(set.range_count(), 2);
    /// ```
    pub fn partition_range_count(&self, partition: Partition) -> usize {
        match partition {
            Partition::Byte => self.byte.len(),
            Partition::Bmp => self.bmp.len(),
            Partition::Supplementary => self.supplementary.len(),
        }
    }

    /// Returns whether the set contains no code points.
    pub fn is_empty(&self) -> bool {
        self.range_count() == 0
    }

    /// Returns the number of code points in the set.
    pub fn size(&self) -> usize {
        self.iter_ranges()
            .map(|range| (range.end() - range.start() + 1) as usize)
            .sum()
    }

    /// Yields the stored ranges in ascending order.
    ///
    /// A range added across a partition boundary is yielded once per partition.
    ///
    /// # Examples
    ///
    /// ```
    /// use alphabets::rangeset::RangeSet;
    ///
    /// let set = RangeSet::try_from_ranges(&[(0x61, 0x7A), (0x41, 0x5A), (0xF0, 0x150)])
    ///     .unwrap();
    /// let mut ranges = set.iter_ranges();
    /// assert_eq!(ranges.next(), Some(0x41..=0x5A));
    /// assert_eq!(ranges.next(), Some(0x61..=0x7A));
    /// assert_eq!(ranges.next(), Some(0xF0..=0xFF));
    /// assert_eq!(ranges.next(), Some(0x100..=0x150));
    /// assert_eq!(ranges.next(), None);
    /// ```
    pub fn iter_ranges(&self) -> impl Iterator<Item = RangeInclusive<u32>> + '_ {
        self.byte
            .iter()
            .map(PackedRange::decode)
            .chain(self.bmp.iter().map(PackedRange::decode))
            .chain(self.supplementary.iter().map(PackedRange::decode))
    }

    /// Yields the characters of the set in ascending order, skipping surrogates.
    pub fn iter_chars(&self) -> impl Iterator<Item = char> + '_ {
        self.iter_ranges().flatten().filter_map(char::from_u32)
    }

    /// Returns a new [`RangeSetBuilder`] seeded with the ranges of this set.
    ///
    /// The set itself is unchanged.
    pub fn to_builder(&self) -> RangeSetBuilder {
        let mut builder = RangeSetBuilder::new();
        builder.add_subset(self);
        builder
    }
}
