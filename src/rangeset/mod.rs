// This file is part of ICU4X. For terms of use, please see the file
// called LICENSE at the top level of the ICU4X source tree
// (online at: https://github.com/unicode-org/icu4x/blob/main/LICENSE ).

//! Immutable, compact sets of code points for alphabet membership queries.
//!
//! # Architecture
//! [`RangeSet`] is the query side: an immutable value holding the accepted code
//! points as sorted, disjoint, inclusive ranges. [`RangeSetBuilder`] is the
//! construction side: it accepts characters, code points, ranges and other sets in
//! any order and normalizes them into a [`RangeSet`].
//!
//! Ranges are stored in three [`Partition`]s by magnitude. Each partition packs a
//! range into one unsigned integer (see [`PackedRange`]) of the narrowest width that
//! holds both of its bounds.
//!
//! # Examples
//!
//! ## Creating a `RangeSet`
//!
//! ```
//! use alphabets::rangeset::{RangeSet, RangeSetBuilder};
//!
//! let mut builder = RangeSetBuilder::new();
//! builder.add_range(0x41, 0x5A).unwrap();
//! let set: RangeSet = builder.build();
//!
//! assert!(set.contains('A'));
//! ```
//!
//! ## Extending an existing `RangeSet`
//!
//! ```
//! use alphabets::rangeset::RangeSetBuilder;
//!
//! let mut builder = RangeSetBuilder::new();
//! builder.add_range(0x41, 0x5A).unwrap();
//! let upper = builder.build();
//!
//! let mut builder = upper.to_builder();
//! builder.add_char('Ä');
//! let german_upper = builder.build();
//!
//! assert!(!upper.contains('Ä'));
//! assert!(german_upper.contains('Ä'));
//! ```

mod builder;
mod packed;
mod set;

pub use builder::RangeSetBuilder;
pub use packed::{PackedRange, Partition};
pub use set::RangeSet;

use displaydoc::Display;

/// The largest Unicode code point.
pub(crate) const CODE_POINT_MAX: u32 = char::MAX as u32;

/// A [`RangeSetBuilder`] addition was rejected.
///
/// The call that returns this error leaves the builder unchanged.
#[derive(Display, Debug, Copy, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RangeSetError {
    /// The low bound of a range is greater than its high bound.
    #[displaydoc("Invalid range: U+{0:04X}..=U+{1:04X}")]
    InvalidRange(u32, u32),
    /// The value is above U+10FFFF, or is a surrogate where a scalar value was expected.
    #[displaydoc("Code point out of range: {0:#X}")]
    CodePointOutOfRange(u32),
}

impl core::error::Error for RangeSetError {}

/// A serialized [`RangeSet`] violated the storage invariants.
///
/// Every partition must be sorted ascending, every range must lie inside its
/// partition, and no two ranges of a partition may overlap or touch.
#[derive(Display, Debug, Copy, Clone, PartialEq, Eq)]
#[displaydoc("Invalid {0:?} partition at index {1}")]
#[allow(clippy::exhaustive_structs)]
pub struct InvalidSetError(pub Partition, pub usize);

impl core::error::Error for InvalidSetError {}
