// This file is part of ICU4X. For terms of use, please see the file
// called LICENSE at the top level of the ICU4X source tree
// (online at: https://github.com/unicode-org/icu4x/blob/main/LICENSE ).

//! Compact code point sets for checking text against the alphabet of a locale.
//!
//! An alphabet is the set of letters accepted for a language, as published by a
//! registry office or a standards body. The typical use is validating personal
//! names: every character of the name must belong to the alphabet of the locale
//! the name is registered under.
//!
//! [`RangeSet`](crate::rangeset::RangeSet) stores an alphabet as sorted, disjoint,
//! inclusive ranges. Each range is packed into a single integer whose width depends
//! on the magnitude of its code points, so that Latin alphabets cost two bytes per
//! range and only supplementary-plane ranges pay for 64-bit words. Membership is a
//! binary search over the packed integers.
//!
//! Sets are produced by [`RangeSetBuilder`](crate::rangeset::RangeSetBuilder), which
//! accepts ranges in any order, merges them, and checks every input.
//! [`AlphabetRegistry`](crate::registry::AlphabetRegistry) maps locales to sets.
//!
//! ```
//! use alphabets::rangeset::RangeSetBuilder;
//!
//! let mut builder = RangeSetBuilder::new();
//! builder.add_range(0x41, 0x5A).unwrap();
//! builder.add_range(0x61, 0x7A).unwrap();
//! let english = builder.build();
//!
//! assert!(english.contains_all("Hello"));
//! assert!(!english.contains_all("Héllo"));
//! ```

// https://github.com/unicode-org/icu4x/blob/main/documents/process/boilerplate.md#library-annotations
#![cfg_attr(not(any(test, doc)), no_std)]
#![cfg_attr(
    not(test),
    deny(
        clippy::indexing_slicing,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic
    )
)]
#![warn(missing_docs)]

extern crate alloc;

pub mod rangeset;
pub mod registry;

#[doc(hidden)] // internal
#[cfg(feature = "logging")]
pub use log;

#[doc(hidden)] // internal
#[cfg(all(not(feature = "logging"), debug_assertions, not(target_os = "none")))]
pub mod log {
    extern crate std;
    pub use std::eprintln as error;
    pub use std::eprintln as warn;
    pub use std::eprintln as info;
    pub use std::eprintln as debug;
    pub use std::eprintln as trace;
}

#[cfg(all(
    not(feature = "logging"),
    any(not(debug_assertions), target_os = "none")
))]
#[doc(hidden)] // internal
pub mod log {
    #[macro_export]
    macro_rules! _internal_noop_log {
        ($($t:expr),*) => {};
    }
    pub use crate::_internal_noop_log as error;
    pub use crate::_internal_noop_log as warn;
    pub use crate::_internal_noop_log as info;
    pub use crate::_internal_noop_log as debug;
    pub use crate::_internal_noop_log as trace;
}

#[test]
fn test_logging() {
    // This should compile on all combinations of features
    crate::log::info!("Hello World");
}
