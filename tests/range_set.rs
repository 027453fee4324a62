// This file is part of ICU4X. For terms of use, please see the file
// called LICENSE at the top level of the ICU4X source tree
// (online at: https://github.com/unicode-org/icu4x/blob/main/LICENSE ).

use alphabets::rangeset::{Partition, RangeSet, RangeSetBuilder, RangeSetError};
use rand::{Rng, SeedableRng};
use rand_pcg::Lcg64Xsh32;

const CODE_SPACE: usize = 0x110000;

/// Draws a range that is short and, half of the time, close to a partition boundary.
fn random_range(rng: &mut Lcg64Xsh32) -> (u32, u32) {
    let anchor = match rng.random_range(0..4) {
        0 => 0xFF,
        1 => 0xFFFF,
        _ => rng.random_range(0..=0x10FFFF),
    };
    let low = (anchor as i64 + rng.random_range(-40..=40)).clamp(0, 0x10FFFF) as u32;
    let high = (low + rng.random_range(0..=60)).min(0x10FFFF);
    (low, high)
}

fn reference_coverage(ranges: &[(u32, u32)]) -> Vec<bool> {
    let mut covered = vec![false; CODE_SPACE];
    for &(low, high) in ranges {
        for cp in low..=high {
            covered[cp as usize] = true;
        }
    }
    covered
}

fn assert_normalized(set: &RangeSet) {
    let ranges: Vec<_> = set.iter_ranges().collect();
    for range in &ranges {
        assert!(range.start() <= range.end(), "{range:X?}");
        assert_eq!(
            Partition::of(*range.start()),
            Partition::of(*range.end()),
            "{range:X?} straddles a partition"
        );
    }
    for pair in ranges.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        if Partition::of(*prev.start()) == Partition::of(*next.start()) {
            assert!(
                *next.start() >= *prev.end() + 2,
                "{prev:X?} and {next:X?} overlap or touch"
            );
        } else {
            assert!(*next.start() > *prev.end(), "{prev:X?} and {next:X?} overlap");
        }
    }
}

#[test]
fn english_letters() {
    let set = RangeSet::try_from_ranges(&[(0x41, 0x5A), (0x61, 0x7A)]).unwrap();
    assert!(set.contains('A'));
    assert!(set.contains('z'));
    assert!(!set.contains('é'));
    assert!(set.contains_all("Hello"));
    assert!(!set.contains_all("Héllo"));
    assert!(set.contains_all(""));
    assert_eq!(set.range_count(), 2);
    assert_eq!(set.size(), 52);
}

#[test]
fn merge_law_in_every_order() {
    let pieces = [(0x41, 0x5A), (0x61, 0x7A), (0x5B, 0x60)];
    for order in [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]] {
        let mut builder = RangeSetBuilder::new();
        for i in order {
            let (low, high) = pieces[i];
            builder.add_range(low, high).unwrap();
        }
        let set = builder.build();
        assert_eq!(set.iter_ranges().collect::<Vec<_>>(), [0x41..=0x7A]);
        assert!(!set.contains32(0x40));
        assert!(!set.contains32(0x7B));
    }
}

#[test]
fn partition_boundary() {
    let mut builder = RangeSetBuilder::new();
    builder.add_range(0xF0, 0x150).unwrap();
    let set = builder.build();
    for cp in [0xF0, 0xFF, 0x100, 0x150] {
        assert!(set.contains32(cp), "{cp:#X}");
    }
    assert!(!set.contains32(0xEF));
    assert!(!set.contains32(0x151));
    assert_eq!(set.range_count(), 2);
    assert_eq!(set.partition_range_count(Partition::Byte), 1);
    assert_eq!(set.partition_range_count(Partition::Bmp), 1);
}

#[test]
fn whole_code_space() {
    let set = RangeSet::try_from_ranges(&[(0, 0x10FFFF)]).unwrap();
    assert_eq!(set.range_count(), 3);
    assert_eq!(set.size(), CODE_SPACE);
    assert!(set.contains32(0));
    assert!(set.contains32(0xD800));
    assert!(set.contains32(0x10FFFF));
    assert!(!set.contains32(0x110000));
    assert!(set.contains_range('\0'..=char::MAX));
}

#[test]
fn rejected_additions_leave_builder_usable() {
    let mut builder = RangeSetBuilder::new();
    builder.add_char('a');
    assert_eq!(
        builder.add_range(0x7A, 0x61),
        Err(RangeSetError::InvalidRange(0x7A, 0x61))
    );
    assert_eq!(
        builder.add_code_point(0xDFFF),
        Err(RangeSetError::CodePointOutOfRange(0xDFFF))
    );
    assert_eq!(
        builder.add_range(0x10FFFF, 0x110000),
        Err(RangeSetError::CodePointOutOfRange(0x110000))
    );
    builder.add_code_point(0x62).unwrap();
    let set = builder.build();
    assert_eq!(set.iter_ranges().collect::<Vec<_>>(), [0x61..=0x62]);
}

#[test]
fn supplementary_scripts() {
    let mut builder = RangeSetBuilder::new();
    // Adlam
    builder.add_range(0x1E900, 0x1E94B).unwrap();
    builder.add_range(0x1E950, 0x1E959).unwrap();
    builder.add_range(0x1E95E, 0x1E95F).unwrap();
    let set = builder.build();
    assert_eq!(set.partition_range_count(Partition::Supplementary), 3);
    assert!(set.contains('\u{1E922}'));
    assert!(!set.contains('\u{1E94C}'));
    assert!(set.contains_all("\u{1E900}\u{1E950}\u{1E95F}"));

    let utf16: Vec<u16> = "\u{1E900}\u{1E950}".encode_utf16().collect();
    assert!(set.contains_all_utf16(&utf16));
    assert!(!set.contains_all_utf16(&utf16[..1]));
}

#[test]
fn first_rejected_reports_earliest() {
    let set = RangeSet::try_from_ranges(&[(0x61, 0x7A)]).unwrap();
    assert_eq!(set.first_rejected("abc"), None);
    assert_eq!(set.first_rejected("abç1"), Some((2, 'ç')));
    assert_eq!(set.first_rejected(""), None);
}

#[test]
fn ideographic_scale() {
    let ranges: Vec<(u32, u32)> = (0x4E00..0x9FFF)
        .step_by(2)
        .chain((0x20000..0x2A6DF).step_by(3))
        .map(|cp| (cp, cp))
        .collect();
    let set = RangeSet::try_from_ranges(&ranges).unwrap();
    assert_eq!(set.range_count(), ranges.len());
    assert!(set.contains32(0x4E00));
    assert!(!set.contains32(0x4E01));
    assert!(set.contains32(0x20003));
    assert!(!set.contains32(0x20004));
    assert_normalized(&set);
}

#[test]
fn randomized_membership_is_union_of_inputs() {
    let mut rng = Lcg64Xsh32::seed_from_u64(u64::from_le_bytes(*b"alphabet"));
    for _ in 0..4 {
        let ranges: Vec<(u32, u32)> = (0..rng.random_range(1..300))
            .map(|_| random_range(&mut rng))
            .collect();
        let mut builder = RangeSetBuilder::new();
        for &(low, high) in &ranges {
            builder.add_range(low, high).unwrap();
        }
        let set = builder.build();
        assert_normalized(&set);

        let covered = reference_coverage(&ranges);
        for (cp, expected) in covered.iter().enumerate() {
            assert_eq!(set.contains32(cp as u32), *expected, "{cp:#X}");
        }
        assert_eq!(set.size(), covered.iter().filter(|c| **c).count());
    }
}

#[test]
fn randomized_round_trip_through_builder() {
    let mut rng = Lcg64Xsh32::seed_from_u64(u64::from_le_bytes(*b"roundtrp"));
    for _ in 0..32 {
        let ranges: Vec<(u32, u32)> = (0..rng.random_range(0..100))
            .map(|_| random_range(&mut rng))
            .collect();
        let set = RangeSet::try_from_ranges(&ranges).unwrap();
        let rebuilt = set.to_builder().build();
        assert_eq!(rebuilt, set);
        assert_normalized(&rebuilt);
    }
}

#[test]
fn randomized_subset_union() {
    let mut rng = Lcg64Xsh32::seed_from_u64(u64::from_le_bytes(*b"subsets!"));
    for _ in 0..32 {
        let left: Vec<(u32, u32)> = (0..rng.random_range(0..50))
            .map(|_| random_range(&mut rng))
            .collect();
        let right: Vec<(u32, u32)> = (0..rng.random_range(0..50))
            .map(|_| random_range(&mut rng))
            .collect();

        let mut builder = RangeSet::try_from_ranges(&left).unwrap().to_builder();
        builder.add_subset(&RangeSet::try_from_ranges(&right).unwrap());
        let union = builder.build();

        let all: Vec<(u32, u32)> = left.iter().chain(&right).copied().collect();
        assert_eq!(union, RangeSet::try_from_ranges(&all).unwrap());
    }
}

#[test]
fn sets_are_shared_across_threads() {
    let set = RangeSet::try_from_ranges(&[(0x41, 0x5A), (0x61, 0x7A)]).unwrap();
    std::thread::scope(|scope| {
        for text in ["Hello", "World", "Héllo"] {
            let set = &set;
            scope.spawn(move || assert_eq!(set.contains_all(text), text.is_ascii()));
        }
    });
}
