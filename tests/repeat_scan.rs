//! End-to-end repeat scanning over the public API

mod fixtures;

use fixtures::{ALL_MODES, arms_match, planted, triples};
use proptest::prelude::*;
use repseek::index::OrderAlgorithm;
use repseek::scan::{RepeatMode, RepeatRecord, RepeatScanner, ScanConfig, find_repeats};
use repseek::sequence::{Sequence, is_ambiguous};
use std::collections::HashSet;

fn scanner(mode: RepeatMode, minimum_length: usize) -> RepeatScanner {
    RepeatScanner::new(ScanConfig::new(mode, minimum_length)).unwrap()
}

fn nucleotides(range: std::ops::Range<usize>) -> impl Strategy<Value = Sequence> {
    prop::collection::vec(prop::sample::select(b"ACGTACGTACGTN".to_vec()), range)
        .prop_map(|bytes| String::from_utf8(bytes).unwrap().parse().unwrap())
}

#[test]
fn planted_direct_repeat_reported_once() {
    let sequence = planted(2_000, 7, 100, 1_200, 100, false);
    let records = find_repeats(&sequence, RepeatMode::Direct, 30).unwrap();

    let copy = records
        .iter()
        .find(|r| r.first_arm <= 100 && r.second_arm <= 1_200 && r.arm_length >= 100)
        .unwrap_or_else(|| panic!("planted repeat missing: {:?}", triples(&records)));
    assert_eq!(copy.second_arm - copy.first_arm, 1_100);

    // No shorter record on the same diagonal inside it
    for r in &records {
        if r != copy {
            assert!(!copy.covers_aligned(r.first_arm, r.second_arm, r.arm_length));
        }
    }
}

#[test]
fn planted_hairpin_has_no_sub_records() {
    let sequence = planted(2_000, 5, 300, 1_400, 80, true);
    let records = find_repeats(&sequence, RepeatMode::ComplementReverseInverted, 30).unwrap();

    let hairpin = records
        .iter()
        .find(|r| r.first_arm <= 300 && r.second_arm <= 1_400 && r.arm_length >= 80)
        .unwrap_or_else(|| panic!("hairpin missing: {:?}", triples(&records)));

    for r in &records {
        if r != hairpin {
            assert!(!hairpin.covers(r.first_arm, r.second_arm, r.arm_length));
        }
    }
}

#[test]
fn every_mode_finds_its_own_construction() {
    // Arm and its image under each mode's relation, separated by ambiguous
    // symbols so nothing spans the gap
    let arm: Sequence = "ACCGTTAGCA".parse().unwrap();
    for mode in ALL_MODES {
        let image = mode.transform().apply(&arm);
        let text = format!("{}NNNNN{}", arm, image);
        let sequence: Sequence = text.parse().unwrap();

        let records = find_repeats(&sequence, mode, 6).unwrap();
        assert!(
            records.contains(&RepeatRecord::new(0, 15, 10)),
            "{mode}: {:?}",
            triples(&records)
        );
    }
}

#[test]
fn longest_records_come_first() {
    let sequence = planted(1_500, 21, 50, 900, 60, false);
    let records = find_repeats(&sequence, RepeatMode::Direct, 12).unwrap();
    assert!(!records.is_empty());
    assert!(records.windows(2).all(|w| w[0].arm_length >= w[1].arm_length));
    assert!(records[0].arm_length >= 60);
}

#[test]
fn scanning_against_a_separate_target() {
    let query: Sequence = "TTTTGATTACAGGGG".parse().unwrap();
    let target: Sequence = "CCGATTACACC".parse().unwrap();

    let mut config = ScanConfig::new(RepeatMode::Direct, 5);
    config.self_search = false;
    let records = RepeatScanner::new(config).unwrap().scan(&query, &target).unwrap();

    assert_eq!(triples(&records), vec![(4, 2, 7)]);
}

#[test]
fn scanner_is_reusable_across_modes_of_one_config() {
    let sequence = planted(1_000, 2, 10, 600, 50, true);
    let mut scanner = scanner(RepeatMode::ComplementReverseInverted, 25);
    let first = scanner.scan_self(&sequence).unwrap();
    let second = scanner.scan_self(&sequence).unwrap();
    assert_eq!(triples(&first), triples(&second));
}

proptest! {
    #[test]
    fn prop_self_scan_records_are_valid(
        sequence in nucleotides(1..160),
        minimum_length in 3usize..8,
        mode_index in 0usize..4,
    ) {
        let mode = ALL_MODES[mode_index];
        let records = scanner(mode, minimum_length).scan_self(&sequence).unwrap();
        let codes = sequence.as_codes();

        let mut pairs = HashSet::new();
        for r in &records {
            prop_assert!(r.arm_length >= minimum_length);
            prop_assert!(r.first_arm <= r.second_arm);
            prop_assert!(arms_match(mode, codes, codes, r), "{:?} under {}", r, mode);
            prop_assert!(!codes[r.first_arm..r.first_arm + r.arm_length].iter().any(|&c| is_ambiguous(c)));
            prop_assert!(pairs.insert(r.pair()));
            if mode == RepeatMode::Direct {
                prop_assert!(r.first_arm != r.second_arm);
            }
        }

        prop_assert!(records.windows(2).all(|w| RepeatRecord::report_order(&w[0], &w[1]).is_lt()));
    }

    #[test]
    fn prop_query_target_records_are_valid(
        query in nucleotides(1..80),
        target in nucleotides(1..80),
        mode_index in 0usize..4,
    ) {
        let mode = ALL_MODES[mode_index];
        let mut config = ScanConfig::new(mode, 4);
        config.self_search = false;
        let records = RepeatScanner::new(config).unwrap().scan(&query, &target).unwrap();

        for r in &records {
            prop_assert!(arms_match(mode, query.as_codes(), target.as_codes(), r));
        }
    }

    #[test]
    fn prop_order_algorithm_does_not_change_results(
        sequence in nucleotides(1..200),
        mode_index in 0usize..4,
    ) {
        let mode = ALL_MODES[mode_index];
        let mut sort = ScanConfig::new(mode, 4);
        sort.order_algorithm = OrderAlgorithm::Sort;
        let mut sais = sort.clone();
        sais.order_algorithm = OrderAlgorithm::Sais;

        let a = RepeatScanner::new(sort).unwrap().scan_self(&sequence).unwrap();
        let b = RepeatScanner::new(sais).unwrap().scan_self(&sequence).unwrap();
        prop_assert_eq!(triples(&a), triples(&b));
    }

    #[test]
    fn prop_short_queries_yield_nothing(
        sequence in nucleotides(1..20),
        mode_index in 0usize..4,
    ) {
        let mode = ALL_MODES[mode_index];
        let records = find_repeats(&sequence, mode, 20).unwrap();
        prop_assert!(records.is_empty());
    }
}
