//! Shared helpers for integration tests

#![allow(dead_code)]

use repseek::scan::{RepeatMode, RepeatRecord};
use repseek::sequence::{complement, Sequence};

/// Random sequence with `source[start..start+len]` copied to `dest`,
/// optionally reverse-complemented
pub fn planted(len: usize, seed: u64, start: usize, dest: usize, arm: usize, inverted: bool) -> Sequence {
    let base = Sequence::random(len, seed);
    let mut codes = base.into_codes();
    let copy: Vec<u8> = codes[start..start + arm].to_vec();
    codes[dest..dest + arm].copy_from_slice(&copy);

    let mut sequence = Sequence::from_codes(codes).unwrap();
    if inverted {
        sequence.invert_in_place(dest, arm).unwrap();
    }
    sequence
}

/// Every start offset of `pattern` in `text`, by brute force
pub fn naive_locate(text: &[u8], pattern: &[u8]) -> Vec<usize> {
    if pattern.is_empty() || pattern.len() > text.len() {
        return Vec::new();
    }
    text.windows(pattern.len())
        .enumerate()
        .filter(|(_, w)| *w == pattern)
        .map(|(i, _)| i)
        .collect()
}

/// Whether the record's arms really satisfy the mode's relation
pub fn arms_match(mode: RepeatMode, query: &[u8], target: &[u8], record: &RepeatRecord) -> bool {
    let len = record.arm_length;
    if record.first_arm + len > query.len() || record.second_arm + len > target.len() {
        return false;
    }
    let a = &query[record.first_arm..record.first_arm + len];
    let b = &target[record.second_arm..record.second_arm + len];

    match mode {
        RepeatMode::Direct => a == b,
        RepeatMode::ComplementInverted => a.iter().zip(b).all(|(&x, &y)| complement(x) == y),
        RepeatMode::Reverse => a.iter().zip(b.iter().rev()).all(|(x, y)| x == y),
        RepeatMode::ComplementReverseInverted => {
            a.iter().zip(b.iter().rev()).all(|(&x, &y)| complement(x) == y)
        }
    }
}

pub fn triples(records: &[RepeatRecord]) -> Vec<(usize, usize, usize)> {
    records
        .iter()
        .map(|r| (r.first_arm, r.second_arm, r.arm_length))
        .collect()
}

pub const ALL_MODES: [RepeatMode; 4] = [
    RepeatMode::Direct,
    RepeatMode::Reverse,
    RepeatMode::ComplementInverted,
    RepeatMode::ComplementReverseInverted,
];
