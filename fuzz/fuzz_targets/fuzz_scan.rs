#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use repseek::scan::{RepeatMode, RepeatScanner, ScanConfig};
use repseek::sequence::Sequence;

#[derive(Debug, Arbitrary)]
struct Input {
    codes: Vec<u8>,
    minimum_length: u8,
    mode: u8,
}

fuzz_target!(|input: Input| {
    let codes: Vec<u8> = input.codes.iter().take(512).map(|&b| b % 6 + 1).collect();
    let Ok(sequence) = Sequence::from_codes(codes) else {
        return;
    };
    let mode = match input.mode % 4 {
        0 => RepeatMode::Direct,
        1 => RepeatMode::Reverse,
        2 => RepeatMode::ComplementInverted,
        _ => RepeatMode::ComplementReverseInverted,
    };
    let minimum_length = input.minimum_length as usize % 16 + 1;

    let mut scanner = RepeatScanner::new(ScanConfig::new(mode, minimum_length)).unwrap();
    for record in scanner.scan_self(&sequence).unwrap() {
        assert!(record.arm_length >= minimum_length);
        assert!(record.first_arm <= record.second_arm);
    }
});
