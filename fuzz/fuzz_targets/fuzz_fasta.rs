#![no_main]

use libfuzzer_sys::fuzz_target;
use repseek::sequence::{parse_fasta, SequenceSource};

fuzz_target!(|data: &[u8]| {
    // Any byte stream parses; every symbol lands in the alphabet
    if let Ok(sequence) = parse_fasta(data) {
        assert!(sequence.as_codes().iter().all(|&c| (1..=6).contains(&c)));
        assert_eq!(sequence.len(), sequence.as_codes().len());
    }
});
