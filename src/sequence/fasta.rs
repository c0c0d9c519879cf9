//! FASTA text parsing
//!
//! Header lines (starting with `>`) are skipped and every record is
//! concatenated into one sequence. A, C, G and T are accepted in either case;
//! any other character becomes N so that soft-masked or IUPAC-coded
//! genomes load without errors.

use super::{CODE_N, Sequence, encode_symbol, is_ambiguous};
use crate::error::Result;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Parse FASTA text from any reader
pub fn parse_fasta<R: Read>(reader: R) -> Result<Sequence> {
    let mut reader = BufReader::with_capacity(1 << 16, reader);
    let mut codes = Vec::new();
    let mut line = Vec::new();

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        if line.first() == Some(&b'>') {
            continue;
        }
        codes.extend(
            line.iter()
                .filter(|&&b| b != b'\n' && b != b'\r')
                .map(|&b| map_fasta_byte(b)),
        );
    }

    Ok(Sequence::from_codes_unchecked(codes))
}

/// Read a FASTA file into memory
pub fn load_fasta(path: &Path) -> Result<Sequence> {
    let file = File::open(path)?;
    let sequence = parse_fasta(file)?;
    log::debug!(
        "loaded {} symbols from {}",
        sequence.as_codes().len(),
        path.display()
    );
    Ok(sequence)
}

/// Map one FASTA byte to a code; anything outside ACGT collapses to N
#[inline]
pub(crate) fn map_fasta_byte(b: u8) -> u8 {
    match encode_symbol(b) {
        Some(code) if !is_ambiguous(code) => code,
        _ => CODE_N,
    }
}
