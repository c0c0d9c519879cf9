//! Coded nucleotide sequences
//!
//! Every sequence is stored as one byte per symbol using the codes below.
//! Code `0` is never a symbol: it terminates indexed windows so that a
//! shorter suffix always sorts before a longer one sharing its prefix.
//!
//! ## Modules
//!
//! - [`memory`] - In-memory [`Sequence`]
//! - [`mapped`] - Memory-mapped, file-backed FASTA source
//! - [`fasta`] - FASTA text parsing
//! - [`transform`] - Complement / reverse views and padded windows

pub mod fasta;
pub mod mapped;
pub mod memory;
pub mod transform;

pub use fasta::{load_fasta, parse_fasta};
pub use mapped::MappedFasta;
pub use memory::Sequence;
pub use transform::Transform;

use std::borrow::Cow;

/// Symbol code for T
pub const CODE_T: u8 = 1;
/// Symbol code for G
pub const CODE_G: u8 = 2;
/// Symbol code for C
pub const CODE_C: u8 = 3;
/// Symbol code for A
pub const CODE_A: u8 = 4;
/// Ambiguous base
pub const CODE_N: u8 = 5;
/// Ambiguous base (complement of N)
pub const CODE_U: u8 = 6;

/// Reserved terminator code
pub const SENTINEL: u8 = 0;

/// Number of symbol codes (T, G, C, A, N, U)
pub const ALPHABET_SIZE: u8 = 6;

/// Lookup from character to symbol code, 0 for characters without one
const CHAR_TO_CODE: [u8; 256] = {
    let mut table = [0u8; 256];
    table[b'T' as usize] = CODE_T;
    table[b't' as usize] = CODE_T;
    table[b'G' as usize] = CODE_G;
    table[b'g' as usize] = CODE_G;
    table[b'C' as usize] = CODE_C;
    table[b'c' as usize] = CODE_C;
    table[b'A' as usize] = CODE_A;
    table[b'a' as usize] = CODE_A;
    table[b'N' as usize] = CODE_N;
    table[b'n' as usize] = CODE_N;
    table[b'U' as usize] = CODE_U;
    table[b'u' as usize] = CODE_U;
    table
};

/// Convert a character to its symbol code
#[inline]
pub fn encode_symbol(ch: u8) -> Option<u8> {
    match CHAR_TO_CODE[ch as usize] {
        SENTINEL => None,
        code => Some(code),
    }
}

/// Convert a symbol code back to its character
#[inline]
pub fn decode_symbol(code: u8) -> Option<char> {
    match code {
        CODE_T => Some('T'),
        CODE_G => Some('G'),
        CODE_C => Some('C'),
        CODE_A => Some('A'),
        CODE_N => Some('N'),
        CODE_U => Some('U'),
        _ => None,
    }
}

/// Complement of a symbol code; the sentinel maps to itself
#[inline]
pub fn complement(code: u8) -> u8 {
    match code {
        CODE_T => CODE_A,
        CODE_A => CODE_T,
        CODE_G => CODE_C,
        CODE_C => CODE_G,
        CODE_N => CODE_U,
        CODE_U => CODE_N,
        other => other,
    }
}

/// Whether the code marks an unknown base
#[inline]
pub fn is_ambiguous(code: u8) -> bool {
    code == CODE_N || code == CODE_U
}

/// Whether any code in the slice is ambiguous
#[inline]
pub fn contains_ambiguous(codes: &[u8]) -> bool {
    memchr::memchr2(CODE_N, CODE_U, codes).is_some()
}

/// Read access to a coded sequence, independent of where it is stored
///
/// The index and the scanner only ever see sequences through this trait,
/// so in-memory and file-backed sources are interchangeable.
pub trait SequenceSource {
    /// Number of symbols
    fn len(&self) -> usize;

    /// Symbol code at `pos`; panics when `pos >= len()`
    fn symbol_at(&self, pos: usize) -> u8;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy `len` symbols starting at `start`
    fn subsequence(&self, start: usize, len: usize) -> Sequence {
        let codes = (start..start + len).map(|pos| self.symbol_at(pos)).collect();
        Sequence::from_codes_unchecked(codes)
    }

    /// All codes as one contiguous slice
    fn codes(&self) -> Cow<'_, [u8]> {
        Cow::Owned(self.subsequence(0, self.len()).into_codes())
    }
}
