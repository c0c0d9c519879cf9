//! In-memory coded sequence

use super::{
    ALPHABET_SIZE, CODE_A, CODE_C, CODE_G, CODE_T, SequenceSource, complement, decode_symbol,
    encode_symbol, is_ambiguous,
};
use crate::error::{RepeatError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// A sequence held in memory as one code per symbol
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sequence {
    codes: Vec<u8>,
}

impl Sequence {
    /// Wrap codes after checking every one is a symbol in `1..=6`
    pub fn from_codes(codes: Vec<u8>) -> Result<Self> {
        if let Some(position) = codes
            .iter()
            .position(|&c| c == 0 || c > ALPHABET_SIZE)
        {
            return Err(RepeatError::InvalidAlphabet {
                position,
                value: codes[position],
            });
        }
        Ok(Self { codes })
    }

    pub(crate) fn from_codes_unchecked(codes: Vec<u8>) -> Self {
        Self { codes }
    }

    /// Generate a uniformly random sequence over A, C, G, T
    pub fn random(len: usize, seed: u64) -> Self {
        const BASES: [u8; 4] = [CODE_A, CODE_C, CODE_G, CODE_T];
        let mut rng = StdRng::seed_from_u64(seed);
        let codes = (0..len).map(|_| BASES[rng.gen_range(0..4)]).collect();
        Self { codes }
    }

    /// The raw codes
    pub fn as_codes(&self) -> &[u8] {
        &self.codes
    }

    pub fn into_codes(self) -> Vec<u8> {
        self.codes
    }

    /// Number of N/U symbols
    pub fn ambiguous_count(&self) -> usize {
        self.codes.iter().filter(|&&c| is_ambiguous(c)).count()
    }

    /// Replace `[start, start+len)` with its reverse complement
    ///
    /// Used to plant inverted repeats into synthetic sequences.
    pub fn invert_in_place(&mut self, start: usize, len: usize) -> Result<()> {
        if start >= self.codes.len() || start + len > self.codes.len() {
            return Err(RepeatError::InvalidRegion {
                start,
                len,
                sequence_len: self.codes.len(),
            });
        }

        let region = &mut self.codes[start..start + len];
        region.reverse();
        for code in region.iter_mut() {
            *code = complement(*code);
        }
        Ok(())
    }

    /// Fold the alphabet to two letters: T becomes A, G becomes C
    pub fn collapse_to_binary(&mut self) {
        for code in self.codes.iter_mut() {
            match *code {
                CODE_T => *code = CODE_A,
                CODE_G => *code = CODE_C,
                _ => {}
            }
        }
    }
}

impl FromStr for Sequence {
    type Err = RepeatError;

    /// Parse literal sequence text; accepts T, G, C, A, N, U in either case
    fn from_str(s: &str) -> Result<Self> {
        let mut codes = Vec::with_capacity(s.len());
        for (position, symbol) in s.chars().enumerate() {
            let code = u8::try_from(symbol)
                .ok()
                .and_then(encode_symbol)
                .ok_or(RepeatError::InvalidSymbol { position, symbol })?;
            codes.push(code);
        }
        Ok(Self { codes })
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &code in &self.codes {
            write!(f, "{}", decode_symbol(code).unwrap_or('?'))?;
        }
        Ok(())
    }
}

impl SequenceSource for Sequence {
    #[inline]
    fn len(&self) -> usize {
        self.codes.len()
    }

    #[inline]
    fn symbol_at(&self, pos: usize) -> u8 {
        self.codes[pos]
    }

    fn subsequence(&self, start: usize, len: usize) -> Sequence {
        Self::from_codes_unchecked(self.codes[start..start + len].to_vec())
    }

    fn codes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(&self.codes)
    }
}
