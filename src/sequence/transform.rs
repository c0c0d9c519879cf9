//! Derived views of a sequence
//!
//! Each repeat mode searches its "other arm" in a transformed copy of the
//! target. For `AATTCCGG`:
//!
//! | transform | result |
//! |---|---|
//! | complement | `TTAAGGCC` |
//! | reverse | `GGCCTTAA` |
//! | complement-reverse | `CCGGAATT` |

use super::{Sequence, SequenceSource, complement};
use crate::index::WINDOW_PADDING;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Transform {
    Identity,
    Complement,
    Reverse,
    ComplementReverse,
}

impl Transform {
    /// Whether position `p` of the result comes from `len - 1 - p` of the input
    pub fn is_mirrored(self) -> bool {
        matches!(self, Transform::Reverse | Transform::ComplementReverse)
    }

    /// Produce the transformed sequence
    pub fn apply<S: SequenceSource + ?Sized>(self, source: &S) -> Sequence {
        Sequence::from_codes_unchecked(self.transformed_codes(source, 0))
    }

    /// Produce the transformed codes followed by zeroed sentinel padding,
    /// ready to be indexed
    pub fn window<S: SequenceSource + ?Sized>(self, source: &S) -> Vec<u8> {
        self.transformed_codes(source, WINDOW_PADDING)
    }

    fn transformed_codes<S: SequenceSource + ?Sized>(self, source: &S, padding: usize) -> Vec<u8> {
        let codes = source.codes();
        let mut out = Vec::with_capacity(codes.len() + padding);

        match self {
            Transform::Identity => out.extend_from_slice(&codes),
            Transform::Complement => out.extend(codes.iter().map(|&c| complement(c))),
            Transform::Reverse => out.extend(codes.iter().rev().copied()),
            Transform::ComplementReverse => {
                out.extend(codes.iter().rev().map(|&c| complement(c)))
            }
        }

        out.resize(codes.len() + padding, 0);
        out
    }
}
