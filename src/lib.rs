//! # repseek - Maximal Exact Repeat Finder
//!
//! Finds maximal exact repeats in nucleotide sequences: pairs of
//! equal-length segments related by identity, reversal, complement, or
//! reverse complement (hairpins).
//!
//! ## Architecture
//!
//! - [`sequence`] - Coded nucleotide sequences, FASTA loading, transforms
//! - [`index`] - Suffix order over a coded window and its range queries
//! - [`scan`] - Per-position repeat discovery with pruning
//! - [`output`] - TSV / JSON record formatting
//! - [`utils`] - Progress reporting
//!
//! ## Quick Start
//!
//! ```
//! use repseek::scan::{find_repeats, RepeatMode};
//! use repseek::sequence::Sequence;
//!
//! let seq: Sequence = "ACCGTNNNNACGGT".parse().unwrap();
//! let repeats = find_repeats(&seq, RepeatMode::ComplementReverseInverted, 4).unwrap();
//!
//! assert_eq!(repeats.len(), 1);
//! assert_eq!((repeats[0].first_arm, repeats[0].second_arm), (0, 9));
//! assert_eq!(repeats[0].arm_length, 5);
//! ```
//!
//! ## Performance
//!
//! The target is indexed once (comparison sort or SA-IS). Each query
//! position then costs a few binary searches, each confined to the range
//! left by the previous, shorter match and comparing only the new symbols.

pub mod error;
pub mod index;
pub mod output;
pub mod scan;
pub mod sequence;
pub mod utils;

pub use error::{RepeatError, Result};
pub use scan::{find_repeats, RepeatMode, RepeatRecord, RepeatScanner, ScanConfig};
pub use sequence::{Sequence, SequenceSource, Transform};
