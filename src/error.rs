//! Error types shared by the index, the sequence layer and the scanner.
//!
//! A query that finds nothing is not an error: range searches return
//! `Ok(None)` for a miss and reserve [`RepeatError::InvalidRange`] for
//! caller misuse.

use thiserror::Error;

/// Main error type for repseek operations
#[derive(Error, Debug)]
pub enum RepeatError {
    /// A real-range code is the sentinel or lies outside `1..=k`
    #[error("invalid alphabet: code {value} at position {position}")]
    InvalidAlphabet { position: usize, value: u8 },

    /// A range query was given an empty or out-of-bounds range
    #[error("invalid search range [{min}, {max})")]
    InvalidRange { min: usize, max: usize },

    /// The coded buffer lacks the trailing sentinel slots
    #[error("coded window of length {len} needs at least {required} slots")]
    InsufficientPadding { len: usize, required: usize },

    /// The window cannot be addressed by a 32-bit order permutation
    #[error("window of {len} symbols exceeds the index limit")]
    WindowTooLarge { len: usize },

    /// A character that has no symbol code
    #[error("invalid symbol {symbol:?} at position {position}")]
    InvalidSymbol { position: usize, symbol: char },

    /// A region that does not fit inside the sequence
    #[error("region {start}+{len} out of range for sequence of length {sequence_len}")]
    InvalidRegion {
        start: usize,
        len: usize,
        sequence_len: usize,
    },

    /// Invalid scan configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O errors while reading sequence files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Results using RepeatError
pub type Result<T> = std::result::Result<T, RepeatError>;

impl RepeatError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
