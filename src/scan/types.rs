//! Repeat modes and scan configuration

use crate::error::{RepeatError, Result};
use crate::index::OrderAlgorithm;
use crate::sequence::Transform;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default minimum arm length
pub const DEFAULT_MINIMUM_LENGTH: usize = 50;

/// Which relation the two arms of a repeat must satisfy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RepeatMode {
    /// Second arm equals the first
    #[default]
    Direct,
    /// Second arm is the first read backwards
    Reverse,
    /// Second arm is the complement of the first
    ComplementInverted,
    /// Second arm is the reverse complement of the first (hairpin)
    ComplementReverseInverted,
}

impl RepeatMode {
    /// Transform applied to the target before indexing
    pub fn transform(self) -> Transform {
        match self {
            RepeatMode::Direct => Transform::Identity,
            RepeatMode::Reverse => Transform::Reverse,
            RepeatMode::ComplementInverted => Transform::Complement,
            RepeatMode::ComplementReverseInverted => Transform::ComplementReverse,
        }
    }

    /// Whether window offsets run backwards relative to the target
    pub fn is_mirrored(self) -> bool {
        self.transform().is_mirrored()
    }

    /// Map a window offset of a `length`-symbol hit to its other-arm
    /// position in the target
    #[inline]
    pub fn other_arm(self, raw_offset: usize, target_len: usize, length: usize) -> usize {
        if self.is_mirrored() {
            target_len - raw_offset - length
        } else {
            raw_offset
        }
    }

    /// Whether the scanning position must be excluded from its own search
    ///
    /// Only a same-strand self-search can find the query position itself.
    pub fn excludes_self(self, self_search: bool) -> bool {
        self_search && !self.is_mirrored()
    }
}

impl fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RepeatMode::Direct => "direct",
            RepeatMode::Reverse => "reverse",
            RepeatMode::ComplementInverted => "complement",
            RepeatMode::ComplementReverseInverted => "inverted",
        };
        f.write_str(name)
    }
}

/// Configuration for a repeat scan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub mode: RepeatMode,
    /// Shortest arm length reported (default: 50)
    pub minimum_length: usize,
    /// Query and target are the same sequence (default: true)
    pub self_search: bool,
    /// Suffix order construction algorithm
    pub order_algorithm: OrderAlgorithm,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            mode: RepeatMode::Direct,
            minimum_length: DEFAULT_MINIMUM_LENGTH,
            self_search: true,
            order_algorithm: OrderAlgorithm::Auto,
        }
    }
}

impl ScanConfig {
    pub fn new(mode: RepeatMode, minimum_length: usize) -> Self {
        Self {
            mode,
            minimum_length,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.minimum_length == 0 {
            return Err(RepeatError::config("minimum_length must be at least 1"));
        }
        Ok(())
    }
}
