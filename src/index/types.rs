//! Types for order-index queries
//!
//! Range searches return their narrowed bounds in these structs so the
//! caller can feed them into the next, longer search.

use serde::{Deserialize, Serialize};

/// Minimum number of zeroed sentinel slots after the real window data
pub const WINDOW_PADDING: usize = 10;

/// Suffix order entry - offset into the window
pub type OrderEntry = u32;

/// Half-open range `[min, max)` of order slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchRange {
    pub min: usize,
    pub max: usize,
}

impl SearchRange {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.max.saturating_sub(self.min)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min >= self.max
    }

    #[inline]
    pub fn contains(&self, slot: usize) -> bool {
        self.min <= slot && slot < self.max
    }
}

/// A successful range search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    /// Order slot of the match (somewhere inside the group, not necessarily
    /// its first or last slot)
    pub slot: usize,
    /// Window offset stored at `slot`
    pub offset: usize,
    /// Range holding every match of the searched length
    pub range: SearchRange,
}

/// Every member of one equal-prefix group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matches {
    /// Window offsets of the group, in order-slot order, minus any excluded one
    pub offsets: Vec<usize>,
    /// Exact bounds of the group
    pub range: SearchRange,
}

/// The longest substring shared by a query and the indexed window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonSubstring {
    pub query_start: usize,
    pub target_offset: usize,
    pub length: usize,
}

/// Statistics about a built index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexStats {
    /// Real symbols in the window
    pub window_len: usize,
    /// Largest valid symbol code
    pub alphabet_size: u8,
    /// Entries in the order permutation (equals `window_len`)
    pub order_len: usize,
}
