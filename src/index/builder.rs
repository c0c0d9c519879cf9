//! Suffix order construction
//!
//! Two builders produce the same permutation:
//!
//! 1. [`SortOrderBuilder`] sorts all offsets by direct suffix comparison,
//!    in parallel for large windows. Simple and cache-friendly, but
//!    highly repetitive input makes each comparison long.
//! 2. [`SaisOrderBuilder`] runs linear-time SA-IS, which is the right
//!    choice at genome scale.
//!
//! Both expect the real window data to be followed by a zero sentinel.

use super::types::OrderEntry;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Window size above which the comparison sort runs in parallel
const PARALLEL_SORT_THRESHOLD: usize = 100_000;

/// Window size above which [`OrderAlgorithm::Auto`] switches to SA-IS
const SAIS_THRESHOLD: usize = 1_000_000;

/// Computes the suffix order of a coded window
pub trait OrderBuilder: Send + Sync {
    /// `window[..n]` holds the real codes and `window[n]` is the sentinel.
    /// Returns the offsets `0..n` sorted by the suffix starting at each.
    fn build(&self, window: &[u8], n: usize) -> Vec<OrderEntry>;
}

/// Sorts suffix offsets by comparing the suffixes they point to
///
/// Time: O(n log n) comparisons, each up to the longest repeat length
#[derive(Debug, Clone, Copy, Default)]
pub struct SortOrderBuilder;

impl OrderBuilder for SortOrderBuilder {
    fn build(&self, window: &[u8], n: usize) -> Vec<OrderEntry> {
        // Including the sentinel makes every suffix unique, so the
        // comparison never reaches the end of both slices
        let text = &window[..=n];
        let mut order: Vec<OrderEntry> = (0..n as OrderEntry).collect();

        if n > PARALLEL_SORT_THRESHOLD {
            order.par_sort_unstable_by(|&a, &b| text[a as usize..].cmp(&text[b as usize..]));
        } else {
            order.sort_unstable_by(|&a, &b| text[a as usize..].cmp(&text[b as usize..]));
        }

        order
    }
}

/// Linear-time construction using the SA-IS implementation from `bio`
#[derive(Debug, Clone, Copy, Default)]
pub struct SaisOrderBuilder;

impl OrderBuilder for SaisOrderBuilder {
    fn build(&self, window: &[u8], n: usize) -> Vec<OrderEntry> {
        // SA-IS needs the text to end with a unique smallest symbol, which
        // is exactly the sentinel slot at `n`
        let raw = bio::data_structures::suffix_array::suffix_array(&window[..=n]);

        raw.into_iter()
            .filter(|&pos| pos < n)
            .map(|pos| pos as OrderEntry)
            .collect()
    }
}

/// Which construction algorithm to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderAlgorithm {
    /// Comparison sort for small windows, SA-IS above one million symbols
    #[default]
    Auto,
    Sort,
    Sais,
}

impl OrderAlgorithm {
    /// Pick a builder for a window of `n` real symbols
    pub fn builder_for(self, n: usize) -> Box<dyn OrderBuilder> {
        match self {
            OrderAlgorithm::Sort => Box::new(SortOrderBuilder),
            OrderAlgorithm::Sais => Box::new(SaisOrderBuilder),
            OrderAlgorithm::Auto if n > SAIS_THRESHOLD => Box::new(SaisOrderBuilder),
            OrderAlgorithm::Auto => Box::new(SortOrderBuilder),
        }
    }
}
