//! Order index over a coded window
//!
//! Answers exact-prefix queries by binary search over the suffix order.
//! Searches take an optional starting range and a count of leading symbols
//! already known to be equal inside that range, so a caller growing a match
//! one symbol at a time only ever compares the new symbols.

use super::builder::{OrderAlgorithm, OrderBuilder};
use super::types::*;
use crate::error::{RepeatError, Result};
use crate::sequence::{ALPHABET_SIZE, SENTINEL, SequenceSource, Transform};
use std::cmp::Ordering;

/// A query slice plus the number of its leading symbols that every suffix in
/// the searched range is already known to share
#[derive(Debug, Clone, Copy)]
pub struct Pattern<'a> {
    codes: &'a [u8],
    known_prefix: usize,
}

impl<'a> Pattern<'a> {
    /// Pattern `query[start..start+len]`
    pub fn new(query: &'a [u8], start: usize, len: usize) -> Self {
        Self {
            codes: &query[start..start + len],
            known_prefix: 0,
        }
    }

    pub fn from_codes(codes: &'a [u8]) -> Self {
        Self {
            codes,
            known_prefix: 0,
        }
    }

    /// Skip the first `known` symbols in every comparison
    pub fn with_known_prefix(mut self, known: usize) -> Self {
        self.known_prefix = known.min(self.codes.len());
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// Suffix order over a sentinel-padded coded window
pub struct SequenceIndex {
    /// Real codes followed by at least `WINDOW_PADDING` zeros
    window: Vec<u8>,
    /// Number of real symbols
    len: usize,
    alphabet: u8,
    order: Vec<OrderEntry>,
}

impl SequenceIndex {
    /// Build over `codes[..n]` with alphabet `1..=k`
    ///
    /// `codes` must carry at least [`WINDOW_PADDING`] slots past `n`; they
    /// are reset to the sentinel.
    pub fn build(mut codes: Vec<u8>, n: usize, k: u8, builder: &dyn OrderBuilder) -> Result<Self> {
        let required = n + WINDOW_PADDING;
        if codes.len() < required {
            return Err(RepeatError::InsufficientPadding {
                len: codes.len(),
                required,
            });
        }
        if n > OrderEntry::MAX as usize {
            return Err(RepeatError::WindowTooLarge { len: n });
        }
        if let Some(position) = codes[..n].iter().position(|&c| c == SENTINEL || c > k) {
            return Err(RepeatError::InvalidAlphabet {
                position,
                value: codes[position],
            });
        }

        codes[n..].fill(SENTINEL);

        let order = builder.build(&codes, n);
        debug_assert_eq!(order.len(), n);

        Ok(Self {
            window: codes,
            len: n,
            alphabet: k,
            order,
        })
    }

    /// Index a transformed view of a sequence using the given algorithm
    pub fn from_source<S: SequenceSource + ?Sized>(
        source: &S,
        transform: Transform,
        algorithm: OrderAlgorithm,
    ) -> Result<Self> {
        let n = source.len();
        let window = transform.window(source);
        let builder = algorithm.builder_for(n);
        Self::build(window, n, ALPHABET_SIZE, builder.as_ref())
    }

    /// Number of real symbols in the window
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Real window codes
    pub fn window(&self) -> &[u8] {
        &self.window[..self.len]
    }

    /// Window offset stored at an order slot
    #[inline]
    pub fn offset_at(&self, slot: usize) -> usize {
        self.order[slot] as usize
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            window_len: self.len,
            alphabet_size: self.alphabet,
            order_len: self.order.len(),
        }
    }

    /// Find a suffix starting with `pattern` inside `range` (the whole order
    /// when `None`)
    ///
    /// Returns `Ok(None)` when nothing matches. The returned range contains
    /// every match of this pattern and can be passed to the next, longer
    /// search.
    pub fn find_exact(&self, pattern: &Pattern, range: Option<SearchRange>) -> Result<Option<Hit>> {
        let range = self.resolve_range(range)?;
        Ok(self.search_range(pattern, range))
    }

    /// Like [`find_exact`](Self::find_exact), but a suffix at window offset
    /// `exclude` never counts as a hit
    ///
    /// When the first hit is the excluded offset, the slots below and above
    /// it are searched separately. If only one side matches its narrower
    /// range is returned; if both match the lower hit is returned with the
    /// enclosing range.
    pub fn find_exact_excluding(
        &self,
        pattern: &Pattern,
        range: Option<SearchRange>,
        exclude: usize,
    ) -> Result<Option<Hit>> {
        let range = self.resolve_range(range)?;
        let Some(hit) = self.search_range(pattern, range) else {
            return Ok(None);
        };
        if hit.offset != exclude {
            return Ok(Some(hit));
        }

        let below = self.search_range(pattern, SearchRange::new(hit.range.min, hit.slot));
        let above = self.search_range(pattern, SearchRange::new(hit.slot + 1, hit.range.max));

        Ok(match (below, above) {
            (None, None) => None,
            (Some(lower), None) => Some(lower),
            (None, Some(upper)) => Some(upper),
            (Some(lower), Some(_)) => Some(Hit {
                range: hit.range,
                ..lower
            }),
        })
    }

    /// Collect every window offset in the equal-prefix group around `hit`
    ///
    /// Walks outward from `hit.slot` until the prefix stops matching on each
    /// side, and returns the group's exact bounds. Unless
    /// `skip_anchor_check` is set, the anchor slot itself is verified first.
    pub fn enumerate_matches(
        &self,
        pattern: &Pattern,
        hit: &Hit,
        skip_anchor_check: bool,
        exclude: Option<usize>,
    ) -> Result<Matches> {
        let range = hit.range;
        if range.is_empty() || range.max > self.len || !range.contains(hit.slot) {
            return Err(RepeatError::InvalidRange {
                min: range.min,
                max: range.max,
            });
        }
        if !skip_anchor_check && self.compare_at(pattern, hit.slot) != Ordering::Equal {
            return Err(RepeatError::InvalidRange {
                min: range.min,
                max: range.max,
            });
        }

        let mut offsets = Vec::new();
        let mut push = |offset: usize| {
            if Some(offset) != exclude {
                offsets.push(offset);
            }
        };

        push(self.offset_at(hit.slot));

        let mut min = range.min;
        for slot in (range.min..hit.slot).rev() {
            if self.compare_at(pattern, slot) != Ordering::Equal {
                min = slot + 1;
                break;
            }
            push(self.offset_at(slot));
        }

        let mut max = range.max;
        for slot in hit.slot + 1..range.max {
            if self.compare_at(pattern, slot) != Ordering::Equal {
                max = slot;
                break;
            }
            push(self.offset_at(slot));
        }

        Ok(Matches {
            offsets,
            range: SearchRange::new(min, max),
        })
    }

    /// Number of occurrences of `codes` in the window
    pub fn count(&self, codes: &[u8]) -> usize {
        self.group(codes).map_or(0, |m| m.range.len())
    }

    /// Check if `codes` occurs in the window
    pub fn contains(&self, codes: &[u8]) -> bool {
        self.group(codes).is_some()
    }

    /// Sorted window offsets of every occurrence of `codes`
    pub fn locate(&self, codes: &[u8]) -> Vec<usize> {
        let mut offsets = self.group(codes).map(|m| m.offsets).unwrap_or_default();
        offsets.sort_unstable();
        offsets
    }

    /// Length of the longest prefix of `query[start..]` found in the window
    pub fn longest_match_at(&self, query: &[u8], start: usize) -> usize {
        let mut range = None;
        let mut length = 0;
        while start + length < query.len() {
            let pattern = Pattern::new(query, start, length + 1);
            match self.search_range(&pattern, range.unwrap_or(self.full_range())) {
                Some(hit) => {
                    range = Some(hit.range);
                    length += 1;
                }
                None => break,
            }
        }
        length
    }

    /// [`longest_match_at`](Self::longest_match_at) for every query position
    pub fn match_length_profile(&self, query: &[u8]) -> Vec<usize> {
        (0..query.len())
            .map(|start| self.longest_match_at(query, start))
            .collect()
    }

    /// Longest substring of `query` that also occurs in the window
    ///
    /// Each position starts probing just above the best length so far, so
    /// positions that cannot improve it cost a single search.
    pub fn longest_common_substring(&self, query: &[u8]) -> Option<CommonSubstring> {
        let mut best: Option<CommonSubstring> = None;

        for start in 0..query.len() {
            let mut length = best.map_or(0, |b| b.length);
            let mut range = self.full_range();
            let mut found = None;

            while start + length < query.len() {
                let pattern = Pattern::new(query, start, length + 1);
                let Some(hit) = self.search_range(&pattern, range) else {
                    break;
                };
                range = hit.range;
                length += 1;
                found = Some(hit.offset);
            }

            if let Some(target_offset) = found {
                best = Some(CommonSubstring {
                    query_start: start,
                    target_offset,
                    length,
                });
            }
        }

        best
    }

    /// The full equal-prefix group for a standalone pattern
    fn group(&self, codes: &[u8]) -> Option<Matches> {
        if codes.is_empty() {
            return None;
        }
        let pattern = Pattern::from_codes(codes);
        let hit = self.search_range(&pattern, self.full_range())?;
        self.enumerate_matches(&pattern, &hit, true, None).ok()
    }

    #[inline]
    fn full_range(&self) -> SearchRange {
        SearchRange::new(0, self.len)
    }

    /// Validate a caller-supplied range, defaulting to the whole order
    fn resolve_range(&self, range: Option<SearchRange>) -> Result<SearchRange> {
        match range {
            None => Ok(self.full_range()),
            Some(r) if r.is_empty() || r.max > self.len => Err(RepeatError::InvalidRange {
                min: r.min,
                max: r.max,
            }),
            Some(r) => Ok(r),
        }
    }

    /// Binary search inside `range`
    ///
    /// The range shrinks around the probe until the probe matches; at that
    /// point the probe is the midpoint of the returned range and every
    /// match lies inside it.
    fn search_range(&self, pattern: &Pattern, range: SearchRange) -> Option<Hit> {
        let mut lo = range.min;
        let mut hi = range.max;

        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            match self.compare_at(pattern, mid) {
                Ordering::Equal => {
                    return Some(Hit {
                        slot: mid,
                        offset: self.offset_at(mid),
                        range: SearchRange::new(lo, hi),
                    });
                }
                Ordering::Less => hi = mid,
                Ordering::Greater => {
                    if lo == mid {
                        return None;
                    }
                    lo = mid;
                }
            }
        }

        None
    }

    /// Compare the pattern against the prefix of the suffix at `slot`
    ///
    /// Symbols before `known_prefix` are not compared. Positions past the
    /// real window read as the sentinel, which is smaller than any symbol.
    #[inline]
    fn compare_at(&self, pattern: &Pattern, slot: usize) -> Ordering {
        let skip = pattern.known_prefix;
        let wanted = &pattern.codes[skip..];
        let start = (self.offset_at(slot) + skip).min(self.len);
        let available = (self.len - start).min(wanted.len());

        match wanted[..available].cmp(&self.window[start..start + available]) {
            Ordering::Equal if available < wanted.len() => Ordering::Greater,
            ord => ord,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::builder::SortOrderBuilder;
    use crate::sequence::Sequence;

    fn codes(s: &str) -> Vec<u8> {
        s.parse::<Sequence>().unwrap().into_codes()
    }

    fn index(s: &str) -> SequenceIndex {
        let seq: Sequence = s.parse().unwrap();
        SequenceIndex::from_source(&seq, Transform::Identity, OrderAlgorithm::Sort).unwrap()
    }

    #[test]
    fn test_build_rejects_zero_code() {
        let mut window = codes("ACGT");
        window[2] = 0;
        window.resize(4 + WINDOW_PADDING, 0);
        let err = SequenceIndex::build(window, 4, ALPHABET_SIZE, &SortOrderBuilder)
            .err()
            .unwrap();
        assert!(matches!(
            err,
            RepeatError::InvalidAlphabet {
                position: 2,
                value: 0
            }
        ));
    }

    #[test]
    fn test_build_rejects_code_above_k() {
        let mut window = codes("ACGTN");
        window.resize(5 + WINDOW_PADDING, 0);
        // N is 5, so a 4-letter alphabet rejects it
        let err = SequenceIndex::build(window, 5, 4, &SortOrderBuilder)
            .err()
            .unwrap();
        assert!(matches!(
            err,
            RepeatError::InvalidAlphabet {
                position: 4,
                value: 5
            }
        ));
    }

    #[test]
    fn test_build_requires_padding() {
        let window = codes("ACGT");
        let err = SequenceIndex::build(window, 4, ALPHABET_SIZE, &SortOrderBuilder)
            .err()
            .unwrap();
        assert!(matches!(err, RepeatError::InsufficientPadding { .. }));
    }

    #[test]
    fn test_build_clears_padding() {
        let mut window = codes("ACGT");
        window.resize(4 + WINDOW_PADDING, 9);
        let idx = SequenceIndex::build(window, 4, ALPHABET_SIZE, &SortOrderBuilder).unwrap();
        assert!(idx.window[4..].iter().all(|&c| c == 0));
        assert_eq!(idx.stats().order_len, 4);
    }

    #[test]
    fn test_find_exact_hit_and_miss() {
        let idx = index("GATTACAGATTACA");
        let query = codes("TTAC");
        let hit = idx
            .find_exact(&Pattern::from_codes(&query), None)
            .unwrap()
            .unwrap();
        assert!(hit.offset == 2 || hit.offset == 9);
        assert!(hit.range.contains(hit.slot));

        let missing = codes("TTTT");
        assert!(idx
            .find_exact(&Pattern::from_codes(&missing), None)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_find_exact_past_window_end() {
        let idx = index("ACGT");
        // "GTA" would need a symbol past the end of the window
        let query = codes("GTA");
        assert!(idx
            .find_exact(&Pattern::from_codes(&query), None)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_find_exact_invalid_range() {
        let idx = index("ACGT");
        let query = codes("A");
        let pattern = Pattern::from_codes(&query);
        let err = idx
            .find_exact(&pattern, Some(SearchRange::new(2, 2)))
            .err()
            .unwrap();
        assert!(matches!(err, RepeatError::InvalidRange { min: 2, max: 2 }));
        assert!(idx.find_exact(&pattern, Some(SearchRange::new(0, 9))).is_err());
    }

    #[test]
    fn test_empty_index_is_a_miss() {
        let idx = index("");
        let query = codes("A");
        assert!(idx
            .find_exact(&Pattern::from_codes(&query), None)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_find_excluding_only_occurrence() {
        let idx = index("ACGTTT");
        let query = codes("ACG");
        let pattern = Pattern::from_codes(&query);
        assert!(idx.find_exact_excluding(&pattern, None, 0).unwrap().is_none());
        assert_eq!(
            idx.find_exact_excluding(&pattern, None, 3)
                .unwrap()
                .unwrap()
                .offset,
            0
        );
    }

    #[test]
    fn test_find_excluding_returns_other_occurrence() {
        let idx = index("ACGTACGT");
        let query = codes("ACGT");
        let pattern = Pattern::from_codes(&query);
        for exclude in [0, 4] {
            let hit = idx
                .find_exact_excluding(&pattern, None, exclude)
                .unwrap()
                .unwrap();
            assert_ne!(hit.offset, exclude);
            let m = idx.enumerate_matches(&pattern, &hit, false, Some(exclude)).unwrap();
            assert_eq!(m.offsets, vec![4 - exclude]);
        }
    }

    #[test]
    fn test_enumerate_collects_group() {
        let idx = index("ACACACGGAC");
        let query = codes("AC");
        let pattern = Pattern::from_codes(&query);
        let hit = idx.find_exact(&pattern, None).unwrap().unwrap();
        let m = idx.enumerate_matches(&pattern, &hit, false, None).unwrap();

        let mut offsets = m.offsets.clone();
        offsets.sort_unstable();
        assert_eq!(offsets, vec![0, 2, 4, 8]);
        assert_eq!(m.range.len(), 4);
        for slot in m.range.min..m.range.max {
            assert_eq!(&idx.window()[idx.offset_at(slot)..idx.offset_at(slot) + 2], &query[..]);
        }
    }

    #[test]
    fn test_enumerate_excludes_position() {
        let idx = index("ACACAC");
        let query = codes("AC");
        let pattern = Pattern::from_codes(&query);
        let hit = idx.find_exact(&pattern, None).unwrap().unwrap();
        let mut m = idx.enumerate_matches(&pattern, &hit, true, Some(2)).unwrap();
        m.offsets.sort_unstable();
        assert_eq!(m.offsets, vec![0, 4]);
        // The excluded suffix still belongs to the group bounds
        assert_eq!(m.range.len(), 3);
    }

    #[test]
    fn test_enumerate_rejects_bad_anchor() {
        let idx = index("ACGTACGT");
        let query = codes("TTT");
        let pattern = Pattern::from_codes(&query);
        let bogus = Hit {
            slot: 3,
            offset: idx.offset_at(3),
            range: SearchRange::new(0, 8),
        };
        assert!(idx.enumerate_matches(&pattern, &bogus, false, None).is_err());

        let empty = Hit {
            slot: 0,
            offset: idx.offset_at(0),
            range: SearchRange::new(1, 1),
        };
        assert!(idx.enumerate_matches(&pattern, &empty, true, None).is_err());
    }

    #[test]
    fn test_growth_with_known_prefix() {
        let idx = index("GATTACAGATTACCGATTAG");
        let query = codes("GATTACC");

        let mut range = None;
        let mut last = None;
        for len in 4..=query.len() {
            let known = if range.is_some() { len - 1 } else { 0 };
            let pattern = Pattern::new(&query, 0, len).with_known_prefix(known);
            let Some(hit) = idx.find_exact(&pattern, range).unwrap() else {
                break;
            };
            let m = idx.enumerate_matches(&pattern, &hit, true, None).unwrap();
            range = Some(m.range);
            last = Some((len, m.offsets));
        }

        let (len, offsets) = last.unwrap();
        assert_eq!(len, 7);
        assert_eq!(offsets, vec![7]);
    }

    #[test]
    fn test_count_contains_locate() {
        let idx = index("GATTACAGATTACA");
        assert_eq!(idx.count(&codes("GATTACA")), 2);
        assert_eq!(idx.locate(&codes("A")), vec![1, 4, 6, 8, 11, 13]);
        assert!(idx.contains(&codes("ACAG")));
        assert!(!idx.contains(&codes("CC")));
        assert_eq!(idx.count(&[]), 0);
    }

    #[test]
    fn test_longest_match_profile() {
        let idx = index("ACGTT");
        let query = codes("CGTA");
        assert_eq!(idx.match_length_profile(&query), vec![3, 2, 1, 1]);
        assert_eq!(idx.longest_match_at(&query, 0), 3);
    }

    #[test]
    fn test_longest_common_substring() {
        let idx = index("TTTTGATTACATTTT");
        let query = codes("CCGATTACCC");
        let lcs = idx.longest_common_substring(&query).unwrap();
        // GATTAC
        assert_eq!(lcs.length, 6);
        assert_eq!(lcs.query_start, 2);
        assert_eq!(lcs.target_offset, 4);

        assert!(index("AAAA").longest_common_substring(&codes("CCC")).is_none());
    }
}
