//! Per-position maximal repeat discovery
//!
//! For every query position the scanner grows a match one symbol at a time
//! against the target's order index, narrowing the searched range as it
//! goes. Each position yields at most a handful of candidate other-arms at
//! their longest matching length; those already explained by a recently
//! reported repeat are pruned against a sliding cache.

use super::record::{RecordPool, RepeatRecord};
use super::types::{RepeatMode, ScanConfig};
use crate::error::Result;
use crate::index::{Pattern, SearchRange, SequenceIndex};
use crate::sequence::{SequenceSource, contains_ambiguous, is_ambiguous};
use crate::utils::progress::ProgressBar;
use rustc_hash::FxHashSet;
use std::collections::BTreeMap;
use std::time::Instant;

/// Positions between debug heartbeats
const HEARTBEAT_INTERVAL: usize = 1_000_000;

/// Positions between progress bar updates
const PROGRESS_BATCH: usize = 4096;

/// Finds maximal exact repeats of a configured mode
///
/// The scanner owns its record pool, so reusing one scanner for several
/// scans keeps recycling the same allocations.
#[derive(Debug)]
pub struct RepeatScanner {
    config: ScanConfig,
    pool: RecordPool,
}

impl RepeatScanner {
    pub fn new(config: ScanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            pool: RecordPool::default(),
        })
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn pool(&self) -> &RecordPool {
        &self.pool
    }

    /// Scan `query` against `target`
    ///
    /// `config.self_search` states whether both are the same sequence.
    pub fn scan<Q, T>(&mut self, query: &Q, target: &T) -> Result<Vec<RepeatRecord>>
    where
        Q: SequenceSource + ?Sized,
        T: SequenceSource + ?Sized,
    {
        self.run(query, target, self.config.self_search, None)
    }

    /// Scan a sequence against itself, regardless of `config.self_search`
    pub fn scan_self<S: SequenceSource + ?Sized>(&mut self, sequence: &S) -> Result<Vec<RepeatRecord>> {
        self.run(sequence, sequence, true, None)
    }

    /// [`scan`](Self::scan), advancing `progress` by one per query position
    pub fn scan_with_progress<Q, T>(
        &mut self,
        query: &Q,
        target: &T,
        progress: &ProgressBar,
    ) -> Result<Vec<RepeatRecord>>
    where
        Q: SequenceSource + ?Sized,
        T: SequenceSource + ?Sized,
    {
        self.run(query, target, self.config.self_search, Some(progress))
    }

    fn run<Q, T>(
        &mut self,
        query: &Q,
        target: &T,
        self_search: bool,
        progress: Option<&ProgressBar>,
    ) -> Result<Vec<RepeatRecord>>
    where
        Q: SequenceSource + ?Sized,
        T: SequenceSource + ?Sized,
    {
        let mode = self.config.mode;
        let minimum_length = self.config.minimum_length;

        if query.is_empty() || target.is_empty() {
            return Ok(Vec::new());
        }

        let start = Instant::now();
        let index = SequenceIndex::from_source(target, mode.transform(), self.config.order_algorithm)?;
        log::info!(
            "Indexed {} symbols ({} window) in {:.2?}",
            index.len(),
            mode,
            start.elapsed()
        );

        let query = query.codes();
        let positions = Positions {
            index: &index,
            query: &query,
            target_len: target.len(),
            mode,
            minimum_length,
            exclude_self: mode.excludes_self(self_search),
        };

        let mut candidates = BTreeMap::new();
        let mut cache: Vec<RepeatRecord> = Vec::new();
        let mut seen: FxHashSet<(usize, usize)> = FxHashSet::default();
        let mut results: Vec<RepeatRecord> = Vec::new();

        let scan_start = Instant::now();
        for i in 0..query.len() {
            if i > 0 && i % HEARTBEAT_INTERVAL == 0 {
                log::debug!(
                    "Scanned {} / {} positions, {} repeats so far",
                    i,
                    query.len(),
                    results.len()
                );
            }
            if let Some(pb) = progress {
                if i % PROGRESS_BATCH == PROGRESS_BATCH - 1 {
                    pb.inc(PROGRESS_BATCH as u64);
                }
            }

            candidates.clear();
            if !positions.collect_candidates(i, &cache, &mut candidates)? {
                continue;
            }

            // Records ending before this position's minimal window can no
            // longer contain anything found from here on
            let horizon = i + minimum_length;
            let mut k = 0;
            while k < cache.len() {
                if cache[k].reaches(horizon) {
                    k += 1;
                } else {
                    let evicted = cache.swap_remove(k);
                    self.pool.release(evicted);
                }
            }

            for (other, length) in sweep(i, &candidates, &cache) {
                cache.push(self.pool.acquire(i, other, length));

                let (first, second) = if self_search && i > other {
                    (other, i)
                } else {
                    (i, other)
                };
                if seen.insert((first, second)) {
                    results.push(RepeatRecord::new(first, second, length));
                }
            }
        }

        if let Some(pb) = progress {
            pb.inc((query.len() % PROGRESS_BATCH) as u64);
        }
        for record in cache.drain(..) {
            self.pool.release(record);
        }

        results.sort_by(RepeatRecord::report_order);

        let (reused, allocated) = self.pool.counters();
        log::debug!(
            "Record pool: {} reused, {} allocated, {} available",
            reused,
            allocated,
            self.pool.available()
        );
        log::info!(
            "Found {} {} repeats in {:.2?}",
            results.len(),
            mode,
            scan_start.elapsed()
        );

        Ok(results)
    }
}

/// Read-only inputs shared by every query position of one scan
struct Positions<'a> {
    index: &'a SequenceIndex,
    query: &'a [u8],
    target_len: usize,
    mode: RepeatMode,
    minimum_length: usize,
    exclude_self: bool,
}

impl Positions<'_> {
    /// Fill `candidates` with `other_arm -> length` for position `i`
    ///
    /// Returns `false` when the position contributes nothing.
    fn collect_candidates(
        &self,
        i: usize,
        cache: &[RepeatRecord],
        candidates: &mut BTreeMap<usize, usize>,
    ) -> Result<bool> {
        let query = self.query;
        let min = self.minimum_length;

        if i + min > query.len() || contains_ambiguous(&query[i..i + min]) {
            return Ok(false);
        }

        let exclude = self.exclude_self.then_some(i);
        let mut range: Option<SearchRange> = None;
        let mut known = 0;
        let mut length = min;

        loop {
            if i + length > query.len() || is_ambiguous(query[i + length - 1]) {
                break;
            }

            let pattern = Pattern::new(query, i, length).with_known_prefix(known);
            let hit = match exclude {
                Some(offset) => self.index.find_exact_excluding(&pattern, range, offset)?,
                None => self.index.find_exact(&pattern, range)?,
            };
            let Some(hit) = hit else {
                break;
            };

            let matches = self.index.enumerate_matches(&pattern, &hit, true, exclude)?;
            range = Some(matches.range);
            known = length;

            for raw in matches.offsets {
                let other = self.mode.other_arm(raw, self.target_len, length);
                if length == min && cache.iter().any(|c| c.covers_aligned(i, other, length)) {
                    continue;
                }
                candidates.insert(other, length);
            }

            if candidates.is_empty() {
                return Ok(false);
            }
            length += 1;
        }

        Ok(!candidates.is_empty())
    }
}

/// Drop candidates whose second arm is swallowed by a neighbour's, and
/// candidates already contained in a cached record
///
/// Candidates are visited by ascending other-arm position.
fn sweep(i: usize, candidates: &BTreeMap<usize, usize>, cache: &[RepeatRecord]) -> Vec<(usize, usize)> {
    let mut alive: Vec<(usize, usize)> = candidates.iter().map(|(&o, &len)| (o, len)).collect();

    let mut k = 0;
    while k < alive.len() {
        let (other, length) = alive[k];
        if let Some(&(next, next_length)) = alive.get(k + 1) {
            if other + length >= next + next_length {
                alive.remove(k + 1);
                continue;
            }
        }
        if cache.iter().any(|c| c.covers(i, other, length)) {
            alive.remove(k);
            continue;
        }
        k += 1;
    }

    alive
}

/// Scan one sequence against itself with default settings for everything
/// but the mode and minimum length
pub fn find_repeats<S: SequenceSource + ?Sized>(
    sequence: &S,
    mode: RepeatMode,
    minimum_length: usize,
) -> Result<Vec<RepeatRecord>> {
    RepeatScanner::new(ScanConfig::new(mode, minimum_length))?.scan_self(sequence)
}
