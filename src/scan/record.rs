//! Repeat records and their recycling pool

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Records kept for reuse by default
pub const DEFAULT_POOL_CAPACITY: usize = 1000;

/// One repeat: two arm start positions sharing an arm length
///
/// Equality and hashing only look at the arm pair; a pair is recorded once,
/// at its maximal length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepeatRecord {
    pub first_arm: usize,
    pub second_arm: usize,
    pub arm_length: usize,
}

impl RepeatRecord {
    pub fn new(first_arm: usize, second_arm: usize, arm_length: usize) -> Self {
        Self {
            first_arm,
            second_arm,
            arm_length,
        }
    }

    /// Arm pair identity
    #[inline]
    pub fn pair(&self) -> (usize, usize) {
        (self.first_arm, self.second_arm)
    }

    /// Whether both arms of `(first, second, length)` lie inside this
    /// record's arms
    #[inline]
    pub fn covers(&self, first: usize, second: usize, length: usize) -> bool {
        self.first_arm <= first
            && self.first_arm + self.arm_length >= first + length
            && self.second_arm <= second
            && self.second_arm + self.arm_length >= second + length
    }

    /// [`covers`](Self::covers), restricted to the same diagonal
    #[inline]
    pub fn covers_aligned(&self, first: usize, second: usize, length: usize) -> bool {
        self.covers(first, second, length)
            && self.first_arm.abs_diff(first) == self.second_arm.abs_diff(second)
    }

    /// Whether the first arm still reaches `pos`
    #[inline]
    pub fn reaches(&self, pos: usize) -> bool {
        self.first_arm + self.arm_length >= pos
    }

    /// Report ordering: longest first, then by first arm, then second arm
    pub fn report_order(a: &Self, b: &Self) -> Ordering {
        b.arm_length
            .cmp(&a.arm_length)
            .then(a.first_arm.cmp(&b.first_arm))
            .then(a.second_arm.cmp(&b.second_arm))
    }
}

impl PartialEq for RepeatRecord {
    fn eq(&self, other: &Self) -> bool {
        self.pair() == other.pair()
    }
}

impl Eq for RepeatRecord {}

impl Hash for RepeatRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pair().hash(state);
    }
}

impl fmt::Display for RepeatRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Len: {}, Arm1: {}, Arm2: {}",
            self.arm_length, self.first_arm, self.second_arm
        )
    }
}

/// Bounded free list of records
///
/// Scans over tens of millions of positions create and drop cached records
/// constantly; released records are handed out again instead of allocating.
#[derive(Debug)]
pub struct RecordPool {
    free: Vec<RepeatRecord>,
    capacity: usize,
    reused: u64,
    allocated: u64,
}

impl Default for RecordPool {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_POOL_CAPACITY)
    }
}

impl RecordPool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            free: Vec::with_capacity(capacity),
            capacity,
            reused: 0,
            allocated: 0,
        }
    }

    /// A record set to the given coordinates, recycled when possible
    pub fn acquire(&mut self, first_arm: usize, second_arm: usize, arm_length: usize) -> RepeatRecord {
        match self.free.pop() {
            Some(mut record) => {
                record.first_arm = first_arm;
                record.second_arm = second_arm;
                record.arm_length = arm_length;
                self.reused += 1;
                record
            }
            None => {
                self.allocated += 1;
                RepeatRecord::new(first_arm, second_arm, arm_length)
            }
        }
    }

    /// Return a record; dropped if the pool is full
    pub fn release(&mut self, record: RepeatRecord) {
        if self.free.len() < self.capacity {
            self.free.push(record);
        }
    }

    /// Records currently available for reuse
    pub fn available(&self) -> usize {
        self.free.len()
    }

    /// `(reused, allocated)` counts since creation
    pub fn counters(&self) -> (u64, u64) {
        (self.reused, self.allocated)
    }
}
