//! Repeat scanning
//!
//! - `types`: repeat modes and [`ScanConfig`]
//! - `record`: [`RepeatRecord`] and its recycling pool
//! - `scanner`: the per-position search driving the order index

pub mod record;
pub mod scanner;
pub mod types;

pub use record::{RecordPool, RepeatRecord, DEFAULT_POOL_CAPACITY};
pub use scanner::{find_repeats, RepeatScanner};
pub use types::{RepeatMode, ScanConfig, DEFAULT_MINIMUM_LENGTH};
