//! Order (suffix array) index
//!
//! Provides O(m log n) exact-prefix search over a coded window.
//!
//! ## Architecture
//!
//! - `builder`: Computes the suffix order (comparison sort or SA-IS)
//! - `search`: Range searches, exclusion searches and group enumeration
//! - `types`: Ranges, hits and statistics

pub mod builder;
pub mod search;
pub mod types;

// Re-exports for convenience
pub use builder::{OrderAlgorithm, OrderBuilder, SaisOrderBuilder, SortOrderBuilder};
pub use search::{Pattern, SequenceIndex};
pub use types::{
    CommonSubstring, Hit, IndexStats, Matches, OrderEntry, SearchRange, WINDOW_PADDING,
};
