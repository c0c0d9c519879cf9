//! Shared helpers for the command-line front end
//!
//! - [`progress`] - progress bars with a no-op fallback

pub mod progress;
