//! Log Cache Interface
//!
//! The analysis core treats persistence as an opaque best-effort cache for
//! raw log text and viewer settings. This crate defines that seam as a
//! trait plus an in-memory implementation; embedding applications supply
//! their own backend behind the same trait.

mod cache;

pub use cache::{CachedLog, LogCache, MemoryCache, DEFAULT_LOG_CAPACITY};
