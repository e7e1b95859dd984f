//! Probe result caching.
//!
//! This module provides the memoization layer every probe goes through:
//! an in-memory tier that lives for the process, plus an optional
//! disk tier with mtime-based expiry so results can be reused by a later
//! process invocation.
//!
//! # Modules
//!
//! - [`settings`] - Process-wide cache configuration and per-call options
//! - [`entry`] - Stored in-memory entries
//! - [`disk`] - Best-effort on-disk tier
//! - [`memo`] - The [`ResultCache`] itself

pub mod disk;
pub mod entry;
pub mod memo;
pub mod settings;

pub use disk::DiskCache;
pub use entry::CacheEntry;
pub use memo::ResultCache;
pub use settings::{CacheOptions, CacheSettings, DEFAULT_TTL};

/// Get the default on-disk cache directory.
pub fn default_cache_dir() -> std::path::PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("platform-probe")
        .join("probes")
}
