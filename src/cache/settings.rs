//! Cache configuration.
//!
//! [`CacheSettings`] is the process-wide context shared by every
//! [`ResultCache`](super::ResultCache). It must be fully configured
//! (cache directory, default TTL) before the first probe runs; only the
//! memoization toggle may change afterwards.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Default lifetime of a disk cache file.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Process-wide cache settings.
#[derive(Debug)]
pub struct CacheSettings {
    memoize: AtomicBool,
    cache_dir: Option<PathBuf>,
    default_ttl: Duration,
}

impl CacheSettings {
    /// Memoization on, no disk tier, one hour TTL.
    pub fn new() -> Self {
        Self {
            memoize: AtomicBool::new(true),
            cache_dir: None,
            default_ttl: DEFAULT_TTL,
        }
    }

    /// Enable the disk tier under `dir`.
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    /// Override the TTL used by probes that persist to disk.
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Set the initial memoization state.
    pub fn with_memoize(self, enabled: bool) -> Self {
        self.set_memoize(enabled);
        self
    }

    /// Whether memoization is currently enabled.
    pub fn memoize_enabled(&self) -> bool {
        self.memoize.load(Ordering::SeqCst)
    }

    /// Toggle memoization for the whole process.
    ///
    /// Disabling does not drop stored values; they become visible again
    /// once memoization is re-enabled.
    pub fn set_memoize(&self, enabled: bool) {
        self.memoize.store(enabled, Ordering::SeqCst);
    }

    /// The configured disk cache directory, if any.
    pub fn cache_dir(&self) -> Option<&Path> {
        self.cache_dir.as_deref()
    }

    /// TTL for disk-persisted probes.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-call caching options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheOptions {
    /// Mirror the value to `<cache_dir>/<key>`.
    pub persist_to_disk: bool,
    /// How long a disk file stays fresh.
    pub ttl: Duration,
}

impl CacheOptions {
    /// Keep the value in memory only.
    pub fn memory_only() -> Self {
        Self {
            persist_to_disk: false,
            ttl: DEFAULT_TTL,
        }
    }

    /// Keep the value in memory and on disk.
    pub fn persistent() -> Self {
        Self {
            persist_to_disk: true,
            ttl: DEFAULT_TTL,
        }
    }

    /// Set the disk TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self::memory_only()
    }
}
