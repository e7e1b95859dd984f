//! Configuration schema.
//!
//! Maps the YAML configuration file onto [`ProbeConfig`].

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheSettings, DEFAULT_TTL};

/// Root configuration structure for `config.yml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Memoize probe results within the process
    #[serde(default = "default_memoize")]
    pub memoize: bool,

    /// Directory for the on-disk probe cache. The library keeps results in
    /// memory only when unset; the CLI falls back to the user cache directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,

    /// Seconds a disk cache file stays fresh
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// First candidate for temporary executables, instead of `$TMPDIR`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmpdir: Option<PathBuf>,
}

fn default_memoize() -> bool {
    true
}

fn default_cache_ttl_secs() -> u64 {
    DEFAULT_TTL.as_secs()
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            memoize: default_memoize(),
            cache_dir: None,
            cache_ttl_secs: default_cache_ttl_secs(),
            tmpdir: None,
        }
    }
}

impl ProbeConfig {
    /// Build the process-wide cache settings this config describes.
    pub fn cache_settings(&self) -> Arc<CacheSettings> {
        let mut settings = CacheSettings::new()
            .with_memoize(self.memoize)
            .with_default_ttl(Duration::from_secs(self.cache_ttl_secs));
        if let Some(dir) = &self.cache_dir {
            settings = settings.with_cache_dir(dir);
        }
        Arc::new(settings)
    }
}
