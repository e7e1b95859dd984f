//! On-disk cache tier.
//!
//! One file per probe key, named by the key verbatim, holding the JSON
//! serialization of the value. Freshness is decided by file mtime alone.
//!
//! Several processes may share a cache directory. Writes go to a unique
//! sibling file that is then renamed over the target, so readers see
//! either the old or the new content; anything unreadable is a miss.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime};

static WRITE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Disk-backed probe cache rooted at a directory.
#[derive(Debug, Clone)]
pub struct DiskCache {
    dir: PathBuf,
}

impl DiskCache {
    /// Create a disk cache rooted at `dir`. Nothing is created yet.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Get the cache directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    /// Read a fresh value for `key`.
    ///
    /// Returns `None` when the file is missing, older than `ttl`, unreadable
    /// or does not deserialize as `T`.
    pub fn read<T: DeserializeOwned>(&self, key: &str, ttl: Duration) -> Option<T> {
        self.read_at(key, ttl, SystemTime::now())
    }

    fn read_at<T: DeserializeOwned>(&self, key: &str, ttl: Duration, now: SystemTime) -> Option<T> {
        let path = self.path_for(key);
        let modified = fs::metadata(&path).and_then(|m| m.modified()).ok()?;

        // An mtime in the future counts as age zero.
        let age = now.duration_since(modified).unwrap_or(Duration::ZERO);
        if age >= ttl {
            tracing::debug!("Disk cache entry {:?} expired ({}s old)", path, age.as_secs());
            return None;
        }

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("Cannot read disk cache entry {:?}: {}", path, e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!("Ignoring malformed disk cache entry {:?}: {}", path, e);
                None
            }
        }
    }

    /// Write `value` for `key`, creating the directory if needed.
    pub fn write<T: Serialize>(&self, key: &str, value: &T) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;

        let json = serde_json::to_string(value).map_err(io::Error::other)?;
        let staging = self.dir.join(format!(
            ".{}.{}.{}.tmp",
            key,
            std::process::id(),
            WRITE_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));

        if let Err(e) = fs::write(&staging, json) {
            let _ = fs::remove_file(&staging);
            return Err(e);
        }
        if let Err(e) = fs::rename(&staging, self.path_for(key)) {
            let _ = fs::remove_file(&staging);
            return Err(e);
        }
        Ok(())
    }

    /// Remove the file for `key`. Returns whether a file was removed.
    pub fn remove(&self, key: &str) -> io::Result<bool> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Remove the files for `keys`, plus any staging files a write of one
    /// of those keys left behind. Returns the number removed.
    ///
    /// Nothing else in the directory is touched; it may be shared with
    /// unrelated files.
    pub fn purge(&self, keys: &[&str]) -> io::Result<usize> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e),
        };

        let mut removed = 0;
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            let owned = keys
                .iter()
                .any(|key| name == *key || is_staging_file(name, key));
            if owned {
                fs::remove_file(entry.path())?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}

/// Whether `name` looks like `.<key>.<pid>.<n>.tmp`, as written by
/// [`DiskCache::write`].
fn is_staging_file(name: &str, key: &str) -> bool {
    let Some(rest) = name
        .strip_prefix('.')
        .and_then(|rest| rest.strip_prefix(key))
        .and_then(|rest| rest.strip_prefix('.'))
        .and_then(|rest| rest.strip_suffix(".tmp"))
    else {
        return false;
    };
    let mut parts = rest.split('.');
    let numeric = |part: Option<&str>| {
        part.is_some_and(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
    };
    numeric(parts.next()) && numeric(parts.next()) && parts.next().is_none()
}
