//! Memoizing result cache.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, Mutex, MutexGuard};

use super::disk::DiskCache;
use super::entry::CacheEntry;
use super::settings::{CacheOptions, CacheSettings};

/// Memoizes probe results per key.
///
/// A probe called without arguments is computed once per process (or
/// loaded from a fresh disk file) and the frozen result is returned on
/// every later call. A probe called with arguments is never cached.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use platform_probe::cache::{CacheOptions, CacheSettings, ResultCache};
///
/// let cache = ResultCache::new(Arc::new(CacheSettings::new()));
/// let first = cache.get_or_compute("answer", &[], CacheOptions::memory_only(), |_| 42u32);
/// let second = cache.get_or_compute("answer", &[], CacheOptions::memory_only(), |_| 7u32);
/// assert_eq!(*first, 42);
/// assert_eq!(*second, 42);
/// ```
#[derive(Debug)]
pub struct ResultCache {
    settings: Arc<CacheSettings>,
    memory: Mutex<HashMap<String, CacheEntry>>,
}

impl ResultCache {
    /// Create a cache bound to the given settings.
    pub fn new(settings: Arc<CacheSettings>) -> Self {
        Self {
            settings,
            memory: Mutex::new(HashMap::new()),
        }
    }

    /// Get the shared settings.
    pub fn settings(&self) -> &Arc<CacheSettings> {
        &self.settings
    }

    /// Return the memoized value for `key`, computing it if needed.
    pub fn get_or_compute<T, F>(
        &self,
        key: &str,
        args: &[&str],
        options: CacheOptions,
        compute: F,
    ) -> Arc<T>
    where
        T: Serialize + DeserializeOwned + Send + Sync + 'static,
        F: FnOnce(&[&str]) -> T,
    {
        match self.try_get_or_compute(key, args, options, |args| {
            Ok::<T, Infallible>(compute(args))
        }) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Fallible variant of [`get_or_compute`](Self::get_or_compute).
    ///
    /// Errors are returned to the caller and never cached, so a later call
    /// retries the computation.
    pub fn try_get_or_compute<T, E, F>(
        &self,
        key: &str,
        args: &[&str],
        options: CacheOptions,
        compute: F,
    ) -> Result<Arc<T>, E>
    where
        T: Serialize + DeserializeOwned + Send + Sync + 'static,
        F: FnOnce(&[&str]) -> Result<T, E>,
    {
        if !args.is_empty() {
            tracing::trace!("Probe {} called with arguments, bypassing cache", key);
            return compute(args).map(Arc::new);
        }
        if !self.settings.memoize_enabled() {
            tracing::trace!("Memoization disabled, computing {}", key);
            return compute(args).map(Arc::new);
        }

        if let Some(hit) = self.lookup::<T>(key) {
            return Ok(hit);
        }

        let disk = if options.persist_to_disk {
            self.settings.cache_dir().map(DiskCache::new)
        } else {
            None
        };

        if let Some(disk) = &disk {
            if let Some(value) = disk.read::<T>(key, options.ttl) {
                tracing::debug!("Loaded probe {} from disk cache", key);
                return Ok(self.store(key, value));
            }
        }

        let value = compute(args)?;
        tracing::debug!("Computed probe {}", key);

        if let Some(disk) = &disk {
            if let Err(e) = disk.write(key, &value) {
                tracing::debug!("Could not persist probe {} to {:?}: {}", key, disk.dir(), e);
            }
        }

        Ok(self.store(key, value))
    }

    /// Whether a value for `key` is held in memory.
    pub fn contains(&self, key: &str) -> bool {
        self.memory().contains_key(key)
    }

    /// Get the stored entry for `key`, if any.
    pub fn entry(&self, key: &str) -> Option<CacheEntry> {
        self.memory().get(key).cloned()
    }

    /// Keys currently held in memory, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.memory().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Drop every in-memory value. Disk files are left alone.
    pub fn clear_memory(&self) {
        self.memory().clear();
    }

    fn lookup<T>(&self, key: &str) -> Option<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        let memory = self.memory();
        let entry = memory.get(key)?;
        let value = entry.value::<T>();
        if value.is_none() {
            tracing::debug!("Probe {} cached with a different type, recomputing", key);
        }
        value
    }

    fn store<T>(&self, key: &str, value: T) -> Arc<T>
    where
        T: Send + Sync + 'static,
    {
        let value = Arc::new(value);
        self.memory().insert(
            key.to_string(),
            CacheEntry::new(key, Arc::clone(&value)),
        );
        value
    }

    fn memory(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.memory.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::fs;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    fn memory_cache() -> ResultCache {
        ResultCache::new(Arc::new(CacheSettings::new()))
    }

    fn disk_cache(dir: &std::path::Path) -> ResultCache {
        ResultCache::new(Arc::new(CacheSettings::new().with_cache_dir(dir)))
    }

    #[test]
    fn computes_once_without_arguments() {
        let cache = memory_cache();
        let calls = Cell::new(0);
        let compute = |_: &[&str]| {
            calls.set(calls.get() + 1);
            "linux".to_string()
        };

        let first = cache.get_or_compute("os_name", &[], CacheOptions::memory_only(), compute);
        let second = cache.get_or_compute("os_name", &[], CacheOptions::memory_only(), compute);

        assert_eq!(first, second);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn arguments_bypass_cache() {
        let temp = TempDir::new().unwrap();
        let cache = disk_cache(temp.path());
        let calls = Cell::new(0);
        let compute = |args: &[&str]| {
            calls.set(calls.get() + 1);
            format!("/usr/bin/{}", args[0])
        };

        let a = cache.get_or_compute("find_command", &["gcc"], CacheOptions::persistent(), compute);
        let b = cache.get_or_compute("find_command", &["gcc"], CacheOptions::persistent(), compute);

        assert_eq!(*a, "/usr/bin/gcc");
        assert_eq!(*b, "/usr/bin/gcc");
        assert_eq!(calls.get(), 2);
        assert!(!cache.contains("find_command"));
        assert!(!temp.path().join("find_command").exists());
    }

    #[test]
    fn arguments_do_not_see_memoized_value() {
        let cache = memory_cache();
        cache.get_or_compute("tmpdir", &[], CacheOptions::memory_only(), |_| "/tmp".to_string());
        let with_args = cache.get_or_compute("tmpdir", &["x"], CacheOptions::memory_only(), |_| {
            "/other".to_string()
        });
        assert_eq!(*with_args, "/other");
    }

    #[test]
    fn disabled_memoization_recomputes_and_keeps_old_values() {
        let cache = memory_cache();
        let calls = Cell::new(0);
        let compute = |_: &[&str]| {
            calls.set(calls.get() + 1);
            calls.get()
        };

        assert_eq!(*cache.get_or_compute("n", &[], CacheOptions::memory_only(), compute), 1);

        cache.settings().set_memoize(false);
        assert_eq!(*cache.get_or_compute("n", &[], CacheOptions::memory_only(), compute), 2);
        assert_eq!(*cache.get_or_compute("n", &[], CacheOptions::memory_only(), compute), 3);

        cache.settings().set_memoize(true);
        assert_eq!(*cache.get_or_compute("n", &[], CacheOptions::memory_only(), compute), 1);
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn disabled_memoization_skips_disk() {
        let temp = TempDir::new().unwrap();
        let cache = disk_cache(temp.path());
        cache.settings().set_memoize(false);

        cache.get_or_compute("os_name", &[], CacheOptions::persistent(), |_| "linux".to_string());
        assert!(!temp.path().join("os_name").exists());
    }

    #[test]
    fn persistent_probe_writes_disk_file() {
        let temp = TempDir::new().unwrap();
        let cache = disk_cache(temp.path());

        cache.get_or_compute("cpu_architectures", &[], CacheOptions::persistent(), |_| {
            vec!["x86_64".to_string(), "x86".to_string()]
        });

        let content = fs::read_to_string(temp.path().join("cpu_architectures")).unwrap();
        assert_eq!(content, r#"["x86_64","x86"]"#);
    }

    #[test]
    fn memory_only_probe_never_touches_disk() {
        let temp = TempDir::new().unwrap();
        let cache = disk_cache(temp.path());

        cache.get_or_compute("os_name", &[], CacheOptions::memory_only(), |_| "linux".to_string());
        assert!(!temp.path().join("os_name").exists());
    }

    #[test]
    fn fresh_disk_file_is_reused_by_new_process() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("os_name"), r#""freebsd""#).unwrap();

        let cache = disk_cache(temp.path());
        let value = cache.get_or_compute::<String, _>(
            "os_name",
            &[],
            CacheOptions::persistent(),
            |_| panic!("should load from disk"),
        );
        assert_eq!(*value, "freebsd");
    }

    #[test]
    fn stale_disk_file_is_recomputed_and_overwritten() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("os_name");
        fs::write(&path, r#""freebsd""#).unwrap();
        let ttl = Duration::from_secs(3600);
        let stale = SystemTime::now() - ttl - Duration::from_secs(1);
        fs::File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(stale)
            .unwrap();

        let cache = disk_cache(temp.path());
        let value = cache.get_or_compute(
            "os_name",
            &[],
            CacheOptions::persistent().with_ttl(ttl),
            |_| "linux".to_string(),
        );

        assert_eq!(*value, "linux");
        assert_eq!(fs::read_to_string(&path).unwrap(), r#""linux""#);
    }

    #[test]
    fn nearly_stale_disk_file_is_still_used() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("os_name");
        fs::write(&path, r#""freebsd""#).unwrap();
        let ttl = Duration::from_secs(3600);
        let almost = SystemTime::now() - ttl + Duration::from_secs(60);
        fs::File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(almost)
            .unwrap();

        let cache = disk_cache(temp.path());
        let value = cache.get_or_compute(
            "os_name",
            &[],
            CacheOptions::persistent().with_ttl(ttl),
            |_| "linux".to_string(),
        );
        assert_eq!(*value, "freebsd");
    }

    #[test]
    fn corrupt_disk_file_is_a_miss() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("os_name"), "\"unterminated").unwrap();

        let cache = disk_cache(temp.path());
        let value =
            cache.get_or_compute("os_name", &[], CacheOptions::persistent(), |_| "linux".to_string());
        assert_eq!(*value, "linux");
    }

    #[test]
    fn unwritable_cache_dir_is_not_fatal() {
        let temp = TempDir::new().unwrap();
        // A regular file where the directory should be makes every write fail.
        let blocker = temp.path().join("blocked");
        fs::write(&blocker, "").unwrap();

        let cache = disk_cache(&blocker);
        let value =
            cache.get_or_compute("os_name", &[], CacheOptions::persistent(), |_| "linux".to_string());
        assert_eq!(*value, "linux");
        assert!(cache.contains("os_name"));
    }

    #[test]
    fn errors_are_not_cached() {
        let cache = memory_cache();
        let first: Result<Arc<String>, &str> =
            cache.try_get_or_compute("tmpexedir", &[], CacheOptions::memory_only(), |_| Err("nope"));
        assert!(first.is_err());
        assert!(!cache.contains("tmpexedir"));

        let second: Result<Arc<String>, &str> = cache
            .try_get_or_compute("tmpexedir", &[], CacheOptions::memory_only(), |_| {
                Ok("/tmp".to_string())
            });
        assert_eq!(second.unwrap().as_str(), "/tmp");
    }

    #[test]
    fn entry_records_computation_time() {
        let cache = memory_cache();
        cache.get_or_compute("os_name", &[], CacheOptions::memory_only(), |_| "linux".to_string());
        let entry = cache.entry("os_name").unwrap();
        assert_eq!(entry.key, "os_name");
        assert!(entry.age().num_seconds() < 5);
        assert_eq!(cache.keys(), vec!["os_name".to_string()]);
    }

    #[test]
    fn clear_memory_forces_recompute() {
        let cache = memory_cache();
        cache.get_or_compute("n", &[], CacheOptions::memory_only(), |_| 1u8);
        cache.clear_memory();
        let value = cache.get_or_compute("n", &[], CacheOptions::memory_only(), |_| 2u8);
        assert_eq!(*value, 2);
    }
}
