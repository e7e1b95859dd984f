//! Integration tests for the result cache public API.

use platform_probe::cache::{CacheOptions, CacheSettings, DiskCache, ResultCache};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn counting_probe(cache: &ResultCache, calls: &AtomicUsize, options: CacheOptions) -> Arc<String> {
    cache.get_or_compute("os_name", &[], options, |_| {
        calls.fetch_add(1, Ordering::SeqCst);
        "linux".to_string()
    })
}

#[test]
fn no_argument_probe_computes_once() {
    let cache = ResultCache::new(Arc::new(CacheSettings::new()));
    let calls = AtomicUsize::new(0);

    let first = counting_probe(&cache, &calls, CacheOptions::memory_only());
    let second = counting_probe(&cache, &calls, CacheOptions::memory_only());

    assert_eq!(first, second);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn argument_probe_recomputes_every_call() {
    let temp = TempDir::new().unwrap();
    let settings = Arc::new(CacheSettings::new().with_cache_dir(temp.path()));
    let cache = ResultCache::new(settings);
    let calls = AtomicUsize::new(0);

    for _ in 0..3 {
        let found = cache.get_or_compute(
            "find_command",
            &["gcc"],
            CacheOptions::persistent(),
            |args| {
                calls.fetch_add(1, Ordering::SeqCst);
                args[0].len()
            },
        );
        assert_eq!(*found, 3);
    }

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert!(!cache.contains("find_command"));
    assert!(!temp.path().join("find_command").exists());
}

#[test]
fn second_process_reuses_fresh_disk_value() {
    let temp = TempDir::new().unwrap();
    let settings = || Arc::new(CacheSettings::new().with_cache_dir(temp.path()));
    let calls = AtomicUsize::new(0);

    let first = ResultCache::new(settings());
    counting_probe(&first, &calls, CacheOptions::persistent());

    let second = ResultCache::new(settings());
    let value = counting_probe(&second, &calls, CacheOptions::persistent());

    assert_eq!(*value, "linux");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn zero_ttl_always_recomputes_across_processes() {
    let temp = TempDir::new().unwrap();
    let settings = || Arc::new(CacheSettings::new().with_cache_dir(temp.path()));
    let calls = AtomicUsize::new(0);
    let options = CacheOptions::persistent().with_ttl(Duration::ZERO);

    counting_probe(&ResultCache::new(settings()), &calls, options);
    counting_probe(&ResultCache::new(settings()), &calls, options);

    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn toggling_memoization_keeps_old_values() {
    let settings = Arc::new(CacheSettings::new());
    let cache = ResultCache::new(Arc::clone(&settings));
    let calls = AtomicUsize::new(0);

    counting_probe(&cache, &calls, CacheOptions::memory_only());
    settings.set_memoize(false);
    counting_probe(&cache, &calls, CacheOptions::memory_only());
    counting_probe(&cache, &calls, CacheOptions::memory_only());
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    settings.set_memoize(true);
    counting_probe(&cache, &calls, CacheOptions::memory_only());
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn purge_removes_persisted_results() {
    let temp = TempDir::new().unwrap();
    let cache = ResultCache::new(Arc::new(CacheSettings::new().with_cache_dir(temp.path())));
    let calls = AtomicUsize::new(0);
    counting_probe(&cache, &calls, CacheOptions::persistent());

    let removed = DiskCache::new(temp.path()).purge(&["os_name"]).unwrap();
    assert_eq!(removed, 1);
    assert!(!temp.path().join("os_name").exists());
}

#[test]
fn purge_keeps_unrelated_files() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join(".bashrc"), "alias ll='ls -l'").unwrap();
    let cache = ResultCache::new(Arc::new(CacheSettings::new().with_cache_dir(temp.path())));
    let calls = AtomicUsize::new(0);
    counting_probe(&cache, &calls, CacheOptions::persistent());

    DiskCache::new(temp.path()).purge(&["os_name"]).unwrap();
    assert!(temp.path().join(".bashrc").exists());
}
