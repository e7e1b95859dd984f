//! Memoized platform probes.

use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use super::{os, path, tmpexe};
use crate::cache::{CacheOptions, CacheSettings, ResultCache};
use crate::depcheck::{Host, Language};
use crate::error::{ProbeError, Result};

/// Keys of the probes that persist their results to the disk cache.
pub const PERSISTED_PROBES: &[&str] = &[
    "cpu_architectures",
    "linux_distro_tags",
    "c_compiler",
    "cxx_compiler",
];

/// Named zero-argument probes of the running machine.
///
/// Every probe without arguments goes through a [`ResultCache`], so the
/// underlying detection runs at most once per process (or not at all
/// when a fresh disk cache file exists). [`find_command`] takes an
/// argument and is recomputed on every call.
///
/// [`find_command`]: ProbeRegistry::find_command
#[derive(Debug)]
pub struct ProbeRegistry {
    cache: ResultCache,
    tmpdir_override: Option<PathBuf>,
}

/// Everything the `info` command reports, gathered in one place.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformSummary {
    pub os_name: String,
    pub cpu_architectures: Vec<String>,
    pub platform_tags: Vec<String>,
    pub tmpdir: PathBuf,
    pub temp_executable_dir: Option<PathBuf>,
    pub c_compiler: Option<PathBuf>,
    pub cxx_compiler: Option<PathBuf>,
}

impl ProbeRegistry {
    /// Create probes backed by a cache bound to `settings`.
    pub fn new(settings: Arc<CacheSettings>) -> Self {
        Self {
            cache: ResultCache::new(settings),
            tmpdir_override: None,
        }
    }

    /// Use `dir` instead of `$TMPDIR` as the first temp directory candidate.
    pub fn with_tmpdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tmpdir_override = Some(dir.into());
        self
    }

    /// The cache every probe goes through.
    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Operating system name, e.g. "linux" or "macosx".
    pub fn os_name(&self) -> Arc<String> {
        self.cache.get_or_compute(
            "os_name",
            &[],
            CacheOptions::memory_only(),
            |_| os::detect_os_name(),
        )
    }

    /// Supported CPU architectures, preferred first. Persisted to disk.
    pub fn cpu_architectures(&self) -> Arc<Vec<String>> {
        let os_name = self.os_name();
        self.cache
            .get_or_compute("cpu_architectures", &[], self.persistent(), |_| {
                os::detect_cpu_architectures(&os_name)
            })
    }

    /// Linux distribution tags, empty elsewhere. Persisted to disk.
    pub fn linux_distro_tags(&self) -> Arc<Vec<String>> {
        let os_name = self.os_name();
        self.cache
            .get_or_compute("linux_distro_tags", &[], self.persistent(), |_| {
                os::detect_linux_distro_tags(&os_name)
            })
    }

    /// Distribution tags followed by the OS family tag.
    pub fn platform_tags(&self) -> Arc<Vec<String>> {
        let os_name = self.os_name();
        let distro = self.linux_distro_tags();
        self.cache.get_or_compute(
            "platform_tags",
            &[],
            CacheOptions::memory_only(),
            |_| os::platform_tags(&os_name, &distro),
        )
    }

    /// The temporary directory: the configured override, else `$TMPDIR`,
    /// else `/tmp`.
    pub fn tmpdir(&self) -> Arc<PathBuf> {
        self.cache
            .get_or_compute("tmpdir", &[], CacheOptions::memory_only(), |_| {
                match &self.tmpdir_override {
                    Some(dir) => dir.clone(),
                    None => tmpexe::tmpdir_from(std::env::var("TMPDIR").ok().as_deref()),
                }
            })
    }

    /// A directory in which temporary executables may be written and run.
    ///
    /// Only a successful result is memoized.
    pub fn temp_executable_dir(&self) -> Result<Arc<PathBuf>> {
        let tmpdir = self.tmpdir();
        self.cache.try_get_or_compute(
            "temp_executable_dir",
            &[],
            CacheOptions::memory_only(),
            |_| {
                let mut candidates = vec![tmpdir.as_ref().clone()];
                if let Ok(cwd) = std::env::current_dir() {
                    candidates.push(cwd);
                }
                tmpexe::find_temp_executable_dir(&candidates)
            },
        )
    }

    /// Path of the compiler for `language`. Persisted to disk.
    pub fn compiler(&self, language: Language) -> Arc<Option<PathBuf>> {
        let key = match language {
            Language::C => "c_compiler",
            Language::Cxx => "cxx_compiler",
        };
        self.cache.get_or_compute(key, &[], self.persistent(), |_| {
            path::find_command(language.compiler_name())
        })
    }

    /// Absolute path of `name` on `PATH`. Never cached.
    pub fn find_command(&self, name: &str) -> Arc<Option<PathBuf>> {
        self.cache.get_or_compute(
            "find_command",
            &[name],
            CacheOptions::memory_only(),
            |args| path::find_command(args[0]),
        )
    }

    /// Run every probe and collect the results.
    pub fn summary(&self) -> PlatformSummary {
        let temp_executable_dir = match self.temp_executable_dir() {
            Ok(dir) => Some(dir.as_ref().clone()),
            Err(e) => {
                tracing::debug!("No temp executable dir: {}", first_line(&e));
                None
            }
        };
        PlatformSummary {
            os_name: self.os_name().as_ref().clone(),
            cpu_architectures: self.cpu_architectures().as_ref().clone(),
            platform_tags: self.platform_tags().as_ref().clone(),
            tmpdir: self.tmpdir().as_ref().clone(),
            temp_executable_dir,
            c_compiler: self.compiler(Language::C).as_ref().clone(),
            cxx_compiler: self.compiler(Language::Cxx).as_ref().clone(),
        }
    }

    fn persistent(&self) -> CacheOptions {
        CacheOptions::persistent().with_ttl(self.cache.settings().default_ttl())
    }
}

fn first_line(e: &ProbeError) -> String {
    e.to_string().lines().next().unwrap_or_default().to_string()
}

impl Host for ProbeRegistry {
    fn platform_tags(&self) -> Vec<String> {
        ProbeRegistry::platform_tags(self).as_ref().clone()
    }

    fn find_command(&self, name: &str) -> Option<PathBuf> {
        ProbeRegistry::find_command(self, name).as_ref().clone()
    }

    fn temp_executable_dir(&self) -> Result<PathBuf> {
        ProbeRegistry::temp_executable_dir(self).map(|dir| dir.as_ref().clone())
    }

    fn compiler(&self, language: Language) -> Option<PathBuf> {
        ProbeRegistry::compiler(self, language).as_ref().clone()
    }

    fn compiler_flags(&self, language: Language) -> Option<String> {
        let cflags = std::env::var("CFLAGS").ok().filter(|f| !f.trim().is_empty());
        match language {
            Language::C => cflags,
            Language::Cxx => {
                let cxxflags = std::env::var("CXXFLAGS")
                    .ok()
                    .filter(|f| !f.trim().is_empty());
                match (cflags, cxxflags) {
                    (Some(c), Some(cxx)) => Some(format!("{} {}", c, cxx)),
                    (c, cxx) => c.or(cxx),
                }
            }
        }
    }
}
