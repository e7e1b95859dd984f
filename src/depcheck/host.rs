//! The seam between dependency checks and the machine they inspect.

use std::path::PathBuf;

use super::compile::Language;
use crate::error::Result;

/// Machine facts a dependency check may consult.
///
/// [`ProbeRegistry`](crate::platform::ProbeRegistry) is the production
/// implementation and memoizes everything that can be memoized. Tests
/// substitute fakes.
pub trait Host {
    /// Ordered platform tags, most specific first (e.g. `[ubuntu, debian, linux]`).
    fn platform_tags(&self) -> Vec<String>;

    /// Absolute path of `name` if it is an executable on `PATH`.
    fn find_command(&self, name: &str) -> Option<PathBuf>;

    /// A writable directory whose files may be executed.
    fn temp_executable_dir(&self) -> Result<PathBuf>;

    /// Path of the compiler for `language`, if installed.
    fn compiler(&self, language: Language) -> Option<PathBuf>;

    /// Extra compiler flags from the environment (e.g. `CFLAGS`).
    fn compiler_flags(&self, language: Language) -> Option<String>;
}
