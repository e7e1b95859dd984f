//! In-memory [`Host`] for unit tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::compile::Language;
use super::host::Host;
use crate::error::{ProbeError, Result};

#[derive(Debug, Default)]
pub(crate) struct FakeHost {
    tags: Vec<String>,
    commands: HashMap<String, PathBuf>,
    temp_dir: Option<PathBuf>,
    compilers: HashMap<Language, PathBuf>,
    flags: Option<String>,
}

impl FakeHost {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub(crate) fn with_command(mut self, name: &str, path: impl Into<PathBuf>) -> Self {
        self.commands.insert(name.to_string(), path.into());
        self
    }

    pub(crate) fn with_temp_dir(mut self, dir: &Path) -> Self {
        self.temp_dir = Some(dir.to_path_buf());
        self
    }

    /// Environment compiler flags reported for every language.
    pub(crate) fn with_flags(mut self, flags: &str) -> Self {
        self.flags = Some(flags.to_string());
        self
    }

    pub(crate) fn with_compiler(mut self, language: Language, path: impl Into<PathBuf>) -> Self {
        self.compilers.insert(language, path.into());
        self
    }
}

impl Host for FakeHost {
    fn platform_tags(&self) -> Vec<String> {
        self.tags.clone()
    }

    fn find_command(&self, name: &str) -> Option<PathBuf> {
        self.commands.get(name).cloned()
    }

    fn temp_executable_dir(&self) -> Result<PathBuf> {
        self.temp_dir
            .clone()
            .ok_or(ProbeError::NoExecutableTempDir { attempts: vec![] })
    }

    fn compiler(&self, language: Language) -> Option<PathBuf> {
        self.compilers.get(&language).cloned()
    }

    fn compiler_flags(&self, _language: Language) -> Option<String> {
        self.flags.clone()
    }
}
