//! Compiled-source probes.
//!
//! Checks for a header or library by compiling (and optionally linking) a
//! tiny program against it. The source file and the compiler's output live
//! in the host's temp executable directory and are removed on every exit
//! path, including early returns and panics.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::str::FromStr;

use super::host::Host;
use super::status::CheckOutcome;
use crate::error::{ProbeError, Result};
use crate::platform::tmpexe::scratch_token;

/// Source languages a compile probe can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    C,
    Cxx,
}

impl Language {
    /// Compiler executable looked up on `PATH`.
    pub fn compiler_name(self) -> &'static str {
        match self {
            Language::C => "gcc",
            Language::Cxx => "g++",
        }
    }

    /// Source file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Cxx => "cpp",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::C => f.write_str("c"),
            Language::Cxx => f.write_str("cxx"),
        }
    }
}

impl FromStr for Language {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "c" => Ok(Language::C),
            "cxx" | "c++" | "cpp" => Ok(Language::Cxx),
            _ => Err(ProbeError::UnsupportedLanguage {
                language: s.to_string(),
            }),
        }
    }
}

/// A minimal program to compile, plus the flags to compile it with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledProbe {
    pub source: String,
    pub language: Language,
    pub cflags: Option<String>,
    pub link_flags: Option<String>,
}

impl CompiledProbe {
    /// Probe that compiles `source` with no extra flags.
    pub fn new(source: impl Into<String>, language: Language) -> Self {
        Self {
            source: source.into(),
            language,
            cflags: None,
            link_flags: None,
        }
    }

    /// Probe that includes header `name`.
    pub fn header(name: &str, language: Language) -> Self {
        Self::new(
            format!("#include <{}>\nint main() {{ return 0; }}", name),
            language,
        )
    }

    /// Probe that links against library `name` (`-l<name>`).
    pub fn library(name: &str) -> Self {
        Self::new("int main() { return 0; }", Language::Cxx).with_link_flags(format!("-l{}", name))
    }

    /// Set compiler flags.
    pub fn with_cflags(mut self, flags: impl Into<String>) -> Self {
        self.cflags = Some(flags.into());
        self
    }

    /// Set linker flags.
    pub fn with_link_flags(mut self, flags: impl Into<String>) -> Self {
        self.link_flags = Some(flags.into());
        self
    }

    /// Compile the probe on `host`.
    ///
    /// Returns `Unknown` when the compiler is not installed, `Available`
    /// when it exits successfully and `Unavailable` otherwise. Fails only
    /// when no temp executable directory exists or the source cannot be
    /// written.
    pub fn run(&self, host: &dyn Host) -> Result<CheckOutcome> {
        let dir = host.temp_executable_dir()?;
        let token = scratch_token();
        let source_file = dir.join(format!("depcheck-{}.{}", token, self.language.extension()));
        let output_file = dir.join(format!("depcheck-{}", token));
        let _scratch = ScratchFiles::new(vec![source_file.clone(), output_file.clone()]);

        fs::write(&source_file, format!("{}\n", self.source))?;

        let Some(compiler) = host.compiler(self.language) else {
            return Ok(CheckOutcome::unknown(format!(
                "Cannot check: compiler '{}' not found.",
                self.language.compiler_name()
            )));
        };

        let env_flags = host.compiler_flags(self.language);
        let mut command = self.command(&compiler, env_flags.as_deref(), &source_file, &output_file);

        tracing::debug!("Running compile probe: {:?}", command);

        match command.status() {
            Ok(status) => Ok(CheckOutcome::from_found(status.success())),
            Err(e) => Ok(CheckOutcome::unknown(format!(
                "Cannot check: failed to run compiler '{}': {}",
                compiler.display(),
                e
            ))),
        }
    }

    fn command(
        &self,
        compiler: &Path,
        env_flags: Option<&str>,
        source_file: &Path,
        output_file: &Path,
    ) -> Command {
        let mut command = Command::new(compiler);
        command
            .args(split_flags(env_flags))
            .args(split_flags(self.cflags.as_deref()))
            .arg(source_file)
            .arg("-o")
            .arg(output_file)
            .args(split_flags(self.link_flags.as_deref()))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        command
    }
}

fn split_flags(flags: Option<&str>) -> Vec<&str> {
    flags.map(|f| f.split_whitespace().collect()).unwrap_or_default()
}

/// Files removed when the guard is dropped.
#[derive(Debug)]
pub(crate) struct ScratchFiles {
    paths: Vec<PathBuf>,
}

impl ScratchFiles {
    pub(crate) fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    pub(crate) fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl Drop for ScratchFiles {
    fn drop(&mut self) {
        for path in &self.paths {
            remove_quietly(path);
        }
    }
}

fn remove_quietly(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::debug!("Could not remove scratch file {:?}: {}", path, e);
        }
    }
}
