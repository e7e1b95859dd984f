//! Error types for probe and dependency-check operations.
//!
//! This module defines [`ProbeError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Environment conditions that make compiled-source probes impossible
//!   (no usable temp directory) are hard failures.
//! - Bugs in a dependency descriptor fail fast with a distinct variant.
//! - A missing dependency is never an error; it is a check result.
//! - Disk cache problems never reach this type at all.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Core error type for probe operations.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// No directory allows writing and executing temporary test binaries.
    #[error("{}", no_exec_dir_message(attempts))]
    NoExecutableTempDir { attempts: Vec<TempDirAttempt> },

    /// A compiled-source probe asked for a language we cannot compile.
    #[error("Unknown language '{language}'")]
    UnsupportedLanguage { language: String },

    /// A dependency descriptor is internally inconsistent.
    #[error("Malformed dependency '{identifier}': {message}")]
    MalformedDescriptor { identifier: String, message: String },

    /// Failed to parse a configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for probe operations.
pub type Result<T> = std::result::Result<T, ProbeError>;

/// One directory tried while looking for a temp executable directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempDirAttempt {
    pub dir: PathBuf,
    pub cause: TempDirFailure,
}

/// Why a candidate temp directory was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TempDirFailure {
    /// The directory does not exist.
    Missing,
    /// We may not create files in it.
    PermissionDenied,
    /// Files can be created but not executed (e.g. `noexec` mount).
    NoExec,
    /// Any other OS-level failure.
    Other(String),
}

impl fmt::Display for TempDirFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TempDirFailure::Missing => write!(f, "This directory doesn't exist."),
            TempDirFailure::PermissionDenied => write!(
                f,
                "This program doesn't have permission to write to this directory."
            ),
            TempDirFailure::NoExec => write!(
                f,
                "This directory's filesystem is mounted with the 'noexec' option."
            ),
            TempDirFailure::Other(message) => write!(f, "{}", message),
        }
    }
}

fn no_exec_dir_message(attempts: &[TempDirAttempt]) -> String {
    let mut message = String::from(
        "In order to run certain tests, this program must be able to write temporary\n\
         executable files to some directory. However no such directory can be found.\n\
         The following directories have been tried:\n\n",
    );
    for attempt in attempts {
        message.push_str(&format!(" * {}\n", attempt.dir.display()));
        message.push_str(&format!("   {}\n", attempt.cause));
    }
    message.push_str(
        "\nYou can solve this problem by telling this program what directory to write\n\
         temporary executable files to.\n\n\
         \x20 Set the $TMPDIR environment variable to the desired directory's filename and\n\
         \x20 re-run this program.\n\n\
         Notes:\n\n\
         \x20* If you're using 'sudo', remember that 'sudo' unsets most environment\n\
         \x20  variables, so you must set the environment variable *after* having gained\n\
         \x20  root privileges.\n\
         \x20* The directory you choose must be writable and must not be mounted with the\n\
         \x20  'noexec' option.",
    );
    message
}
