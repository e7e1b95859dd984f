//! Locating a directory where temporary executables may be run.
//!
//! Compiled-source probes need somewhere to write a test program and run
//! the compiler's output. A directory qualifies only if we can create a
//! file in it and the OS lets that file be executed, which rules out
//! filesystems mounted `noexec`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{ProbeError, Result, TempDirAttempt, TempDirFailure};

static SCRATCH_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Token unique across processes, threads and calls, for scratch file names.
pub(crate) fn scratch_token() -> String {
    let thread: String = format!("{:?}", std::thread::current().id())
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    format!(
        "{}-{}-{}",
        std::process::id(),
        thread,
        SCRATCH_COUNTER.fetch_add(1, Ordering::Relaxed)
    )
}

/// Resolve the temporary directory from a raw `TMPDIR` value.
///
/// Trailing slashes are stripped; an unset or empty value means `/tmp`.
pub fn tmpdir_from(value: Option<&str>) -> PathBuf {
    match value {
        Some(dir) if !dir.is_empty() => {
            let trimmed = dir.trim_end_matches('/');
            if trimmed.is_empty() {
                PathBuf::from("/")
            } else {
                PathBuf::from(trimmed)
            }
        }
        _ => PathBuf::from("/tmp"),
    }
}

/// Return the first candidate directory that allows executing files.
///
/// Fails with [`ProbeError::NoExecutableTempDir`] listing every candidate
/// and why it was rejected.
pub fn find_temp_executable_dir(candidates: &[PathBuf]) -> Result<PathBuf> {
    let mut attempts = Vec::new();
    for dir in candidates {
        match try_dir(dir) {
            Ok(()) => {
                tracing::debug!("Using {:?} for temporary executables", dir);
                return Ok(dir.clone());
            }
            Err(cause) => {
                tracing::debug!("Rejected {:?} for temporary executables: {}", dir, cause);
                attempts.push(TempDirAttempt {
                    dir: dir.clone(),
                    cause,
                });
            }
        }
    }
    Err(ProbeError::NoExecutableTempDir { attempts })
}

fn try_dir(dir: &Path) -> std::result::Result<(), TempDirFailure> {
    let test_file = dir.join(format!("test-exe.{}", scratch_token()));
    let result = create_executable(&test_file);
    let _ = fs::remove_file(&test_file);
    result
}

fn create_executable(path: &Path) -> std::result::Result<(), TempDirFailure> {
    fs::File::create(path).map_err(classify)?;
    make_owner_executable(path).map_err(classify)?;
    if can_execute(path) {
        Ok(())
    } else {
        Err(TempDirFailure::NoExec)
    }
}

fn classify(e: io::Error) -> TempDirFailure {
    match e.kind() {
        io::ErrorKind::NotFound => TempDirFailure::Missing,
        io::ErrorKind::PermissionDenied => TempDirFailure::PermissionDenied,
        _ => TempDirFailure::Other(e.to_string()),
    }
}

#[cfg(unix)]
fn make_owner_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o700))
}

#[cfg(not(unix))]
fn make_owner_executable(_path: &Path) -> io::Result<()> {
    Ok(())
}

/// Ask the kernel whether `path` may be executed. Unlike checking mode
/// bits, `access(2)` also reports `noexec` mounts.
#[cfg(unix)]
fn can_execute(path: &Path) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    // SAFETY: c_path is a valid NUL-terminated string for the duration of the call.
    unsafe { libc::access(c_path.as_ptr(), libc::X_OK) == 0 }
}

#[cfg(not(unix))]
fn can_execute(_path: &Path) -> bool {
    true
}
