//! Executable lookup on `PATH`.

use std::path::{Component, Path, PathBuf};

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Resolve a command by iterating over the given directories.
///
/// Returns the first match that is a regular file and executable. Does NOT
/// shell out to `which`, whose behavior varies across systems. Names with
/// more than a single plain path component never match.
pub fn resolve_command(name: &str, dirs: &[PathBuf]) -> Option<PathBuf> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => {}
        _ => return None,
    }
    dirs.iter()
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file() && is_executable(candidate))
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Find `name` on the current `PATH`.
pub fn find_command(name: &str) -> Option<PathBuf> {
    resolve_command(name, &parse_system_path())
}
