//! In-process library loading probe.

use super::status::CheckOutcome;

/// Check whether the shared library `name` can be loaded into this process.
///
/// The library is opened with `dlopen(RTLD_LAZY)` and immediately closed.
/// Only meaningful for native libraries the dynamic linker can resolve
/// (e.g. `libz.so.1`), not for external tools.
#[cfg(unix)]
pub fn check_loadable_library(name: &str) -> CheckOutcome {
    use std::ffi::CString;

    let Ok(c_name) = CString::new(name) else {
        return CheckOutcome::unavailable_with(format!("invalid library name '{}'", name));
    };

    // SAFETY: c_name is a valid NUL-terminated string; the handle is closed
    // before returning and no symbols from it are used.
    let handle = unsafe { libc::dlopen(c_name.as_ptr(), libc::RTLD_LAZY | libc::RTLD_LOCAL) };
    if handle.is_null() {
        tracing::debug!("dlopen({}) failed", name);
        return CheckOutcome::unavailable();
    }
    // SAFETY: handle was returned non-null by dlopen above.
    unsafe {
        libc::dlclose(handle);
    }
    CheckOutcome::available()
}

#[cfg(not(unix))]
pub fn check_loadable_library(name: &str) -> CheckOutcome {
    CheckOutcome::unknown(format!(
        "Cannot check: loading '{}' in-process is not supported on this platform.",
        name
    ))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn missing_library_is_unavailable() {
        let outcome = check_loadable_library("libdoesnotexist123.so");
        assert!(outcome.is_unavailable());
    }

    #[test]
    fn interior_nul_is_unavailable() {
        let outcome = check_loadable_library("lib\0c.so");
        assert!(outcome.is_unavailable());
        assert!(outcome.detail.unwrap().contains("invalid library name"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn libc_is_loadable() {
        let outcome = check_loadable_library("libc.so.6");
        // musl targets have no libc.so.6; only assert when glibc is present.
        if std::path::Path::new("/lib/x86_64-linux-gnu/libc.so.6").exists() {
            assert!(outcome.is_available());
        }
    }
}
