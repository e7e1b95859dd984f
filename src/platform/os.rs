//! Operating system, CPU architecture and Linux distribution detection.
//!
//! These are the raw detection heuristics. They are cheap enough to call
//! directly but are normally reached through the memoized probes in
//! [`ProbeRegistry`](super::ProbeRegistry).

use std::fs;
use std::path::Path;
use std::process::Command;

/// Lowercase, space-free name of the running operating system
/// (e.g. "linux", "macosx", "freebsd").
pub fn detect_os_name() -> String {
    normalize_os_name(std::env::consts::OS)
}

/// Map a Rust target OS name onto the naming used for platform tags.
pub fn normalize_os_name(os: &str) -> String {
    match os {
        "macos" => "macosx".to_string(),
        other => other.to_lowercase().replace(' ', ""),
    }
}

/// List of CPU architectures the machine supports, preferred first.
pub fn detect_cpu_architectures(os_name: &str) -> Vec<String> {
    let reported = if os_name == "macosx" {
        uname("-m")
    } else {
        // `uname -p` is sometimes "unknown" or a marketing string like
        // "Intel(R) Pentium(R) M processor 1400MHz".
        match uname("-p") {
            Some(arch) if arch != "unknown" && !arch.contains(' ') => Some(arch),
            _ => uname("-m"),
        }
    };
    let arch = reported.unwrap_or_else(|| std::env::consts::ARCH.to_string());
    normalize_architectures(&arch)
}

/// Normalize a reported architecture into the ordered list of supported
/// architectures.
///
/// `i386`..`i686` become `x86`; `amd64` becomes `x86_64`, which also implies
/// `x86` as a secondary architecture.
pub fn normalize_architectures(reported: &str) -> Vec<String> {
    let arch = reported.trim();
    let bytes = arch.as_bytes();
    let is_ix86 = bytes.len() == 4 && bytes[0] == b'i' && &bytes[2..] == b"86";

    if is_ix86 || arch == "x86" {
        vec!["x86".to_string()]
    } else if arch == "amd64" || arch == "x86_64" {
        vec!["x86_64".to_string(), "x86".to_string()]
    } else if arch.is_empty() {
        vec![std::env::consts::ARCH.to_string()]
    } else {
        vec![arch.to_string()]
    }
}

fn uname(flag: &str) -> Option<String> {
    let output = Command::new("uname").arg(flag).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Identifier tags for the running Linux distribution.
///
/// The first tag identifies the distribution; later tags name families it
/// is compatible with. Empty when not on Linux or when unrecognized.
pub fn detect_linux_distro_tags(os_name: &str) -> Vec<String> {
    if os_name != "linux" {
        return Vec::new();
    }
    linux_distro_tags_in(Path::new("/"))
}

/// Distribution tags derived from the release files under `root`.
pub fn linux_distro_tags_in(root: &Path) -> Vec<String> {
    let etc = root.join("etc");
    let read = |name: &str| fs::read_to_string(etc.join(name)).unwrap_or_default();

    let tags: &[&str] = if read("lsb-release").contains("Ubuntu") {
        &["ubuntu", "debian"]
    } else if etc.join("debian_version").exists() {
        &["debian"]
    } else if etc.join("redhat-release").exists() {
        let release = read("redhat-release");
        if release.contains("CentOS") {
            &["centos", "redhat"]
        } else if release.contains("Fedora") {
            &["fedora", "redhat"]
        } else if release.contains("Mandriva") {
            &["mandriva", "redhat"]
        } else {
            // Official RHEL: "Red Hat Enterprise Linux Server release 5.1 (Tikanga)"
            &["rhel", "redhat"]
        }
    } else if etc.join("suse-release").exists() {
        &["suse"]
    } else if etc.join("gentoo-release").exists() {
        &["gentoo"]
    } else {
        &[]
    };
    tags.iter().map(|t| t.to_string()).collect()
}

/// Full ordered platform tag list: distribution tags, then the OS family.
pub fn platform_tags(os_name: &str, distro_tags: &[String]) -> Vec<String> {
    let family = if os_name.contains("linux") {
        "linux"
    } else if os_name.contains("freebsd") {
        "freebsd"
    } else if os_name.contains("solaris") {
        "solaris"
    } else {
        os_name
    };

    let mut tags = distro_tags.to_vec();
    if !family.is_empty() && !tags.iter().any(|t| t == family) {
        tags.push(family.to_string());
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn etc_with(files: &[(&str, &str)]) -> TempDir {
        let temp = TempDir::new().unwrap();
        let etc = temp.path().join("etc");
        fs::create_dir_all(&etc).unwrap();
        for (name, content) in files {
            fs::write(etc.join(name), content).unwrap();
        }
        temp
    }

    #[test]
    fn os_name_normalization() {
        assert_eq!(normalize_os_name("macos"), "macosx");
        assert_eq!(normalize_os_name("linux"), "linux");
        assert_eq!(normalize_os_name("FreeBSD"), "freebsd");
    }

    #[test]
    fn detected_os_name_is_lowercase() {
        let name = detect_os_name();
        assert_eq!(name, name.to_lowercase());
        assert!(!name.contains(' '));
    }

    #[test]
    fn ix86_normalizes_to_x86() {
        for arch in ["i386", "i486", "i586", "i686", "x86"] {
            assert_eq!(normalize_architectures(arch), vec!["x86"], "{}", arch);
        }
    }

    #[test]
    fn x86_64_implies_x86() {
        assert_eq!(normalize_architectures("amd64"), vec!["x86_64", "x86"]);
        assert_eq!(normalize_architectures("x86_64\n"), vec!["x86_64", "x86"]);
    }

    #[test]
    fn other_architectures_pass_through() {
        assert_eq!(normalize_architectures("aarch64"), vec!["aarch64"]);
        assert_eq!(normalize_architectures("sparc"), vec!["sparc"]);
    }

    #[test]
    fn detected_architectures_never_empty() {
        let archs = detect_cpu_architectures(&detect_os_name());
        assert!(!archs.is_empty());
        assert!(!archs[0].is_empty());
    }

    #[test]
    fn ubuntu_is_also_debian() {
        let root = etc_with(&[
            ("lsb-release", "DISTRIB_ID=Ubuntu\n"),
            ("debian_version", "bookworm/sid\n"),
        ]);
        assert_eq!(linux_distro_tags_in(root.path()), vec!["ubuntu", "debian"]);
    }

    #[test]
    fn plain_debian() {
        let root = etc_with(&[("debian_version", "12.5\n")]);
        assert_eq!(linux_distro_tags_in(root.path()), vec!["debian"]);
    }

    #[test]
    fn redhat_family() {
        let cases = [
            ("CentOS release 6.4 (Final)", "centos"),
            ("Fedora release 39 (Thirty Nine)", "fedora"),
            ("Mandriva Linux release 2010.0", "mandriva"),
            ("Red Hat Enterprise Linux Server release 5.1 (Tikanga)", "rhel"),
        ];
        for (release, expected) in cases {
            let root = etc_with(&[("redhat-release", release)]);
            assert_eq!(
                linux_distro_tags_in(root.path()),
                vec![expected, "redhat"],
                "{}",
                release
            );
        }
    }

    #[test]
    fn suse_and_gentoo() {
        let suse = etc_with(&[("suse-release", "")]);
        assert_eq!(linux_distro_tags_in(suse.path()), vec!["suse"]);
        let gentoo = etc_with(&[("gentoo-release", "")]);
        assert_eq!(linux_distro_tags_in(gentoo.path()), vec!["gentoo"]);
    }

    #[test]
    fn unknown_distro_is_empty() {
        let root = etc_with(&[]);
        assert!(linux_distro_tags_in(root.path()).is_empty());
    }

    #[test]
    fn non_linux_has_no_distro_tags() {
        assert!(detect_linux_distro_tags("macosx").is_empty());
    }

    #[test]
    fn platform_tags_append_os_family() {
        let distro = vec!["ubuntu".to_string(), "debian".to_string()];
        assert_eq!(
            platform_tags("linux", &distro),
            vec!["ubuntu", "debian", "linux"]
        );
        assert_eq!(platform_tags("macosx", &[]), vec!["macosx"]);
        assert_eq!(platform_tags("freebsd13", &[]), vec!["freebsd"]);
    }
}
