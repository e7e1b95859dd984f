//! Built-in dependency definitions.
//!
//! Common build prerequisites. Callers can redefine any of these by
//! identifier after loading the catalog.

use super::compile::Language;
use super::dependency::{apt_get_install, brew_install, emerge, gem_install, urpmi, yum_install};
use super::registry::DependencyRegistry;

const APPLE_DEV_TOOLS: &str =
    "Please install the Xcode command line tools: xcode-select --install";

/// Register every built-in definition.
pub fn register_builtins(registry: &DependencyRegistry) {
    registry.define("gcc", |dep| {
        dep.name("GNU C compiler")
            .website("http://gcc.gnu.org/")
            .check_for_command("gcc")
            .on("debian", || apt_get_install("build-essential"))
            .on("mandriva", || urpmi("gcc"))
            .on("redhat", || yum_install("gcc"))
            .on("gentoo", || emerge("gcc"))
            .on("macosx", || APPLE_DEV_TOOLS.to_string())
    });

    registry.define("g++", |dep| {
        dep.name("GNU C++ compiler")
            .website("http://gcc.gnu.org/")
            .check_for_command("g++")
            .on("debian", || apt_get_install("build-essential"))
            .on("mandriva", || urpmi("gcc-c++"))
            .on("redhat", || yum_install("gcc-c++"))
            .on("gentoo", || emerge("gcc"))
            .on("macosx", || APPLE_DEV_TOOLS.to_string())
    });

    registry.define("make", |dep| {
        dep.name("The 'make' tool")
            .website("http://www.gnu.org/software/make/")
            .check_for_command("make")
            .on("debian", || apt_get_install("build-essential"))
            .on("mandriva", || urpmi("make"))
            .on("redhat", || yum_install("make"))
            .on("macosx", || APPLE_DEV_TOOLS.to_string())
    });

    registry.define("pkg-config", |dep| {
        dep.name("pkg-config")
            .website("https://www.freedesktop.org/wiki/Software/pkg-config/")
            .check_for_command("pkg-config")
            .on("debian", || apt_get_install("pkg-config"))
            .on("redhat", || yum_install("pkgconfig"))
            .on("gentoo", || emerge("pkgconf"))
            .on("macosx", || brew_install("pkg-config"))
    });

    registry.define("cmake >= 3.10", |dep| {
        dep.name("CMake >= 3.10")
            .website("https://cmake.org/download/")
            .check_command_version("cmake", &["--version"], "3.10")
            .on("debian", || apt_get_install("cmake"))
            .on("redhat", || yum_install("cmake"))
            .on("macosx", || brew_install("cmake"))
    });

    registry.define("zlib", |dep| {
        dep.name("Zlib development headers")
            .website("http://www.zlib.net/")
            .check_for_header("zlib.h", Language::C, None, None)
            .on("debian", || apt_get_install("zlib1g-dev"))
            .on("mandriva", || urpmi("zlib1-devel"))
            .on("redhat", || yum_install("zlib-devel"))
    });

    registry.define("rake-any", |dep| {
        dep.name("Rake")
            .website("http://rake.rubyforge.org/")
            .check_for_command("rake")
            .on("debian", || apt_get_install("rake"))
            .on("mandriva", || urpmi("rake"))
            .on("redhat", || yum_install("rake"))
            .on_other_platforms(|| gem_install("rake"))
    });
}
