//! Dependency checking.
//!
//! This module answers "is this external tool or library present, and if
//! not, how does the user get it?".
//!
//! # Modules
//!
//! - [`status`] - Tri-state check results
//! - [`host`] - The [`Host`] seam checks use to inspect the machine
//! - [`compile`] - Compiled-source probes for headers and libraries
//! - [`dispatch`] - Platform-tag dispatch tables for install instructions
//! - [`dependency`] - Dependency descriptors and their builder
//! - [`registry`] - Lazily materialized registry of descriptors
//! - [`catalog`] - Built-in definitions
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use platform_probe::cache::CacheSettings;
//! use platform_probe::depcheck::DependencyRegistry;
//! use platform_probe::platform::ProbeRegistry;
//!
//! let probes = ProbeRegistry::new(Arc::new(CacheSettings::new()));
//! let registry = DependencyRegistry::with_builtins();
//!
//! if let Some(gcc) = registry.find("gcc").unwrap() {
//!     let outcome = gcc.check(&probes).unwrap();
//!     if !outcome.is_available() {
//!         println!("{}", gcc.resolve_install_instructions(&probes));
//!     }
//! }
//! ```

pub mod catalog;
pub mod compile;
pub mod dependency;
pub mod dispatch;
pub mod host;
pub mod loadable;
pub mod registry;
pub mod status;
pub mod version;

#[cfg(test)]
pub(crate) mod test_support;

pub use compile::{CompiledProbe, Language};
pub use dependency::{
    apt_get_install, brew_install, emerge, gem_install, urpmi, yum_install, CheckFn, Dependency,
    DependencyBuilder, SEARCH_FALLBACK,
};
pub use dispatch::{DispatchTable, DispatchTag, OTHER_PLATFORMS};
pub use host::Host;
pub use registry::DependencyRegistry;
pub use status::{CheckOutcome, CheckStatus};
