//! Platform capability probing and dependency verification.
//!
//! Answers two questions for build tooling: what platform is this
//! (OS, architectures, distribution, usable temp directory, compilers), and
//! is a given external dependency installed, and if not, how does the
//! user install it here?
//!
//! # Modules
//!
//! - [`cache`] - Memoization of probe results, in memory and on disk
//! - [`platform`] - Platform probes
//! - [`depcheck`] - Dependency descriptors, checks and install instructions
//! - [`config`] - Configuration loading
//! - [`cli`] - Command-line interface and argument parsing
//! - [`ui`] - Terminal output
//! - [`error`] - Error types and result aliases
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use platform_probe::config::ProbeConfig;
//! use platform_probe::depcheck::{CheckOutcome, Dependency};
//! use platform_probe::platform::ProbeRegistry;
//!
//! let config = ProbeConfig::default();
//! let probes = ProbeRegistry::new(config.cache_settings());
//!
//! let dep = Dependency::builder("always")
//!     .checker(|_| Ok(CheckOutcome::available()))
//!     .build()
//!     .unwrap();
//! assert!(dep.check(&probes).unwrap().is_available());
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod depcheck;
pub mod error;
pub mod platform;
pub mod ui;

pub use error::{ProbeError, Result};
