//! Configuration loading.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use platform_probe::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("config.yml");
//! fs::write(&path, "cache_ttl_secs: 120").unwrap();
//!
//! let config = load_config(Some(&path)).unwrap();
//! assert_eq!(config.cache_ttl_secs, 120);
//! assert!(config.memoize);
//! ```
//!
//! # Configuration File Locations
//!
//! 1. The path given with `--config`
//! 2. User config (`~/.config/platform-probe/config.yml`)
//! 3. Built-in defaults

pub mod loader;
pub mod schema;

pub use loader::{find_user_config, load_config, load_config_file, parse_config};
pub use schema::ProbeConfig;
