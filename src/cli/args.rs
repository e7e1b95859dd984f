//! CLI argument definitions.
//!
//! The main entry point is the [`Cli`] struct.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Probe the platform and verify build dependencies.
#[derive(Debug, Parser)]
#[command(name = "platform-probe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides ~/.config/platform-probe/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory for the on-disk probe cache
    #[arg(long, global = true, env = "PLATFORM_PROBE_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Neither read nor write the on-disk probe cache
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show detected platform facts
    Info(InfoArgs),

    /// Check whether dependencies are installed
    Check(CheckArgs),

    /// List known dependencies
    List(ListArgs),

    /// Manage the on-disk probe cache
    Cache(CacheArgs),
}

/// Arguments for the `info` command.
#[derive(Debug, Clone, Default, Args)]
pub struct InfoArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    /// Dependency identifiers, e.g. `gcc` or `"cmake >= 3.10"`
    #[arg(required = true)]
    pub identifiers: Vec<String>,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// Show each dependency's website
    #[arg(short, long)]
    pub verbose: bool,
}

/// Arguments for the `cache` command.
#[derive(Debug, Clone, Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheSubcommand,
}

/// Cache subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum CacheSubcommand {
    /// Delete every persisted probe result
    Clear,
    /// Print the cache directory
    Path,
}
