//! Command dispatching.
//!
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cache::default_cache_dir;
use crate::cli::args::{Cli, Commands};
use crate::config::{load_config, ProbeConfig};
use crate::depcheck::DependencyRegistry;
use crate::error::Result;
use crate::platform::ProbeRegistry;
use crate::ui::UserInterface;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command, reporting through `ui`.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Apply command-line overrides on top of the loaded config.
///
/// The CLI persists probe results under the user cache directory unless a
/// directory is configured or `--no-cache` is given.
pub fn resolve_config(cli: &Cli) -> Result<ProbeConfig> {
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(dir) = &cli.cache_dir {
        config.cache_dir = Some(dir.clone());
    }
    if config.cache_dir.is_none() {
        config.cache_dir = Some(default_cache_dir());
    }
    if cli.no_cache {
        config.cache_dir = None;
    }
    Ok(config)
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    probes: ProbeRegistry,
    dependencies: DependencyRegistry,
    cache_dir: Option<PathBuf>,
}

impl CommandDispatcher {
    /// Build the registries a config describes.
    pub fn new(config: &ProbeConfig) -> Self {
        let mut probes = ProbeRegistry::new(config.cache_settings());
        if let Some(dir) = &config.tmpdir {
            probes = probes.with_tmpdir(dir);
        }
        Self {
            probes,
            dependencies: DependencyRegistry::with_builtins(),
            cache_dir: config.cache_dir.clone(),
        }
    }

    pub fn probes(&self) -> &ProbeRegistry {
        &self.probes
    }

    pub fn dependencies(&self) -> &DependencyRegistry {
        &self.dependencies
    }

    /// Disk cache directory, or `None` when the disk tier is off.
    pub fn cache_dir(&self) -> Option<&Path> {
        self.cache_dir.as_deref()
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, command: &Commands, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match command {
            Commands::Info(args) => {
                let cmd = super::info::InfoCommand::new(&self.probes, args.clone());
                cmd.execute(ui)
            }
            Commands::Check(args) => {
                let cmd = super::check::CheckCommand::new(
                    &self.probes,
                    &self.dependencies,
                    args.clone(),
                );
                cmd.execute(ui)
            }
            Commands::List(args) => {
                let cmd = super::list::ListCommand::new(&self.dependencies, args.clone());
                cmd.execute(ui)
            }
            Commands::Cache(args) => {
                let cmd = super::cache::CacheCommand::new(self.cache_dir(), args.clone());
                cmd.execute(ui)
            }
        }
    }
}
