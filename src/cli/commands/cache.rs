//! Cache command implementation.
//!
//! Provides `platform-probe cache clear` and `platform-probe cache path`.

use std::path::{Path, PathBuf};

use crate::cache::DiskCache;
use crate::cli::args::{CacheArgs, CacheSubcommand};
use crate::error::Result;
use crate::platform::PERSISTED_PROBES;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The cache command implementation.
pub struct CacheCommand {
    cache_dir: Option<PathBuf>,
    args: CacheArgs,
}

impl CacheCommand {
    /// Create a new cache command for the given disk cache directory.
    pub fn new(cache_dir: Option<&Path>, args: CacheArgs) -> Self {
        Self {
            cache_dir: cache_dir.map(Path::to_path_buf),
            args,
        }
    }
}

impl Command for CacheCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(dir) = &self.cache_dir else {
            ui.warning("Disk cache is disabled");
            return Ok(CommandResult::success());
        };

        match self.args.command {
            CacheSubcommand::Path => ui.message(&dir.display().to_string()),
            CacheSubcommand::Clear => {
                let removed = DiskCache::new(dir).purge(PERSISTED_PROBES)?;
                ui.success(&format!(
                    "Removed {} cached probe result{}",
                    removed,
                    if removed == 1 { "" } else { "s" }
                ));
            }
        }

        Ok(CommandResult::success())
    }
}
