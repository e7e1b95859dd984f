//! Check command implementation.
//!
//! The `platform-probe check` command verifies dependencies and prints
//! install instructions for the missing ones.

use crate::cli::args::CheckArgs;
use crate::depcheck::{CheckStatus, DependencyRegistry};
use crate::error::Result;
use crate::platform::ProbeRegistry;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand<'a> {
    probes: &'a ProbeRegistry,
    dependencies: &'a DependencyRegistry,
    args: CheckArgs,
}

impl<'a> CheckCommand<'a> {
    /// Create a new check command.
    pub fn new(
        probes: &'a ProbeRegistry,
        dependencies: &'a DependencyRegistry,
        args: CheckArgs,
    ) -> Self {
        Self {
            probes,
            dependencies,
            args,
        }
    }
}

impl Command for CheckCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut missing = 0;
        let mut undefined = 0;

        for identifier in &self.args.identifiers {
            let Some(dependency) = self.dependencies.find(identifier)? else {
                ui.error(&format!("Unknown dependency '{}'", identifier));
                undefined += 1;
                continue;
            };

            let outcome = dependency.check(self.probes)?;
            let label = match &outcome.detail {
                Some(detail) => format!("{} ({})", dependency.display_name(), detail),
                None => dependency.display_name().to_string(),
            };

            match outcome.status {
                CheckStatus::Available => ui.success(&label),
                CheckStatus::Unknown => ui.warning(&label),
                CheckStatus::Unavailable => {
                    missing += 1;
                    ui.error(&label);
                    ui.show_hint(&dependency.resolve_install_instructions(self.probes));
                }
            }
        }

        if undefined > 0 {
            Ok(CommandResult::failure(2))
        } else if missing > 0 {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}
