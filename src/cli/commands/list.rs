//! List command implementation.
//!
//! The `platform-probe list` command lists known dependencies.

use crate::cli::args::ListArgs;
use crate::depcheck::DependencyRegistry;
use crate::error::Result;
use crate::ui::{ProbeTheme, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand<'a> {
    dependencies: &'a DependencyRegistry,
    args: ListArgs,
}

impl<'a> ListCommand<'a> {
    /// Create a new list command.
    pub fn new(dependencies: &'a DependencyRegistry, args: ListArgs) -> Self {
        Self { dependencies, args }
    }
}

impl Command for ListCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let theme = ProbeTheme::new();
        ui.show_header("Dependencies");

        for identifier in self.dependencies.identifiers() {
            let Some(dependency) = self.dependencies.find(&identifier)? else {
                continue;
            };
            let mut line = format!("  {}", theme.highlight.apply_to(&identifier));
            if let Some(name) = dependency.name() {
                line.push_str(&format!(" {}", theme.dim.apply_to(format!("({})", name))));
            }
            ui.message(&line);
            if self.args.verbose {
                if let Some(website) = dependency.website() {
                    ui.message(&format!("    {}", theme.dim.apply_to(website)));
                }
            }
        }

        Ok(CommandResult::success())
    }
}
