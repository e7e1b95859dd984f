//! Info command implementation.
//!
//! The `platform-probe info` command prints what the probes detect.

use std::path::Path;

use crate::cli::args::InfoArgs;
use crate::error::Result;
use crate::platform::ProbeRegistry;
use crate::ui::{ProbeTheme, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The info command implementation.
pub struct InfoCommand<'a> {
    probes: &'a ProbeRegistry,
    args: InfoArgs,
}

impl<'a> InfoCommand<'a> {
    /// Create a new info command.
    pub fn new(probes: &'a ProbeRegistry, args: InfoArgs) -> Self {
        Self { probes, args }
    }
}

impl Command for InfoCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let summary = self.probes.summary();

        if self.args.json {
            let output = serde_json::to_string_pretty(&summary).map_err(anyhow::Error::from)?;
            ui.message(&output);
            return Ok(CommandResult::success());
        }

        let theme = ProbeTheme::new();
        let row = |label: &str, value: String| {
            format!("  {:<22} {}", theme.key.apply_to(label), value)
        };

        ui.show_header("Platform");
        ui.message(&row("OS:", summary.os_name.clone()));
        ui.message(&row(
            "Architectures:",
            summary.cpu_architectures.join(", "),
        ));
        ui.message(&row("Platform tags:", summary.platform_tags.join(", ")));
        ui.message(&row("Temp dir:", summary.tmpdir.display().to_string()));
        ui.message(&row(
            "Temp executable dir:",
            display_or(summary.temp_executable_dir.as_deref(), "none usable"),
        ));
        ui.message(&row(
            "C compiler:",
            display_or(summary.c_compiler.as_deref(), "not found"),
        ));
        ui.message(&row(
            "C++ compiler:",
            display_or(summary.cxx_compiler.as_deref(), "not found"),
        ));

        Ok(CommandResult::success())
    }
}

fn display_or(path: Option<&Path>, missing: &str) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| missing.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheSettings;
    use crate::ui::MockUI;
    use std::sync::Arc;

    fn probes() -> ProbeRegistry {
        ProbeRegistry::new(Arc::new(CacheSettings::new()))
    }

    #[test]
    fn prints_os_and_tags() {
        let probes = probes();
        let mut ui = MockUI::new();
        let result = InfoCommand::new(&probes, InfoArgs::default())
            .execute(&mut ui)
            .unwrap();
        assert!(result.success);
        assert_eq!(ui.headers(), ["Platform".to_string()]);
        assert!(ui.has_output(probes.os_name().as_str()));
        assert!(ui.has_output("Platform tags:"));
    }

    #[test]
    fn json_output_parses() {
        let probes = probes();
        let mut ui = MockUI::new();
        InfoCommand::new(&probes, InfoArgs { json: true })
            .execute(&mut ui)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        assert_eq!(value["os_name"], probes.os_name().as_str());
        assert!(value["platform_tags"].is_array());
    }
}
