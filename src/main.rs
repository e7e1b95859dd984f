//! platform-probe CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use platform_probe::cli::commands::dispatcher::resolve_config;
use platform_probe::cli::{Cli, CommandDispatcher};
use platform_probe::ui::{TerminalUI, UserInterface};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("platform_probe=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("platform_probe=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("platform-probe starting with args: {:?}", cli);

    if cli.no_color {
        console::set_colors_enabled(false);
    }

    let mut ui = TerminalUI::new();

    let result = resolve_config(&cli).and_then(|config| {
        let dispatcher = CommandDispatcher::new(&config);
        dispatcher.dispatch(&cli.command, &mut ui)
    });

    match result {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
