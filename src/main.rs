//! asmago CLI entry point.

use std::process::ExitCode;

use asmago::cli::{Cli, CommandDispatcher};
use asmago::config::{AppPaths, RunOptions};
use asmago::shell::SystemRunner;
use asmago::ui::{create_ui, OutputMode};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
///
/// Logs go to stderr so they never mix with a printed command.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("asmago=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("asmago=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("asmago starting with args: {:?}", cli);

    let output_mode = OutputMode::from_flags(cli.verbose, cli.quiet);

    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let mut ui = create_ui(true, output_mode);

    let paths = match AppPaths::resolve(cli.data_dir.clone(), cli.config_dir.clone()) {
        Ok(paths) => paths,
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            return ExitCode::from(1);
        }
    };
    tracing::debug!("Using {:?}", paths);

    let options = RunOptions {
        dry_run: cli.dry_run,
    };
    let runner = SystemRunner::new();
    let dispatcher = CommandDispatcher::new(&runner, paths, options);

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
