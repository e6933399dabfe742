//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::PathBuf;

use crate::aws::AWS_PROGRAM;
use crate::cli::args::{Cli, Commands};
use crate::config::{AppPaths, RunOptions};
use crate::error::{AsmagoError, Result};
use crate::shell::CommandRunner;
use crate::ui::UserInterface;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
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
}

/// Fail with [`AsmagoError::DependencyMissing`] unless `aws` is installed.
pub fn require_aws(runner: &dyn CommandRunner) -> Result<()> {
    match runner.locate(AWS_PROGRAM) {
        Some(path) => {
            tracing::debug!("Using {}", path.display());
            Ok(())
        }
        None => Err(AsmagoError::DependencyMissing {
            program: AWS_PROGRAM.to_string(),
            hint: "install the AWS CLI v2 and the Session Manager plugin".to_string(),
        }),
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher<'a> {
    runner: &'a dyn CommandRunner,
    paths: AppPaths,
    options: RunOptions,
}

impl<'a> CommandDispatcher<'a> {
    /// Create a new dispatcher.
    pub fn new(runner: &'a dyn CommandRunner, paths: AppPaths, options: RunOptions) -> Self {
        Self {
            runner,
            paths,
            options,
        }
    }

    /// Resolved file locations.
    pub fn paths(&self) -> &AppPaths {
        &self.paths
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Interactive) | None => {
                let cmd = super::interactive::InteractiveCommand::new(
                    self.runner,
                    &self.paths,
                    self.options,
                )
                .with_template_root(executable_dir());
                cmd.execute(ui)
            }
            Some(Commands::Shortcuts) => {
                let cmd = super::shortcuts::ShortcutsCommand::new(&self.paths);
                cmd.execute(ui)
            }
            Some(Commands::Clean(args)) => {
                let cmd = super::clean::CleanCommand::new(&self.paths, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Refresh(args)) => {
                let cmd =
                    super::refresh::RefreshCommand::new(self.runner, &self.paths, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
        }
    }
}

fn executable_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::MockRunner;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn missing_aws_is_dependency_error() {
        let mut runner = MockRunner::new();
        assert!(require_aws(&runner).is_ok());

        runner.set_missing("aws");
        let err = require_aws(&runner).unwrap_err();
        assert!(matches!(err, AsmagoError::DependencyMissing { ref program, .. } if program == "aws"));
    }
}
