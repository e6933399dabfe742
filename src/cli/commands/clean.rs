//! `asmago clean`: forget every shortcut and usage counter.

use std::fs;

use crate::cli::args::CleanArgs;
use crate::config::AppPaths;
use crate::error::Result;
use crate::ui::{Prompt, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The clean command implementation.
pub struct CleanCommand<'a> {
    paths: &'a AppPaths,
    args: CleanArgs,
}

impl<'a> CleanCommand<'a> {
    /// Create a new clean command.
    pub fn new(paths: &'a AppPaths, args: CleanArgs) -> Self {
        Self { paths, args }
    }
}

impl Command for CleanCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let dir = &self.paths.data_dir;
        if !dir.exists() {
            ui.message("Data directory not found, nothing to clean.");
            return Ok(CommandResult::success());
        }

        if !self.args.force {
            let prompt = Prompt::confirm(
                "confirm_clean",
                &format!("Delete all asmago data in {}?", dir.display()),
                false,
            );
            if ui.prompt(&prompt)?.as_bool() != Some(true) {
                ui.message("Process aborted by user.");
                return Ok(CommandResult::success());
            }
        }

        fs::remove_dir_all(dir)?;
        tracing::debug!("Removed {}", dir.display());
        ui.success(&format!("Removed {}", dir.display()));
        Ok(CommandResult::success())
    }
}
