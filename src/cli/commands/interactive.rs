//! The default `asmago` / `asmago interactive` command.

use std::path::PathBuf;

use crate::config::{AppPaths, RunOptions};
use crate::error::Result;
use crate::runner::InteractiveFlow;
use crate::shell::CommandRunner;
use crate::targets::bootstrap;
use crate::ui::UserInterface;

use super::dispatcher::{require_aws, Command, CommandResult};

/// The interactive command implementation.
pub struct InteractiveCommand<'a> {
    runner: &'a dyn CommandRunner,
    paths: &'a AppPaths,
    options: RunOptions,
    template_root: Option<PathBuf>,
}

impl<'a> InteractiveCommand<'a> {
    /// Create a new interactive command.
    pub fn new(runner: &'a dyn CommandRunner, paths: &'a AppPaths, options: RunOptions) -> Self {
        Self {
            runner,
            paths,
            options,
            template_root: None,
        }
    }

    /// Directory searched for a `config/rds.json` template.
    pub fn with_template_root(mut self, root: Option<PathBuf>) -> Self {
        self.template_root = root;
        self
    }
}

impl Command for InteractiveCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        require_aws(self.runner)?;

        if let Some(root) = &self.template_root {
            if let Some(path) = bootstrap(self.paths, root)? {
                ui.message(&format!("Created RDS catalogue at {}", path.display()));
            }
        }

        InteractiveFlow::new(self.runner, self.paths, self.options).run(ui)?;
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AsmagoError;
    use crate::shell::MockRunner;
    use crate::targets::CATALOGUE_FILE;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn fails_without_aws() {
        let temp = TempDir::new().unwrap();
        let paths = AppPaths::under(temp.path());
        let mut runner = MockRunner::new();
        runner.set_missing("aws");
        let mut ui = MockUI::new();

        let err = InteractiveCommand::new(&runner, &paths, RunOptions::default())
            .execute(&mut ui)
            .unwrap_err();
        assert!(matches!(err, AsmagoError::DependencyMissing { .. }));
        assert!(runner.invocations().is_empty());
    }

    #[test]
    fn bootstraps_catalogue_then_runs() {
        let temp = TempDir::new().unwrap();
        let paths = AppPaths::under(temp.path());
        fs::create_dir_all(paths.aws_config.parent().unwrap()).unwrap();
        fs::write(&paths.aws_config, "[profile dev]\n").unwrap();

        let install = temp.path().join("bin");
        fs::create_dir_all(install.join("config")).unwrap();
        fs::write(install.join("config").join(CATALOGUE_FILE), "[]").unwrap();

        let runner = MockRunner::new();
        let mut ui = MockUI::new();

        // No answer to the profile prompt: the flow cancels.
        let result = InteractiveCommand::new(&runner, &paths, RunOptions::default())
            .with_template_root(Some(install))
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert!(paths.config_file(CATALOGUE_FILE).exists());
        assert!(ui.has_message("Created RDS catalogue"));
        assert!(ui.has_message("Process cancelled."));
    }
}
