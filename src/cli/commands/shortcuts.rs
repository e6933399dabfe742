//! `asmago shortcuts`: list the menu the interactive command would show.

use crate::config::AppPaths;
use crate::error::Result;
use crate::state::ShortcutStore;
use crate::ui::{format_relative_time, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The shortcuts command implementation.
pub struct ShortcutsCommand<'a> {
    paths: &'a AppPaths,
}

impl<'a> ShortcutsCommand<'a> {
    /// Create a new shortcuts command.
    pub fn new(paths: &'a AppPaths) -> Self {
        Self { paths }
    }
}

impl Command for ShortcutsCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let store = ShortcutStore::load(&self.paths.data_dir)?;
        let ranked = store.ranked();
        if ranked.is_empty() {
            ui.message("No shortcuts yet. Run `asmago` to create one.");
            return Ok(CommandResult::success());
        }

        ui.show_header("Shortcuts");
        for (i, entry) in ranked.iter().enumerate() {
            let used = match entry.shortcut.last_used_at {
                Some(at) => format!(", last used {}", format_relative_time(at)),
                None => String::new(),
            };
            ui.message(&format!(
                "{}. {} [{}x{}]",
                i + 1,
                entry.label(),
                entry.shortcut.usage_count,
                used
            ));
        }
        Ok(CommandResult::success())
    }
}
