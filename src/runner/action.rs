//! Running the final action of a flow.

use std::time::Instant;

use crate::aws::{port_forward_command, start_session_command, Outcome, ResilientExecutor};
use crate::config::RunOptions;
use crate::error::{AsmagoError, Result};
use crate::shell::ExternalCommand;
use crate::state::{Action, Shortcut};
use crate::targets::TargetConfig;
use crate::ui::{progress::format_duration, UserInterface};

/// Everything needed to run one action.
#[derive(Debug, Clone)]
pub struct ActionPlan {
    shortcut: Shortcut,
    region: String,
    target: Option<TargetConfig>,
}

impl ActionPlan {
    /// Build a plan. Port forwarding requires a target; a session start
    /// ignores one.
    pub fn new(shortcut: Shortcut, region: impl Into<String>, target: Option<TargetConfig>) -> Result<Self> {
        let target = match shortcut.action {
            Action::SessionStart => None,
            Action::PortForward if target.is_none() => {
                return Err(AsmagoError::no_candidates(format!(
                    "no RDS target given for {}",
                    shortcut.display
                )))
            }
            Action::PortForward => target,
        };
        Ok(Self {
            shortcut,
            region: region.into(),
            target,
        })
    }

    /// The shortcut this plan will record.
    pub fn shortcut(&self) -> &Shortcut {
        &self.shortcut
    }

    /// Region the session runs in.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// The `aws` command for this plan.
    pub fn command(&self) -> ExternalCommand {
        let s = &self.shortcut;
        match &self.target {
            Some(target) => port_forward_command(&s.instance_id, &s.profile, &self.region, target),
            None => start_session_command(&s.instance_id, &s.profile, &self.region),
        }
    }
}

/// How an action ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Nothing ran; the command was printed.
    DryRun,
    /// The session ran and exited cleanly.
    Completed,
    /// The operator ended the session with Ctrl-C.
    Interrupted,
}

impl ActionOutcome {
    /// Whether the action actually ran, so it should be remembered.
    pub fn ran(&self) -> bool {
        !matches!(self, Self::DryRun)
    }
}

/// Run a plan through the executor, or print it under `--dry-run`.
pub fn perform(
    plan: &ActionPlan,
    executor: &ResilientExecutor<'_>,
    options: RunOptions,
    ui: &mut dyn UserInterface,
) -> Result<ActionOutcome> {
    let command = plan.command();

    if options.dry_run {
        ui.message("-- DRY RUN MODE --");
        ui.message("Command to be executed:");
        ui.show_command(&command.to_string());
        return Ok(ActionOutcome::DryRun);
    }

    tracing::debug!("Running {}", command);
    let started = Instant::now();
    let outcome = executor.interactive(&plan.shortcut.profile, &command, ui)?;
    tracing::debug!(
        "{} ended after {}",
        plan.shortcut.action,
        format_duration(started.elapsed())
    );

    Ok(match outcome {
        Outcome::Completed(_) => ActionOutcome::Completed,
        Outcome::Interrupted => ActionOutcome::Interrupted,
    })
}
