//! The interactive selection flow.
//!
//! A run starts at the shortcut menu. Picking a shortcut replays it;
//! picking the manual entry (or having no shortcuts) walks
//! profile → region → instance → action, plus the database target for port
//! forwarding. Either way the resulting action runs through the
//! [`ResilientExecutor`] and, once it has run, is remembered as a shortcut.

use crate::aws::{
    list_running_command, parse_instances, Instance, Outcome, ProfileConfig,
    ReauthenticationController, ResilientExecutor,
};
use crate::config::{AppPaths, RunOptions};
use crate::error::{AsmagoError, Result};
use crate::shell::CommandRunner;
use crate::state::{rank_by_count, Action, Shortcut, ShortcutStore, UsageKind, UsageLedger};
use crate::targets::{
    environment_for_instance, filter_by_access, filter_by_environment, rank_targets, target_label,
    AccessType, Catalogue, TargetConfig,
};
use crate::ui::{Prompt, PromptOption, UserInterface};

use super::action::{perform, ActionOutcome, ActionPlan};
use super::report_persistence_failure;

/// Region offered when a profile has none configured.
pub const DEFAULT_REGION: &str = "ap-southeast-1";

/// Menu entry that skips the shortcuts.
pub const MANUAL_FLOW_LABEL: &str = "[ --- Run Manual Flow --- ]";

const MANUAL_FLOW_VALUE: &str = "manual";

/// Prompt keys, stable for tests and `ASMAGO_PROMPT_*` overrides.
pub mod keys {
    pub const SHORTCUT: &str = "shortcut";
    pub const PROFILE: &str = "profile";
    pub const REGION: &str = "region";
    pub const INSTANCE: &str = "instance";
    pub const ACTION: &str = "action";
    pub const TARGET_TYPE: &str = "target_type";
    pub const TARGET: &str = "target";
}

/// How a flow ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowOutcome {
    /// The operator backed out of a prompt.
    Cancelled,
    /// An action was chosen and performed (or printed).
    Performed(ActionOutcome),
}

/// Drives one interactive run.
pub struct InteractiveFlow<'a> {
    runner: &'a dyn CommandRunner,
    paths: &'a AppPaths,
    options: RunOptions,
}

impl<'a> InteractiveFlow<'a> {
    /// Create a flow.
    pub fn new(runner: &'a dyn CommandRunner, paths: &'a AppPaths, options: RunOptions) -> Self {
        Self {
            runner,
            paths,
            options,
        }
    }

    /// Run the flow to completion.
    pub fn run(&self, ui: &mut dyn UserInterface) -> Result<FlowOutcome> {
        let config = ProfileConfig::new(self.runner, &self.paths.aws_config);
        let reauth = ReauthenticationController::new(self.runner, &config);
        let executor = ResilientExecutor::new(self.runner, &reauth);
        let mut shortcuts = ShortcutStore::load(&self.paths.data_dir)?;
        let mut ledger = UsageLedger::new(&self.paths.data_dir);

        let steps = Steps {
            runner: self.runner,
            config: &config,
            executor: &executor,
            paths: self.paths,
            options: self.options,
        };

        let (plan, from_shortcut) = match steps.choose_shortcut(&shortcuts, ui)? {
            Choice::Picked(shortcut) => match steps.replay(shortcut, ui)? {
                Some(plan) => (plan, true),
                None => return Ok(cancelled(ui)),
            },
            Choice::Manual => match steps.manual(&mut ledger, ui)? {
                Some(plan) => (plan, false),
                None => return Ok(cancelled(ui)),
            },
            Choice::Cancelled => return Ok(cancelled(ui)),
        };

        let outcome = perform(&plan, &executor, self.options, ui)?;
        if outcome.ran() {
            if let Err(e) = shortcuts.record_usage(plan.shortcut().clone()) {
                report_persistence_failure(ui, "shortcut", &e);
            }
            if from_shortcut {
                ui.success("Shortcut executed successfully.");
            }
        }
        Ok(FlowOutcome::Performed(outcome))
    }
}

fn cancelled(ui: &mut dyn UserInterface) -> FlowOutcome {
    ui.message("Process cancelled.");
    FlowOutcome::Cancelled
}

enum Choice<T> {
    Picked(T),
    Manual,
    Cancelled,
}

/// Collaborators shared by the individual selection steps.
struct Steps<'f> {
    runner: &'f dyn CommandRunner,
    config: &'f ProfileConfig<'f>,
    executor: &'f ResilientExecutor<'f>,
    paths: &'f AppPaths,
    options: RunOptions,
}

impl Steps<'_> {
    fn choose_shortcut(
        &self,
        store: &ShortcutStore,
        ui: &mut dyn UserInterface,
    ) -> Result<Choice<Shortcut>> {
        let ranked = store.ranked();
        if ranked.is_empty() {
            tracing::debug!("No shortcuts yet; starting manual flow");
            return Ok(Choice::Manual);
        }

        let mut options: Vec<PromptOption> = ranked
            .iter()
            .enumerate()
            .map(|(i, entry)| PromptOption::new(entry.label(), i.to_string()))
            .collect();
        options.push(PromptOption::new(MANUAL_FLOW_LABEL, MANUAL_FLOW_VALUE));

        let prompt = Prompt::select(keys::SHORTCUT, "Select a shortcut", options);
        let Some(value) = ui.prompt(&prompt)?.into_value() else {
            return Ok(Choice::Cancelled);
        };
        if value == MANUAL_FLOW_VALUE {
            return Ok(Choice::Manual);
        }

        Ok(value
            .parse::<usize>()
            .ok()
            .and_then(|i| ranked.get(i))
            .map_or(Choice::Cancelled, |entry| {
                Choice::Picked(entry.shortcut.clone())
            }))
    }

    /// Turn a stored shortcut back into a plan.
    fn replay(&self, shortcut: Shortcut, ui: &mut dyn UserInterface) -> Result<Option<ActionPlan>> {
        tracing::debug!("Replaying shortcut: {}", shortcut.display);
        let Some(region) = self.region_for(&shortcut.profile, ui)? else {
            return Ok(None);
        };

        let target = match &shortcut.target {
            Some(id) => {
                let catalogue = Catalogue::load(self.paths)?;
                let target = catalogue.find(id).cloned().ok_or_else(|| {
                    AsmagoError::no_candidates(format!(
                        "RDS configuration '{}' is no longer in the catalogue",
                        id
                    ))
                })?;
                Some(target)
            }
            None => None,
        };

        ActionPlan::new(shortcut, region, target).map(Some)
    }

    /// Walk the full selection flow.
    fn manual(
        &self,
        ledger: &mut UsageLedger,
        ui: &mut dyn UserInterface,
    ) -> Result<Option<ActionPlan>> {
        let Some(profile) = self.select_profile(ui)? else {
            return Ok(None);
        };
        let Some(region) = self.region_for(&profile, ui)? else {
            return Ok(None);
        };
        let Some(instance) = self.select_instance(&profile, &region, ledger, ui)? else {
            return Ok(None);
        };
        let Some(action) = select_action(ui)? else {
            return Ok(None);
        };

        let target = match action {
            Action::SessionStart => None,
            Action::PortForward => match self.select_target(&instance, ledger, ui)? {
                Some(target) => Some(target),
                None => return Ok(None),
            },
        };

        let shortcut = Shortcut::new(
            &profile,
            &instance.id,
            instance.display_name(),
            action,
            target.as_ref().map(TargetConfig::id),
        );
        ActionPlan::new(shortcut, region, target).map(Some)
    }

    fn select_profile(&self, ui: &mut dyn UserInterface) -> Result<Option<String>> {
        let profiles = self.config.profiles()?;
        if profiles.is_empty() {
            return Err(AsmagoError::no_candidates(format!(
                "no AWS profiles found in {}",
                self.config.config_file().display()
            )));
        }

        let options = profiles
            .into_iter()
            .map(|p| PromptOption::new(p.clone(), p))
            .collect();
        let prompt = Prompt::search(keys::PROFILE, "Select AWS profile", options);
        Ok(ui.prompt(&prompt)?.into_value())
    }

    /// The profile's configured region, or one asked of the operator.
    fn region_for(&self, profile: &str, ui: &mut dyn UserInterface) -> Result<Option<String>> {
        if let Some(region) = self.config.region(profile)? {
            return Ok(Some(region));
        }

        ui.warning(&format!("No region configured for profile '{}'.", profile));
        let prompt = Prompt::input(keys::REGION, "Enter AWS region", Some(DEFAULT_REGION));
        Ok(ui
            .prompt(&prompt)?
            .into_value()
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty()))
    }

    fn select_instance(
        &self,
        profile: &str,
        region: &str,
        ledger: &mut UsageLedger,
        ui: &mut dyn UserInterface,
    ) -> Result<Option<Instance>> {
        let command = list_running_command(profile, region);
        let outcome = self.executor.execute(profile, &command, ui, |cmd, ui| {
            let mut spinner = ui.start_spinner("Fetching running instances...");
            let result = self.runner.capture(cmd);
            spinner.finish_clear();
            result
        })?;
        let Outcome::Completed(result) = outcome else {
            return Ok(None);
        };

        let mut instances = parse_instances(&result.stdout)?;
        if instances.is_empty() {
            return Err(AsmagoError::no_candidates(format!(
                "no running instances found for profile '{}' in {}",
                profile, region
            )));
        }

        {
            let usage = ledger.table(UsageKind::Instance)?;
            rank_by_count(&mut instances, |i| usage.count(&i.id));
        }

        let options = instances
            .iter()
            .map(|i| PromptOption::new(i.label(), i.id.clone()))
            .collect();
        let prompt = Prompt::search(keys::INSTANCE, "Select EC2 instance", options);
        let Some(id) = ui.prompt(&prompt)?.into_value() else {
            return Ok(None);
        };
        let Some(instance) = instances.into_iter().find(|i| i.id == id) else {
            return Ok(None);
        };

        if !self.options.dry_run {
            if let Err(e) = ledger.record(UsageKind::Instance, &instance.id) {
                report_persistence_failure(ui, "instance usage", &e);
            }
        }
        Ok(Some(instance))
    }

    fn select_target(
        &self,
        instance: &Instance,
        ledger: &mut UsageLedger,
        ui: &mut dyn UserInterface,
    ) -> Result<Option<TargetConfig>> {
        let catalogue = Catalogue::load(self.paths)?;
        let env = environment_for_instance(instance.name_tag());
        tracing::debug!("Environment filter for {}: {:?}", instance.id, env);
        let stage = filter_by_environment(catalogue.targets(), env)?;

        let access_options = AccessType::ALL
            .iter()
            .map(|a| PromptOption::new(a.as_str(), a.as_str()))
            .collect();
        let prompt = Prompt::select(keys::TARGET_TYPE, "Select connection type", access_options);
        let Some(access) = ui.prompt(&prompt)?.into_value() else {
            return Ok(None);
        };
        let Ok(access) = access.parse::<AccessType>() else {
            return Ok(None);
        };
        let stage = filter_by_access(&stage, access)?;

        let ranked = {
            let usage = ledger.table(UsageKind::Target)?;
            rank_targets(stage, usage)
        };

        let options = ranked
            .iter()
            .enumerate()
            .map(|(i, t)| {
                let label = if env.is_some() {
                    t.key.clone()
                } else {
                    target_label(t)
                };
                PromptOption::new(label, i.to_string())
            })
            .collect();
        let prompt = Prompt::search(keys::TARGET, "Select RDS", options);
        let Some(index) = ui.prompt(&prompt)?.into_value() else {
            return Ok(None);
        };
        let Some(target) = index
            .parse::<usize>()
            .ok()
            .and_then(|i| ranked.get(i))
            .map(|t| (*t).clone())
        else {
            return Ok(None);
        };

        if !self.options.dry_run {
            if let Err(e) = ledger.record(UsageKind::Target, &target.id().to_string()) {
                report_persistence_failure(ui, "RDS usage", &e);
            }
        }
        Ok(Some(target))
    }
}

fn select_action(ui: &mut dyn UserInterface) -> Result<Option<Action>> {
    let options = Action::ALL
        .iter()
        .enumerate()
        .map(|(i, a)| PromptOption::new(a.label(), i.to_string()))
        .collect();
    let prompt = Prompt::select(keys::ACTION, "Select action", options);
    Ok(ui
        .prompt(&prompt)?
        .into_value()
        .and_then(|v| v.parse::<usize>().ok())
        .and_then(|i| Action::ALL.get(i).copied()))
}
