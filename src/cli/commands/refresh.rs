//! `asmago refresh <profile>`: refresh an SSO token ahead of time.

use crate::aws::{
    caller_identity, credentials_valid, AuthenticationState, ProfileConfig,
    ReauthenticationController,
};
use crate::cli::args::RefreshArgs;
use crate::config::AppPaths;
use crate::error::Result;
use crate::shell::CommandRunner;
use crate::ui::{Prompt, UserInterface};

use super::dispatcher::{require_aws, Command, CommandResult};

/// The refresh command implementation.
pub struct RefreshCommand<'a> {
    runner: &'a dyn CommandRunner,
    paths: &'a AppPaths,
    args: RefreshArgs,
}

impl<'a> RefreshCommand<'a> {
    /// Create a new refresh command.
    pub fn new(runner: &'a dyn CommandRunner, paths: &'a AppPaths, args: RefreshArgs) -> Self {
        Self {
            runner,
            paths,
            args,
        }
    }
}

impl Command for RefreshCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        require_aws(self.runner)?;
        let profile = self.args.profile.as_str();
        let config = ProfileConfig::new(self.runner, &self.paths.aws_config);

        let state = AuthenticationState::query(&config, profile)?;
        if !state.is_sso() {
            ui.message(&format!(
                "Profile '{}' does not use SSO, nothing to do.",
                profile
            ));
            return Ok(CommandResult::success());
        }

        if !self.args.force {
            let valid = {
                let mut spinner = ui.start_spinner("Checking SSO token...");
                let valid = credentials_valid(self.runner, profile);
                spinner.finish_clear();
                valid?
            };
            if valid {
                ui.success(&format!("SSO token for profile '{}' is still valid.", profile));
                return Ok(CommandResult::success());
            }

            let prompt = Prompt::confirm(
                "confirm_refresh",
                &format!("SSO token for '{}' has expired. Log in now?", profile),
                true,
            );
            if ui.prompt(&prompt)?.as_bool() != Some(true) {
                ui.message("Process aborted by user.");
                return Ok(CommandResult::success());
            }
        }

        ReauthenticationController::new(self.runner, &config).login(profile, &state, ui)?;

        let identity = caller_identity(self.runner, profile)?;
        ui.show_header("Caller identity");
        ui.message(&format!("Account: {}", identity.account));
        ui.message(&format!("UserId:  {}", identity.user_id));
        ui.message(&format!("Arn:     {}", identity.arn));
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AsmagoError;
    use crate::shell::{mock, MockRunner};
    use crate::ui::MockUI;
    use std::path::Path;

    const IDENTITY: &str =
        r#"{"UserId": "AROA:ops@example.com", "Account": "123456789012", "Arn": "arn:aws:sts::123456789012:assumed-role/Ops/ops"}"#;

    fn paths() -> AppPaths {
        AppPaths::under(Path::new("/nonexistent"))
    }

    fn args(force: bool) -> RefreshArgs {
        RefreshArgs {
            profile: "dev".to_string(),
            force,
        }
    }

    fn sso_runner() -> MockRunner {
        let runner = MockRunner::new();
        runner.respond(
            "aws configure get sso_session --profile dev",
            mock::ok("corp\n"),
        );
        runner.respond("aws sso login", mock::ok(""));
        runner
    }

    #[test]
    fn non_sso_profile_is_nothing_to_do() {
        let runner = MockRunner::new();
        let paths = paths();
        let mut ui = MockUI::new();

        RefreshCommand::new(&runner, &paths, args(false))
            .execute(&mut ui)
            .unwrap();
        assert!(ui.has_message("nothing to do"));
        assert_eq!(runner.count("aws sso login"), 0);
    }

    #[test]
    fn valid_token_stops_early() {
        let runner = sso_runner();
        runner.respond("aws sts get-caller-identity", mock::ok(IDENTITY));
        let paths = paths();
        let mut ui = MockUI::new();

        RefreshCommand::new(&runner, &paths, args(false))
            .execute(&mut ui)
            .unwrap();
        assert!(ui.has_success("still valid"));
        assert_eq!(runner.count("aws sso login"), 0);
        assert!(!ui.was_prompted("confirm_refresh"));
    }

    #[test]
    fn expired_token_confirms_then_logs_in() {
        let runner = sso_runner();
        runner.queue(
            "aws sts get-caller-identity",
            vec![mock::fail(255, "Error loading SSO Token"), mock::ok(IDENTITY)],
        );
        let paths = paths();
        let mut ui = MockUI::new();

        RefreshCommand::new(&runner, &paths, args(false))
            .execute(&mut ui)
            .unwrap();
        assert!(ui.was_prompted("confirm_refresh"));
        assert_eq!(runner.count("aws sso login --sso-session corp"), 1);
        assert!(ui.has_message("Account: 123456789012"));
    }

    #[test]
    fn declined_refresh_does_not_log_in() {
        let runner = sso_runner();
        runner.respond("aws sts get-caller-identity", mock::fail(255, "expired"));
        let paths = paths();
        let mut ui = MockUI::new();
        ui.set_prompt_response("confirm_refresh", "no");

        RefreshCommand::new(&runner, &paths, args(false))
            .execute(&mut ui)
            .unwrap();
        assert_eq!(runner.count("aws sso login"), 0);
        assert!(ui.has_message("Process aborted by user."));
    }

    #[test]
    fn force_skips_check() {
        let runner = sso_runner();
        runner.respond("aws sts get-caller-identity", mock::ok(IDENTITY));
        let paths = paths();
        let mut ui = MockUI::new();

        RefreshCommand::new(&runner, &paths, args(true))
            .execute(&mut ui)
            .unwrap();
        assert_eq!(runner.count("aws sts get-caller-identity"), 1);
        assert_eq!(runner.count("aws sso login"), 1);
    }

    #[test]
    fn failed_login_is_fatal() {
        let runner = sso_runner();
        runner.respond("aws sso login", mock::fail(1, "denied"));
        let paths = paths();
        let mut ui = MockUI::new();

        let err = RefreshCommand::new(&runner, &paths, args(true))
            .execute(&mut ui)
            .unwrap_err();
        assert!(matches!(err, AsmagoError::AuthenticationFailed { .. }));
    }
}
