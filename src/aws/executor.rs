//! Bounded-retry execution of `aws` operations.
//!
//! Every operation that may trip over an expired SSO token runs through
//! [`ResilientExecutor`]. The executor is a small state machine:
//!
//! ```text
//!   Attempt ──ok──────────────────────────────▶ Success
//!      │
//!    fail
//!      ▼
//!   EvaluatingFailure ──interrupted───────────▶ Success (no output)
//!      │ ──other / expired, no budget─────────▶ Failure
//!      │
//!   expired, budget left
//!      ▼
//!   Reauthenticating ──not SSO────────────────▶ Failure (original error)
//!      │
//!   logged in (budget consumed)
//!      ▼
//!   Attempt
//! ```
//!
//! The budget is [`RETRY_BUDGET`] extra attempt, so an operation costs at
//! most two invocations and one login.

use crate::error::{AsmagoError, Result};
use crate::shell::{CommandResult, CommandRunner, ExternalCommand};
use crate::ui::UserInterface;

use super::failure::{classify, FailureKind};
use super::reauth::ReauthenticationController;

/// Extra attempts allowed after a successful re-authentication.
pub const RETRY_BUDGET: u32 = 1;

/// Terminal, non-error result of a resilient operation.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The operation exited successfully.
    Completed(CommandResult),
    /// The operator interrupted the operation; treated as a benign end.
    Interrupted,
}

impl Outcome {
    /// The successful result, if the operation completed.
    pub fn completed(self) -> Option<CommandResult> {
        match self {
            Self::Completed(result) => Some(result),
            Self::Interrupted => None,
        }
    }
}

enum State {
    Attempt,
    EvaluatingFailure(CommandResult),
    Reauthenticating(CommandResult),
}

/// Runs `aws` operations with one re-authentication retry.
pub struct ResilientExecutor<'a> {
    runner: &'a dyn CommandRunner,
    reauth: &'a ReauthenticationController<'a>,
}

impl<'a> ResilientExecutor<'a> {
    /// Create an executor.
    pub fn new(
        runner: &'a dyn CommandRunner,
        reauth: &'a ReauthenticationController<'a>,
    ) -> Self {
        Self { runner, reauth }
    }

    /// Run `command` with captured output.
    pub fn capture(
        &self,
        profile: &str,
        command: &ExternalCommand,
        ui: &mut dyn UserInterface,
    ) -> Result<Outcome> {
        self.execute(profile, command, ui, |cmd, _| self.runner.capture(cmd))
    }

    /// Run `command` attached to the operator's terminal.
    pub fn interactive(
        &self,
        profile: &str,
        command: &ExternalCommand,
        ui: &mut dyn UserInterface,
    ) -> Result<Outcome> {
        self.execute(profile, command, ui, |cmd, _| self.runner.interactive(cmd))
    }

    /// Run an arbitrary attempt function through the retry state machine.
    ///
    /// `attempt` is called once, and a second time only if the first
    /// failure was an expired token and re-authentication succeeded.
    pub fn execute<F>(
        &self,
        profile: &str,
        command: &ExternalCommand,
        ui: &mut dyn UserInterface,
        mut attempt: F,
    ) -> Result<Outcome>
    where
        F: FnMut(&ExternalCommand, &mut dyn UserInterface) -> Result<CommandResult>,
    {
        let mut budget = RETRY_BUDGET;
        let mut state = State::Attempt;

        loop {
            state = match state {
                State::Attempt => {
                    let result = attempt(command, ui)?;
                    if result.success {
                        return Ok(Outcome::Completed(result));
                    }
                    State::EvaluatingFailure(result)
                }

                State::EvaluatingFailure(result) => match classify(&result) {
                    FailureKind::Interrupted => {
                        tracing::debug!("{} interrupted by operator", command);
                        return Ok(Outcome::Interrupted);
                    }
                    FailureKind::TokenExpired if budget > 0 => State::Reauthenticating(result),
                    FailureKind::TokenExpired => {
                        tracing::debug!("{} still reports an expired token", command);
                        return Err(AsmagoError::AuthenticationExpired {
                            profile: profile.to_string(),
                            output: result.combined_output(),
                        });
                    }
                    FailureKind::Other => return Err(command_failed(command, &result)),
                },

                State::Reauthenticating(result) => {
                    ui.warning("SSO token has expired. Refreshing credentials...");
                    if !self.reauth.attempt_reauthentication(profile, ui)? {
                        return Err(command_failed(command, &result));
                    }
                    budget -= 1;
                    tracing::debug!("Re-authenticated {}; retrying {}", profile, command);
                    ui.message("Retrying...");
                    State::Attempt
                }
            };
        }
    }
}

fn command_failed(command: &ExternalCommand, result: &CommandResult) -> AsmagoError {
    AsmagoError::CommandFailed {
        command: command.to_string(),
        code: result.exit_code,
        output: result.combined_output(),
    }
}
