//! SSO re-authentication.

use crate::error::{AsmagoError, Result};
use crate::shell::{CommandRunner, ExternalCommand};
use crate::ui::UserInterface;

use super::auth::AuthenticationState;
use super::profiles::ProfileConfig;

/// Drives `aws sso login` for a profile whose token has expired.
pub struct ReauthenticationController<'a> {
    runner: &'a dyn CommandRunner,
    config: &'a ProfileConfig<'a>,
}

impl<'a> ReauthenticationController<'a> {
    /// Create a controller.
    pub fn new(runner: &'a dyn CommandRunner, config: &'a ProfileConfig<'a>) -> Self {
        Self { runner, config }
    }

    /// The login command for an SSO-backed profile.
    ///
    /// Logs in by session name when one is configured, so every profile
    /// sharing the session is refreshed at once.
    pub fn login_command(profile: &str, state: &AuthenticationState) -> ExternalCommand {
        match &state.sso_session {
            Some(session) => ExternalCommand::aws(["sso", "login", "--sso-session", session]),
            None => ExternalCommand::aws(["sso", "login", "--profile", profile]),
        }
    }

    /// Try to refresh the profile's credential.
    ///
    /// Returns `Ok(false)` when the profile is not SSO-backed: logging in
    /// cannot help and the caller should report its original failure.
    /// Returns `Ok(true)` after a successful login.
    ///
    /// A failed login is [`AsmagoError::AuthenticationFailed`], which no
    /// caller handles; it ends the process.
    pub fn attempt_reauthentication(
        &self,
        profile: &str,
        ui: &mut dyn UserInterface,
    ) -> Result<bool> {
        let state = AuthenticationState::query(self.config, profile)?;
        if !state.is_sso() {
            tracing::debug!("Profile {} is not SSO-backed; not logging in", profile);
            return Ok(false);
        }
        self.login(profile, &state, ui)?;
        Ok(true)
    }

    /// Run the login flow for an SSO-backed profile.
    pub fn login(
        &self,
        profile: &str,
        state: &AuthenticationState,
        ui: &mut dyn UserInterface,
    ) -> Result<()> {
        let command = Self::login_command(profile, state);
        ui.message("Please complete the login process in your browser...");
        tracing::debug!("Re-authenticating profile {} via: {}", profile, command);

        let result = self.runner.interactive(&command)?;
        if !result.success {
            return Err(AsmagoError::AuthenticationFailed {
                profile: profile.to_string(),
                output: result.combined_output(),
            });
        }

        ui.success(&format!(
            "SSO token for profile '{}' has been successfully updated!",
            profile
        ));
        Ok(())
    }
}
