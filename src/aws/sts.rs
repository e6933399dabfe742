//! Caller identity checks.

use serde::Deserialize;

use crate::error::{AsmagoError, Result};
use crate::shell::{CommandRunner, ExternalCommand};

/// Output of `aws sts get-caller-identity`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CallerIdentity {
    pub account: String,
    pub user_id: String,
    pub arn: String,
}

/// Command asking who the profile's credentials belong to.
pub fn caller_identity_command(profile: &str) -> ExternalCommand {
    ExternalCommand::aws(["sts", "get-caller-identity", "--profile", profile, "--output", "json"])
}

/// Whether the profile currently holds usable credentials.
///
/// Any failure counts as "no", including an expired token.
pub fn credentials_valid(runner: &dyn CommandRunner, profile: &str) -> Result<bool> {
    let result = runner.capture(&caller_identity_command(profile))?;
    tracing::debug!(
        "Credential check for {}: exit {:?}",
        profile,
        result.exit_code
    );
    Ok(result.success)
}

/// Fetch and parse the caller identity for a profile.
pub fn caller_identity(runner: &dyn CommandRunner, profile: &str) -> Result<CallerIdentity> {
    let command = caller_identity_command(profile);
    let result = runner.capture(&command)?;
    if !result.success {
        return Err(AsmagoError::CommandFailed {
            command: command.to_string(),
            code: result.exit_code,
            output: result.combined_output(),
        });
    }
    serde_json::from_str(&result.stdout).map_err(|e| {
        AsmagoError::Other(anyhow::anyhow!(
            "failed to parse get-caller-identity output: {}",
            e
        ))
    })
}
