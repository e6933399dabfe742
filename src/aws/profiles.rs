//! AWS profile discovery and per-profile property lookups.

use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::error::{AsmagoError, Result};
use crate::shell::{CommandRunner, ExternalCommand};

/// Matches `[profile <name>]` section headers.
static PROFILE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[profile\s+(.+?)\]$").expect("PROFILE_HEADER must compile")
});

/// Property keys asmago reads from a profile.
pub mod keys {
    pub const REGION: &str = "region";
    pub const SSO_SESSION: &str = "sso_session";
    pub const SSO_START_URL: &str = "sso_start_url";
    pub const SSO_ACCOUNT_ID: &str = "sso_account_id";
}

/// Extract profile names from the text of an AWS config file.
///
/// Only `[profile <name>]` sections count; `[default]` and `[sso-session]`
/// sections are ignored.
pub fn parse_profiles(content: &str) -> Vec<String> {
    content
        .lines()
        .filter_map(|line| {
            PROFILE_HEADER
                .captures(line.trim_end())
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
        })
        .collect()
}

/// Read access to AWS profile configuration.
///
/// Profile names come from the config file directly; property values are
/// asked of `aws configure get` so that every source the CLI honours is
/// taken into account.
pub struct ProfileConfig<'a> {
    runner: &'a dyn CommandRunner,
    config_file: PathBuf,
}

impl<'a> ProfileConfig<'a> {
    /// Create a profile source reading `config_file`.
    pub fn new(runner: &'a dyn CommandRunner, config_file: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            config_file: config_file.into(),
        }
    }

    /// The AWS config file this source reads.
    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// List profile names in file order.
    pub fn profiles(&self) -> Result<Vec<String>> {
        if !self.config_file.exists() {
            return Err(AsmagoError::ConfigurationMissing {
                path: self.config_file.clone(),
                hint: "run `aws configure sso` to create a profile".to_string(),
            });
        }
        let content = fs::read_to_string(&self.config_file)?;
        Ok(parse_profiles(&content))
    }

    /// Look up a property for a profile.
    ///
    /// An unset key, an unknown profile and an empty value all read as
    /// `None`. Only a failure to launch `aws` is an error.
    pub fn get(&self, profile: &str, key: &str) -> Result<Option<String>> {
        let command = ExternalCommand::aws(["configure", "get", key, "--profile", profile]);
        let result = self.runner.capture(&command)?;
        if !result.success {
            tracing::debug!("{} is not set for profile {}", key, profile);
            return Ok(None);
        }
        let value = result.stdout.trim();
        Ok((!value.is_empty()).then(|| value.to_string()))
    }

    /// The configured region for a profile.
    pub fn region(&self, profile: &str) -> Result<Option<String>> {
        self.get(profile, keys::REGION)
    }
}
