//! Per-profile authentication facts.

use crate::error::Result;

use super::profiles::{keys, ProfileConfig};

/// How a profile authenticates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthenticationState {
    /// Named `[sso-session]` the profile refers to.
    pub sso_session: Option<String>,

    /// Legacy per-profile SSO start URL.
    pub sso_start_url: Option<String>,

    /// Account the SSO role belongs to (informational).
    pub sso_account_id: Option<String>,
}

impl AuthenticationState {
    /// Query the authentication facts for a profile.
    pub fn query(config: &ProfileConfig<'_>, profile: &str) -> Result<Self> {
        let sso_session = config.get(profile, keys::SSO_SESSION)?;
        let sso_start_url = config.get(profile, keys::SSO_START_URL)?;
        let sso_account_id = if sso_session.is_some() || sso_start_url.is_some() {
            config.get(profile, keys::SSO_ACCOUNT_ID)?
        } else {
            None
        };

        Ok(Self {
            sso_session,
            sso_start_url,
            sso_account_id,
        })
    }

    /// Whether the profile is SSO-backed.
    pub fn is_sso(&self) -> bool {
        self.sso_session.is_some() || self.sso_start_url.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::{mock, MockRunner};

    #[test]
    fn neither_key_set_is_not_sso() {
        let runner = MockRunner::new();
        let config = ProfileConfig::new(&runner, "/unused");
        let state = AuthenticationState::query(&config, "static-keys").unwrap();
        assert!(!state.is_sso());
        assert_eq!(state, AuthenticationState::default());
        assert_eq!(runner.count("aws configure get sso_account_id"), 0);
    }

    #[test]
    fn session_name_makes_profile_sso() {
        let runner = MockRunner::new();
        runner.respond(
            "aws configure get sso_session --profile dev",
            mock::ok("corp\n"),
        );
        runner.respond(
            "aws configure get sso_account_id --profile dev",
            mock::ok("123456789012\n"),
        );
        let config = ProfileConfig::new(&runner, "/unused");
        let state = AuthenticationState::query(&config, "dev").unwrap();
        assert!(state.is_sso());
        assert_eq!(state.sso_session.as_deref(), Some("corp"));
        assert_eq!(state.sso_account_id.as_deref(), Some("123456789012"));
    }

    #[test]
    fn start_url_alone_makes_profile_sso() {
        let runner = MockRunner::new();
        runner.respond(
            "aws configure get sso_start_url --profile legacy",
            mock::ok("https://corp.awsapps.com/start\n"),
        );
        let config = ProfileConfig::new(&runner, "/unused");
        let state = AuthenticationState::query(&config, "legacy").unwrap();
        assert!(state.is_sso());
        assert_eq!(state.sso_session, None);
    }
}
