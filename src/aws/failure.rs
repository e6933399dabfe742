//! Classification of failed `aws` invocations.
//!
//! The `aws` client exits with the same status for an expired SSO token as
//! for most other failures, so expiry is recognised from its error text.
//! If the client ever rewords these messages, expiry will be misread as a
//! plain failure and no re-authentication will be attempted.

use crate::shell::CommandResult;

/// Phrases the `aws` client prints when the SSO token is missing or stale.
pub const TOKEN_EXPIRED_MARKERS: &[&str] = &["Error loading SSO Token", "Token has expired"];

/// Why a delegated command did not succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The operator pressed Ctrl-C.
    Interrupted,
    /// The SSO credential needs refreshing.
    TokenExpired,
    /// Anything else.
    Other,
}

/// Classify a failed command result.
///
/// Interrupts take precedence over text matching. The match is
/// case-sensitive and looks at both captured streams.
pub fn classify(result: &CommandResult) -> FailureKind {
    if result.was_interrupted() {
        return FailureKind::Interrupted;
    }
    if is_token_expired(&result.stderr) || is_token_expired(&result.stdout) {
        return FailureKind::TokenExpired;
    }
    FailureKind::Other
}

/// Whether error text reports an expired SSO token.
pub fn is_token_expired(text: &str) -> bool {
    TOKEN_EXPIRED_MARKERS
        .iter()
        .any(|marker| text.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::mock;

    #[test]
    fn error_loading_token_is_expired() {
        let result = mock::fail(
            255,
            "Error loading SSO Token: Token for corp does not exist",
        );
        assert_eq!(classify(&result), FailureKind::TokenExpired);
    }

    #[test]
    fn token_has_expired_is_expired() {
        let result = mock::fail(
            255,
            "An error occurred (UnauthorizedException): Token has expired and refresh failed",
        );
        assert_eq!(classify(&result), FailureKind::TokenExpired);
    }

    #[test]
    fn match_is_case_sensitive() {
        let result = mock::fail(255, "token has expired");
        assert_eq!(classify(&result), FailureKind::Other);
    }

    #[test]
    fn marker_in_stdout_counts() {
        let mut result = mock::fail(255, "");
        result.stdout = "Error loading SSO Token".to_string();
        assert_eq!(classify(&result), FailureKind::TokenExpired);
    }

    #[test]
    fn interrupt_wins_over_text() {
        let mut result = mock::interrupted();
        result.stderr = "Token has expired".to_string();
        assert_eq!(classify(&result), FailureKind::Interrupted);
    }

    #[test]
    fn exit_130_is_interrupt() {
        let result = mock::fail(130, "\n");
        assert_eq!(classify(&result), FailureKind::Interrupted);
    }

    #[test]
    fn other_failures() {
        let result = mock::fail(254, "An error occurred (TargetNotConnected)");
        assert_eq!(classify(&result), FailureKind::Other);
    }
}
